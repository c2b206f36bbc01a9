//! Party entity
//!
//! A party is created once from a validated identifier and lives for the
//! whole simulation. Its cumulative payout only ever grows, and its set of
//! owned contracts is mutated exclusively by the registry that issues and
//! regroups contracts.

use serde::{Deserialize, Serialize};

use core_kernel::{Amount, ContractNumber};

use crate::error::PartyError;
use crate::national_id::{LegalForm, NationalId};

/// A contract party (policy holder, insured person, or beneficiary)
///
/// Two parties are equal iff their identifiers are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    id: NationalId,
    cumulative_payout: Amount,
    contracts: Vec<ContractNumber>,
}

impl Party {
    /// Creates a party from a validated identifier
    pub fn new(id: NationalId) -> Self {
        Self {
            id,
            cumulative_payout: Amount::ZERO,
            contracts: Vec::new(),
        }
    }

    /// Returns the party's identifier
    pub fn id(&self) -> &NationalId {
        &self.id
    }

    /// Returns the legal form derived from the identifier
    pub fn legal_form(&self) -> LegalForm {
        self.id.legal_form()
    }

    /// Returns the total claim amount paid out to this party so far
    pub fn cumulative_payout(&self) -> Amount {
        self.cumulative_payout
    }

    /// Returns the contracts owned by this party, in insertion order
    pub fn contracts(&self) -> &[ContractNumber] {
        &self.contracts
    }

    /// Returns true if this party holds the given contract
    pub fn owns_contract(&self, number: &ContractNumber) -> bool {
        self.contracts.iter().any(|n| n == number)
    }

    /// Credits a claim payout to this party
    ///
    /// # Errors
    ///
    /// Returns `PartyError::NegativePayout` for negative amounts; the
    /// cumulative payout can only grow.
    pub fn credit_payout(&mut self, amount: Amount) -> Result<(), PartyError> {
        if amount.is_negative() {
            return Err(PartyError::NegativePayout);
        }
        self.cumulative_payout += amount;
        Ok(())
    }

    /// Links a contract to this party, preserving insertion order
    ///
    /// Driven by the issuing registry. Linking a contract that is already
    /// present is a no-op.
    pub fn link_contract(&mut self, number: ContractNumber) {
        if !self.owns_contract(&number) {
            self.contracts.push(number);
        }
    }

    /// Removes a contract from this party's owned set
    ///
    /// Driven by the registry when a contract is regrouped under a master.
    pub fn unlink_contract(&mut self, number: &ContractNumber) {
        self.contracts.retain(|n| n != number);
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Party {}
