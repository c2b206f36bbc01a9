//! Append-only payment ledger
//!
//! Every received payment is recorded once, against the contract it was paid
//! toward, with the simulated-clock timestamp of receipt. Entries are never
//! amended or removed, and because the clock is monotone each per-contract
//! history is ordered by timestamp.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::{Amount, ContractNumber, Timestamp};

/// One received payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// When the payment was received (simulated clock)
    pub at: Timestamp,
    /// The requested payment amount, before any internal distribution
    pub amount: Amount,
}

impl PaymentRecord {
    /// Creates a payment record
    pub fn new(at: Timestamp, amount: Amount) -> Self {
        Self { at, amount }
    }
}

/// Per-contract payment histories, keyed by contract number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentLedger {
    history: HashMap<ContractNumber, Vec<PaymentRecord>>,
}

impl PaymentLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a payment record to a contract's history
    pub fn record(&mut self, contract: ContractNumber, at: Timestamp, amount: Amount) {
        self.history
            .entry(contract)
            .or_default()
            .push(PaymentRecord::new(at, amount));
    }

    /// Returns a contract's payment history, oldest first
    ///
    /// A contract that never received a payment has an empty history.
    pub fn history(&self, contract: &ContractNumber) -> &[PaymentRecord] {
        self.history
            .get(contract)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the total recorded against a contract
    pub fn total_received(&self, contract: &ContractNumber) -> Amount {
        self.history(contract).iter().map(|r| r.amount).sum()
    }

    /// Returns the number of contracts with at least one recorded payment
    pub fn contracts_paid(&self) -> usize {
        self.history.len()
    }
}
