//! The insurance company registry
//!
//! The company is the sole owner of every contract it issues, of the party
//! directory, and of the payment ledger (through its allocator). It also owns
//! the simulated clock: time only moves when `advance_clock_to` is called,
//! and every operation reads that clock rather than the wall clock.
//!
//! Contracts are stored in issuance order and their numbers stay reserved for
//! the lifetime of the registry, including after a single-vehicle contract is
//! regrouped under a master.

use std::collections::HashMap;

use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{Amount, ContractNumber, InsurerId, Rate, SimClock, Timestamp};
use domain_billing::{BillingSchedule, PaymentFrequency, PaymentLedger, PaymentRecord};
use domain_contract::{
    Contract, MasterVehicleContract, SingleVehicleContract, TravelContract, Vehicle,
};
use domain_party::{NationalId, Party};

use crate::allocator::PaymentAllocator;
use crate::error::CompanyError;
use crate::snapshot::PortfolioSnapshot;

/// Annualized premiums must reach this share of the insured vehicle's value
fn vehicle_premium_floor() -> Rate {
    Rate::from_percentage(dec!(2))
}

/// Damages at or above this share of the vehicle's value write the contract off
fn write_off_threshold() -> Rate {
    Rate::from_percentage(dec!(70))
}

/// Annualized premium floor per insured party on a travel contract
const TRAVEL_PREMIUM_FLOOR_PER_PARTY: i64 = 5;

/// Coverage granted per insured party on a travel contract
const TRAVEL_COVERAGE_PER_PARTY: i64 = 10;

/// An insurance company: contract registry, party directory, clock, and ledger
#[derive(Debug)]
pub struct InsuranceCompany {
    id: InsurerId,
    clock: SimClock,
    parties: HashMap<NationalId, Party>,
    contracts: Vec<Contract>,
    allocator: PaymentAllocator,
}

impl InsuranceCompany {
    /// Creates a company whose clock starts at the given instant
    pub fn new(opening_time: Timestamp) -> Self {
        let id = InsurerId::new();
        Self {
            id,
            clock: SimClock::starting_at(opening_time),
            parties: HashMap::new(),
            contracts: Vec::new(),
            allocator: PaymentAllocator::new(id),
        }
    }

    /// Returns this insurer's identifier
    pub fn insurer_id(&self) -> InsurerId {
        self.id
    }

    /// Returns the current simulated instant
    pub fn current_time(&self) -> Timestamp {
        self.clock.now()
    }

    /// Moves the simulated clock forward
    ///
    /// This is the only externally driven mutation that is not a business
    /// operation; callers advance the clock before charging premiums to
    /// simulate time passing.
    ///
    /// # Errors
    ///
    /// Fails if the target instant lies before the current one.
    pub fn advance_clock_to(&mut self, target: Timestamp) -> Result<(), CompanyError> {
        self.clock.advance_to(target)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only query surface
    // ------------------------------------------------------------------

    /// Returns every top-level contract in issuance order
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Looks up a top-level contract by number
    pub fn contract(&self, number: &ContractNumber) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.number() == number)
    }

    /// Looks up a party by identifier
    pub fn party(&self, id: &NationalId) -> Option<&Party> {
        self.parties.get(id)
    }

    /// Returns a contract's payment history, oldest first
    pub fn payment_history(&self, number: &ContractNumber) -> &[PaymentRecord] {
        self.allocator.history(number)
    }

    /// Returns the full payment ledger
    pub fn payments(&self) -> &PaymentLedger {
        self.allocator.ledger()
    }

    /// Captures a serializable snapshot of the whole portfolio
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot::capture(self.clock.now(), &self.contracts, self.allocator.ledger())
    }

    // ------------------------------------------------------------------
    // Issuance
    // ------------------------------------------------------------------

    /// Issues a single-vehicle contract
    ///
    /// The annualized premium must reach 2% of the vehicle's original value
    /// (both sides truncated toward zero). Coverage is half the vehicle's
    /// value. The schedule starts at the current instant with a zero balance,
    /// so the first premium is charged immediately.
    ///
    /// # Errors
    ///
    /// - `CompanyError::DuplicateContractNumber`
    /// - `CompanyError::NonPositivePremium`
    /// - `CompanyError::PremiumBelowFloor`
    /// - any `ContractError` from contract construction
    pub fn insure_vehicle(
        &mut self,
        number: ContractNumber,
        beneficiary: Option<NationalId>,
        policy_holder: NationalId,
        proposed_premium: Amount,
        frequency: PaymentFrequency,
        vehicle: Vehicle,
    ) -> Result<&Contract, CompanyError> {
        self.ensure_number_free(&number)?;
        if !proposed_premium.is_positive() {
            return Err(CompanyError::NonPositivePremium);
        }

        let annualized = frequency.annualize(proposed_premium);
        let floor = vehicle_premium_floor().of_trunc(vehicle.original_value())?;
        if annualized < floor {
            return Err(CompanyError::PremiumBelowFloor { annualized, floor });
        }

        let schedule = BillingSchedule::new(proposed_premium, frequency, self.clock.now())?;
        let coverage = vehicle.original_value().split(2);
        let contract = SingleVehicleContract::new(
            number.clone(),
            self.id,
            beneficiary.clone(),
            policy_holder.clone(),
            schedule,
            coverage,
            vehicle,
        )?;

        let mut contract = Contract::SingleVehicle(contract);
        contract.accrue_due(self.clock.now());

        info!(number = %number, holder = %policy_holder, %coverage, "vehicle contract issued");
        Ok(self.register(contract, policy_holder, beneficiary))
    }

    /// Issues a travel contract over a set of natural persons
    ///
    /// The annualized premium must reach five per insured party; coverage is
    /// ten per insured party. The first premium is charged immediately.
    ///
    /// # Errors
    ///
    /// - `CompanyError::DuplicateContractNumber`
    /// - `CompanyError::NonPositivePremium`
    /// - `CompanyError::PremiumBelowFloor`
    /// - any `ContractError` from contract construction (empty insured set,
    ///   insured legal entity)
    pub fn insure_persons(
        &mut self,
        number: ContractNumber,
        policy_holder: NationalId,
        proposed_premium: Amount,
        frequency: PaymentFrequency,
        insured: Vec<NationalId>,
    ) -> Result<&Contract, CompanyError> {
        self.ensure_number_free(&number)?;
        if !proposed_premium.is_positive() {
            return Err(CompanyError::NonPositivePremium);
        }

        let party_count = count_unique(&insured);
        let annualized = frequency.annualize(proposed_premium);
        let floor = Amount::new(TRAVEL_PREMIUM_FLOOR_PER_PARTY.saturating_mul(party_count as i64));
        if annualized < floor {
            return Err(CompanyError::PremiumBelowFloor { annualized, floor });
        }

        let schedule = BillingSchedule::new(proposed_premium, frequency, self.clock.now())?;
        let coverage = Amount::new(TRAVEL_COVERAGE_PER_PARTY.saturating_mul(party_count as i64));
        let contract = TravelContract::new(
            number.clone(),
            self.id,
            policy_holder.clone(),
            schedule,
            coverage,
            insured,
        )?;

        let mut contract = Contract::Travel(contract);
        contract.accrue_due(self.clock.now());

        // insured parties join the directory alongside the holder
        if let Contract::Travel(travel) = &contract {
            for id in travel.insured_parties().to_vec() {
                self.ensure_party(id);
            }
        }

        info!(number = %number, holder = %policy_holder, parties = party_count, "travel contract issued");
        Ok(self.register(contract, policy_holder, None))
    }

    /// Creates an empty master vehicle contract for a legal entity
    ///
    /// # Errors
    ///
    /// - `CompanyError::DuplicateContractNumber`
    /// - `ContractError::PolicyHolderNotLegal`
    pub fn create_master_vehicle_contract(
        &mut self,
        number: ContractNumber,
        beneficiary: Option<NationalId>,
        policy_holder: NationalId,
    ) -> Result<&Contract, CompanyError> {
        self.ensure_number_free(&number)?;
        let contract = MasterVehicleContract::new(
            number.clone(),
            self.id,
            beneficiary.clone(),
            policy_holder.clone(),
        )?;

        info!(number = %number, holder = %policy_holder, "master contract created");
        Ok(self.register(Contract::MasterVehicle(contract), policy_holder, beneficiary))
    }

    /// Regroups a single-vehicle contract under a master contract
    ///
    /// The single contract leaves the top-level registry and its holder's
    /// owned set; it keeps accruing and receiving funds as a child of the
    /// master. Its number stays reserved.
    ///
    /// # Errors
    ///
    /// - `CompanyError::ContractNotFound` if either number is not registered
    ///   here
    /// - `CompanyError::NotAMasterContract` / `NotASingleVehicleContract`
    /// - `CompanyError::ContractInactive` if either contract is inactive
    /// - `CompanyError::PolicyHoldersDiffer`
    pub fn move_single_to_master(
        &mut self,
        master_number: &ContractNumber,
        single_number: &ContractNumber,
    ) -> Result<(), CompanyError> {
        let master_index = self
            .contract_index(master_number)
            .ok_or_else(|| CompanyError::ContractNotFound(master_number.clone()))?;
        if self.contracts[master_index].as_master().is_none() {
            return Err(CompanyError::NotAMasterContract(master_number.clone()));
        }

        let single_index = self
            .contract_index(single_number)
            .ok_or_else(|| CompanyError::ContractNotFound(single_number.clone()))?;
        if self.contracts[single_index].as_single().is_none() {
            return Err(CompanyError::NotASingleVehicleContract(single_number.clone()));
        }

        if !self.contracts[master_index].is_active() {
            return Err(CompanyError::ContractInactive(master_number.clone()));
        }
        if !self.contracts[single_index].is_active() {
            return Err(CompanyError::ContractInactive(single_number.clone()));
        }
        if self.contracts[master_index].policy_holder()
            != self.contracts[single_index].policy_holder()
        {
            return Err(CompanyError::PolicyHoldersDiffer);
        }

        let removed = self.contracts.remove(single_index);
        let holder = removed.policy_holder().clone();
        let single = match removed {
            Contract::SingleVehicle(single) => single,
            _ => unreachable!("variant checked above"),
        };

        if let Some(party) = self.parties.get_mut(&holder) {
            party.unlink_contract(single_number);
        }

        // removal may have shifted the master's position
        let master_index = if single_index < master_index {
            master_index - 1
        } else {
            master_index
        };
        let master = self.contracts[master_index]
            .as_master_mut()
            .expect("variant checked above");
        master.add_child(single);

        info!(master = %master_number, single = %single_number, "contract regrouped");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Premium accrual
    // ------------------------------------------------------------------

    /// Charges every premium due on one contract by the current instant
    ///
    /// A master contract accrues all of its children, whether or not they are
    /// still active. Safe to call redundantly: once nothing is due, it
    /// charges nothing. Returns the number of cycles charged.
    ///
    /// # Errors
    ///
    /// Fails only if the contract is not registered here.
    pub fn charge_premium(&mut self, number: &ContractNumber) -> Result<u32, CompanyError> {
        let now = self.clock.now();
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.number() == number)
            .ok_or_else(|| CompanyError::ContractNotFound(number.clone()))?;
        Ok(contract.accrue_due(now))
    }

    /// Charges premiums due on every **active** top-level contract
    pub fn charge_all_due(&mut self) {
        let now = self.clock.now();
        for contract in &mut self.contracts {
            if contract.is_active() {
                contract.accrue_due(now);
            }
        }
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Applies an incoming payment to a contract
    ///
    /// Leaf contracts absorb the whole amount on their own balance; master
    /// contracts fan it out across their children (see
    /// [`PaymentAllocator`]). One record with the requested amount is
    /// appended to the contract's history.
    ///
    /// # Errors
    ///
    /// - `CompanyError::ContractNotFound`
    /// - `CompanyError::NonPositiveAmount`
    /// - `CompanyError::ContractInactive`
    /// - `CompanyError::NoChildContracts` for a childless master
    pub fn pay(&mut self, number: &ContractNumber, amount: Amount) -> Result<(), CompanyError> {
        let now = self.clock.now();
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.number() == number)
            .ok_or_else(|| CompanyError::ContractNotFound(number.clone()))?;
        self.allocator.pay(contract, amount, now)
    }

    // ------------------------------------------------------------------
    // Claims and deactivation
    // ------------------------------------------------------------------

    /// Processes a claim on a travel contract
    ///
    /// Coverage is split equally across the affected parties (integer
    /// division; the remainder is not distributed) and the contract is
    /// deactivated unconditionally.
    ///
    /// # Errors
    ///
    /// - `CompanyError::ContractNotFound` / `NotATravelContract`
    /// - `CompanyError::NoAffectedParties`
    /// - `CompanyError::PartyNotInsured`
    /// - `CompanyError::ContractInactive`
    pub fn process_travel_claim(
        &mut self,
        number: &ContractNumber,
        affected: &[NationalId],
    ) -> Result<(), CompanyError> {
        let index = self
            .contract_index(number)
            .ok_or_else(|| CompanyError::ContractNotFound(number.clone()))?;
        let travel = self.contracts[index]
            .as_travel()
            .ok_or_else(|| CompanyError::NotATravelContract(number.clone()))?;

        if affected.is_empty() {
            return Err(CompanyError::NoAffectedParties);
        }
        if let Some(outsider) = affected.iter().find(|id| !travel.insures(id)) {
            return Err(CompanyError::PartyNotInsured(outsider.to_string()));
        }
        if !travel.is_active() {
            return Err(CompanyError::ContractInactive(number.clone()));
        }

        let recipients = dedup(affected);
        let share = travel.terms().coverage_amount().split(recipients.len());
        for id in recipients {
            self.ensure_party(id).credit_payout(share)?;
        }
        self.contracts[index].set_inactive();

        info!(number = %number, %share, "travel claim processed, contract deactivated");
        Ok(())
    }

    /// Processes a claim on a single-vehicle contract
    ///
    /// Pays the full coverage amount to the beneficiary, or to the policy
    /// holder when no beneficiary is set. The contract is written off (and
    /// deactivated) only when the expected damages reach 70% of the vehicle's
    /// original value, truncated toward zero.
    ///
    /// # Errors
    ///
    /// - `CompanyError::ContractNotFound` / `NotASingleVehicleContract`
    /// - `CompanyError::NonPositiveDamages`
    /// - `CompanyError::ContractInactive`
    pub fn process_vehicle_claim(
        &mut self,
        number: &ContractNumber,
        expected_damages: Amount,
    ) -> Result<(), CompanyError> {
        let index = self
            .contract_index(number)
            .ok_or_else(|| CompanyError::ContractNotFound(number.clone()))?;
        let single = self.contracts[index]
            .as_single()
            .ok_or_else(|| CompanyError::NotASingleVehicleContract(number.clone()))?;

        if !expected_damages.is_positive() {
            return Err(CompanyError::NonPositiveDamages);
        }
        if !single.is_active() {
            return Err(CompanyError::ContractInactive(number.clone()));
        }

        let payee = single
            .beneficiary()
            .unwrap_or_else(|| single.terms().policy_holder())
            .clone();
        let payout = single.terms().coverage_amount();
        let threshold = write_off_threshold().of_trunc(single.vehicle().original_value())?;

        self.ensure_party(payee).credit_payout(payout)?;

        let written_off = expected_damages >= threshold;
        if written_off {
            self.contracts[index].set_inactive();
        }

        info!(number = %number, %payout, written_off, "vehicle claim processed");
        Ok(())
    }

    /// Deactivates a contract directly
    ///
    /// For a master contract the deactivation cascades to every current
    /// child. The transition is irreversible for leaf contracts.
    ///
    /// # Errors
    ///
    /// Fails only if the contract is not registered here.
    pub fn deactivate(&mut self, number: &ContractNumber) -> Result<(), CompanyError> {
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.number() == number)
            .ok_or_else(|| CompanyError::ContractNotFound(number.clone()))?;
        contract.set_inactive();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn contract_index(&self, number: &ContractNumber) -> Option<usize> {
        self.contracts.iter().position(|c| c.number() == number)
    }

    /// A number stays reserved even for contracts regrouped under a master
    fn ensure_number_free(&self, number: &ContractNumber) -> Result<(), CompanyError> {
        let top_level_taken = self.contracts.iter().any(|c| c.number() == number);
        let grouped_taken = self
            .contracts
            .iter()
            .filter_map(Contract::as_master)
            .flat_map(MasterVehicleContract::children)
            .any(|c| c.number() == number);
        if top_level_taken || grouped_taken {
            return Err(CompanyError::DuplicateContractNumber(number.clone()));
        }
        Ok(())
    }

    fn ensure_party(&mut self, id: NationalId) -> &mut Party {
        self.parties
            .entry(id.clone())
            .or_insert_with(|| Party::new(id))
    }

    /// Registers a validated contract and links it to its policy holder
    fn register(
        &mut self,
        contract: Contract,
        policy_holder: NationalId,
        beneficiary: Option<NationalId>,
    ) -> &Contract {
        let number = contract.number().clone();
        self.ensure_party(policy_holder).link_contract(number);
        if let Some(beneficiary) = beneficiary {
            self.ensure_party(beneficiary);
        }
        self.contracts.push(contract);
        self.contracts.last().expect("contract just registered")
    }
}

fn count_unique(ids: &[NationalId]) -> usize {
    dedup(ids).len()
}

fn dedup(ids: &[NationalId]) -> Vec<NationalId> {
    let mut unique: Vec<NationalId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}
