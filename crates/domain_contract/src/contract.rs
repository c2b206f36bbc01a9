//! The contract variant hierarchy
//!
//! All three contract shapes share a [`ContractTerms`] record; the variant
//! enum [`Contract`] is what the registry stores and iterates. Behaviour that
//! differs per shape (activity, accrual, payment distribution) is dispatched
//! by pattern matching on the enum rather than by virtual override.
//!
//! # Activity
//!
//! Leaf contracts read their own flag, and deactivation is terminal. A master
//! contract with children derives its activity from them: it is active while
//! any child is active. With no children it falls back to its own flag.
//! Deactivating a master deactivates every current child as well.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Amount, ContractNumber, InsurerId, Timestamp};
use domain_billing::BillingSchedule;
use domain_party::NationalId;

use crate::error::ContractError;
use crate::vehicle::Vehicle;

/// Discriminates the three contract shapes, e.g. for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    SingleVehicle,
    MasterVehicle,
    Travel,
}

/// The record shape shared by every contract variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    number: ContractNumber,
    insurer: InsurerId,
    policy_holder: NationalId,
    coverage_amount: Amount,
    active: bool,
}

impl ContractTerms {
    /// Creates the common contract record, active by default
    ///
    /// # Errors
    ///
    /// Returns `ContractError::NegativeCoverage` for a negative coverage
    /// amount.
    pub fn new(
        number: ContractNumber,
        insurer: InsurerId,
        policy_holder: NationalId,
        coverage_amount: Amount,
    ) -> Result<Self, ContractError> {
        if coverage_amount.is_negative() {
            return Err(ContractError::NegativeCoverage);
        }
        Ok(Self {
            number,
            insurer,
            policy_holder,
            coverage_amount,
            active: true,
        })
    }

    pub fn number(&self) -> &ContractNumber {
        &self.number
    }

    pub fn insurer(&self) -> InsurerId {
        self.insurer
    }

    pub fn policy_holder(&self) -> &NationalId {
        &self.policy_holder
    }

    pub fn coverage_amount(&self) -> Amount {
        self.coverage_amount
    }

    fn same_identity(&self, other: &ContractTerms) -> bool {
        self.number == other.number && self.insurer == other.insurer
    }
}

fn check_beneficiary(
    beneficiary: &Option<NationalId>,
    policy_holder: &NationalId,
) -> Result<(), ContractError> {
    if beneficiary.as_ref() == Some(policy_holder) {
        return Err(ContractError::BeneficiaryIsPolicyHolder);
    }
    Ok(())
}

/// A contract insuring one vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleVehicleContract {
    terms: ContractTerms,
    beneficiary: Option<NationalId>,
    vehicle: Vehicle,
    schedule: BillingSchedule,
}

impl SingleVehicleContract {
    /// Creates a single-vehicle contract
    ///
    /// # Errors
    ///
    /// Returns `ContractError::BeneficiaryIsPolicyHolder` when the optional
    /// beneficiary equals the policy holder, plus any `ContractTerms` error.
    pub fn new(
        number: ContractNumber,
        insurer: InsurerId,
        beneficiary: Option<NationalId>,
        policy_holder: NationalId,
        schedule: BillingSchedule,
        coverage_amount: Amount,
        vehicle: Vehicle,
    ) -> Result<Self, ContractError> {
        check_beneficiary(&beneficiary, &policy_holder)?;
        let terms = ContractTerms::new(number, insurer, policy_holder, coverage_amount)?;
        Ok(Self {
            terms,
            beneficiary,
            vehicle,
            schedule,
        })
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn number(&self) -> &ContractNumber {
        self.terms.number()
    }

    pub fn beneficiary(&self) -> Option<&NationalId> {
        self.beneficiary.as_ref()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn schedule(&self) -> &BillingSchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut BillingSchedule {
        &mut self.schedule
    }

    pub fn is_active(&self) -> bool {
        self.terms.active
    }

    /// Deactivates this contract; the transition is irreversible
    pub fn set_inactive(&mut self) {
        self.terms.active = false;
    }
}

impl PartialEq for SingleVehicleContract {
    fn eq(&self, other: &Self) -> bool {
        self.terms.same_identity(&other.terms)
    }
}

impl Eq for SingleVehicleContract {}

/// A grouping contract over single-vehicle contracts
///
/// Carries no billing schedule and zero coverage of its own; payments made
/// against it are distributed across its children. The policy holder must be
/// a legal entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterVehicleContract {
    terms: ContractTerms,
    beneficiary: Option<NationalId>,
    children: Vec<SingleVehicleContract>,
}

impl MasterVehicleContract {
    /// Creates an empty master contract
    ///
    /// # Errors
    ///
    /// Returns `ContractError::PolicyHolderNotLegal` unless the policy holder
    /// is a legal entity, and `ContractError::BeneficiaryIsPolicyHolder` when
    /// the optional beneficiary equals the policy holder.
    pub fn new(
        number: ContractNumber,
        insurer: InsurerId,
        beneficiary: Option<NationalId>,
        policy_holder: NationalId,
    ) -> Result<Self, ContractError> {
        if !policy_holder.is_legal() {
            return Err(ContractError::PolicyHolderNotLegal);
        }
        check_beneficiary(&beneficiary, &policy_holder)?;
        let terms = ContractTerms::new(number, insurer, policy_holder, Amount::ZERO)?;
        Ok(Self {
            terms,
            beneficiary,
            children: Vec::new(),
        })
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn number(&self) -> &ContractNumber {
        self.terms.number()
    }

    pub fn beneficiary(&self) -> Option<&NationalId> {
        self.beneficiary.as_ref()
    }

    /// Returns the child contracts in insertion order
    pub fn children(&self) -> &[SingleVehicleContract] {
        &self.children
    }

    /// Returns the children mutably, without allowing reordering or growth
    pub fn children_mut(&mut self) -> &mut [SingleVehicleContract] {
        &mut self.children
    }

    /// Appends a child contract, preserving insertion order
    ///
    /// Adding a contract that is already grouped here is a no-op.
    pub fn add_child(&mut self, child: SingleVehicleContract) {
        if !self.children.iter().any(|c| *c == child) {
            self.children.push(child);
        }
    }

    /// Derived activity: any active child, or the own flag when childless
    pub fn is_active(&self) -> bool {
        if self.children.is_empty() {
            self.terms.active
        } else {
            self.children.iter().any(SingleVehicleContract::is_active)
        }
    }

    /// Deactivates this contract and every current child
    pub fn set_inactive(&mut self) {
        for child in &mut self.children {
            child.set_inactive();
        }
        self.terms.active = false;
    }
}

impl PartialEq for MasterVehicleContract {
    fn eq(&self, other: &Self) -> bool {
        self.terms.same_identity(&other.terms)
    }
}

impl Eq for MasterVehicleContract {}

/// A contract insuring a set of natural persons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelContract {
    terms: ContractTerms,
    insured: Vec<NationalId>,
    schedule: BillingSchedule,
}

impl TravelContract {
    /// Creates a travel contract
    ///
    /// The insured set keeps insertion order and drops duplicates.
    ///
    /// # Errors
    ///
    /// - `ContractError::NoInsuredParties` for an empty insured set
    /// - `ContractError::InsuredPartyNotNatural` if any insured party is a
    ///   legal entity
    pub fn new(
        number: ContractNumber,
        insurer: InsurerId,
        policy_holder: NationalId,
        schedule: BillingSchedule,
        coverage_amount: Amount,
        insured: Vec<NationalId>,
    ) -> Result<Self, ContractError> {
        if insured.is_empty() {
            return Err(ContractError::NoInsuredParties);
        }
        if let Some(entity) = insured.iter().find(|id| !id.is_natural()) {
            return Err(ContractError::InsuredPartyNotNatural(entity.to_string()));
        }
        let mut deduplicated: Vec<NationalId> = Vec::with_capacity(insured.len());
        for id in insured {
            if !deduplicated.contains(&id) {
                deduplicated.push(id);
            }
        }
        let terms = ContractTerms::new(number, insurer, policy_holder, coverage_amount)?;
        Ok(Self {
            terms,
            insured: deduplicated,
            schedule,
        })
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn number(&self) -> &ContractNumber {
        self.terms.number()
    }

    /// Returns the insured parties in insertion order
    pub fn insured_parties(&self) -> &[NationalId] {
        &self.insured
    }

    /// Returns true if the given party is insured under this contract
    pub fn insures(&self, id: &NationalId) -> bool {
        self.insured.contains(id)
    }

    pub fn schedule(&self) -> &BillingSchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut BillingSchedule {
        &mut self.schedule
    }

    pub fn is_active(&self) -> bool {
        self.terms.active
    }

    /// Deactivates this contract; the transition is irreversible
    pub fn set_inactive(&mut self) {
        self.terms.active = false;
    }
}

impl PartialEq for TravelContract {
    fn eq(&self, other: &Self) -> bool {
        self.terms.same_identity(&other.terms)
    }
}

impl Eq for TravelContract {}

/// Any contract held by a registry
///
/// Two contracts are equal iff both their numbers and their insurers match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Contract {
    SingleVehicle(SingleVehicleContract),
    MasterVehicle(MasterVehicleContract),
    Travel(TravelContract),
}

impl Contract {
    pub fn kind(&self) -> ContractKind {
        match self {
            Contract::SingleVehicle(_) => ContractKind::SingleVehicle,
            Contract::MasterVehicle(_) => ContractKind::MasterVehicle,
            Contract::Travel(_) => ContractKind::Travel,
        }
    }

    pub fn terms(&self) -> &ContractTerms {
        match self {
            Contract::SingleVehicle(c) => c.terms(),
            Contract::MasterVehicle(c) => c.terms(),
            Contract::Travel(c) => c.terms(),
        }
    }

    pub fn number(&self) -> &ContractNumber {
        self.terms().number()
    }

    pub fn insurer(&self) -> InsurerId {
        self.terms().insurer()
    }

    pub fn policy_holder(&self) -> &NationalId {
        self.terms().policy_holder()
    }

    pub fn coverage_amount(&self) -> Amount {
        self.terms().coverage_amount()
    }

    /// Returns the billing schedule, absent for master contracts
    pub fn schedule(&self) -> Option<&BillingSchedule> {
        match self {
            Contract::SingleVehicle(c) => Some(c.schedule()),
            Contract::MasterVehicle(_) => None,
            Contract::Travel(c) => Some(c.schedule()),
        }
    }

    /// Returns the billing schedule mutably, absent for master contracts
    pub fn schedule_mut(&mut self) -> Option<&mut BillingSchedule> {
        match self {
            Contract::SingleVehicle(c) => Some(c.schedule_mut()),
            Contract::MasterVehicle(_) => None,
            Contract::Travel(c) => Some(c.schedule_mut()),
        }
    }

    /// Activity per shape: own flag for leaves, derived for masters
    pub fn is_active(&self) -> bool {
        match self {
            Contract::SingleVehicle(c) => c.is_active(),
            Contract::MasterVehicle(c) => c.is_active(),
            Contract::Travel(c) => c.is_active(),
        }
    }

    /// Deactivates the contract, cascading over a master's children
    pub fn set_inactive(&mut self) {
        match self {
            Contract::SingleVehicle(c) => c.set_inactive(),
            Contract::MasterVehicle(c) => c.set_inactive(),
            Contract::Travel(c) => c.set_inactive(),
        }
        debug!(number = %self.number(), "contract deactivated");
    }

    /// Charges every premium due by `now`
    ///
    /// A master contract accrues every child, whether or not the child is
    /// still active. Returns the total number of cycles charged.
    pub fn accrue_due(&mut self, now: Timestamp) -> u32 {
        match self {
            Contract::SingleVehicle(c) => c.schedule_mut().accrue_due(now),
            Contract::Travel(c) => c.schedule_mut().accrue_due(now),
            Contract::MasterVehicle(c) => c
                .children_mut()
                .iter_mut()
                .map(|child| child.schedule_mut().accrue_due(now))
                .sum(),
        }
    }

    pub fn as_master(&self) -> Option<&MasterVehicleContract> {
        match self {
            Contract::MasterVehicle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_master_mut(&mut self) -> Option<&mut MasterVehicleContract> {
        match self {
            Contract::MasterVehicle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_single(&self) -> Option<&SingleVehicleContract> {
        match self {
            Contract::SingleVehicle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_travel(&self) -> Option<&TravelContract> {
        match self {
            Contract::Travel(c) => Some(c),
            _ => None,
        }
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.terms().same_identity(other.terms())
    }
}

impl Eq for Contract {}
