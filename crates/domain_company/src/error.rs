//! Company domain errors
//!
//! Every failure falls into one of two kinds: the caller passed bad input
//! (`InvalidArgument`), or the operation targeted a contract in a state that
//! cannot accept it (`InvalidContractState`). The split lets callers
//! distinguish "fix your request" from "the portfolio moved on". All
//! operations validate before mutating, so a returned error implies no state
//! change.

use thiserror::Error;

use core_kernel::{Amount, ContractNumber, MoneyError, TemporalError};
use domain_billing::BillingError;
use domain_contract::ContractError;
use domain_party::PartyError;

/// The two-way failure taxonomy exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing construction input
    InvalidArgument,
    /// Operation attempted against a contract in the wrong state
    InvalidContractState,
}

/// Errors that can occur in the company domain
#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Party error: {0}")]
    Party(#[from] PartyError),

    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Contract number {0} is already registered")]
    DuplicateContractNumber(ContractNumber),

    #[error("Proposed premium must be positive")]
    NonPositivePremium,

    #[error("Annualized premium {annualized} is below the floor of {floor}")]
    PremiumBelowFloor { annualized: Amount, floor: Amount },

    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    #[error("Expected damages must be positive")]
    NonPositiveDamages,

    #[error("A claim must name at least one affected party")]
    NoAffectedParties,

    #[error("Affected party {0} is not insured under the contract")]
    PartyNotInsured(String),

    #[error("Contract {0} is not a master vehicle contract")]
    NotAMasterContract(ContractNumber),

    #[error("Contract {0} is not a single-vehicle contract")]
    NotASingleVehicleContract(ContractNumber),

    #[error("Contract {0} is not a travel contract")]
    NotATravelContract(ContractNumber),

    #[error("Contract {0} is not registered with this insurer")]
    ContractNotFound(ContractNumber),

    #[error("Contract {0} belongs to a different insurer")]
    WrongInsurer(ContractNumber),

    #[error("Contract {0} is inactive")]
    ContractInactive(ContractNumber),

    #[error("Master contract {0} has no child contracts to pay against")]
    NoChildContracts(ContractNumber),

    #[error("Contracts must share a policy holder to be grouped")]
    PolicyHoldersDiffer,
}

impl CompanyError {
    /// Maps the error onto the two-way taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompanyError::Party(_)
            | CompanyError::Contract(_)
            | CompanyError::Billing(_)
            | CompanyError::Money(_)
            | CompanyError::Temporal(_)
            | CompanyError::DuplicateContractNumber(_)
            | CompanyError::NonPositivePremium
            | CompanyError::PremiumBelowFloor { .. }
            | CompanyError::NonPositiveAmount
            | CompanyError::NonPositiveDamages
            | CompanyError::NoAffectedParties
            | CompanyError::PartyNotInsured(_)
            | CompanyError::NotAMasterContract(_)
            | CompanyError::NotASingleVehicleContract(_)
            | CompanyError::NotATravelContract(_) => ErrorKind::InvalidArgument,

            CompanyError::ContractNotFound(_)
            | CompanyError::WrongInsurer(_)
            | CompanyError::ContractInactive(_)
            | CompanyError::NoChildContracts(_)
            | CompanyError::PolicyHoldersDiffer => ErrorKind::InvalidContractState,
        }
    }
}
