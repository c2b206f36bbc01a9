//! Contract domain errors

use thiserror::Error;

/// Errors that can occur when constructing or mutating contracts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("License plate must be exactly 7 characters from [A-Z0-9]: {0:?}")]
    InvalidLicensePlate(String),

    #[error("Vehicle value must be positive")]
    NonPositiveVehicleValue,

    #[error("Coverage amount must not be negative")]
    NegativeCoverage,

    #[error("Beneficiary must differ from the policy holder")]
    BeneficiaryIsPolicyHolder,

    #[error("Master contract policy holder must be a legal entity")]
    PolicyHolderNotLegal,

    #[error("Travel contract must insure at least one party")]
    NoInsuredParties,

    #[error("Travel contract may only insure natural persons: {0}")]
    InsuredPartyNotNatural(String),
}
