//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    #[error("National identifier is not a valid birth number or registration number: {0}")]
    InvalidIdentifier(String),

    #[error("Payout amount must not be negative")]
    NegativePayout,
}
