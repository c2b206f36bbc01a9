//! Billing domain errors

use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("Premium must not be negative")]
    NegativePremium,
}
