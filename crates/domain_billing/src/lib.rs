//! Billing Domain - premium schedules and the payment ledger
//!
//! This crate holds the per-contract billing state and the append-only record
//! of received payments:
//!
//! - A [`BillingSchedule`] tracks the premium amount, payment frequency,
//!   next-due timestamp, and the running outstanding balance of one contract.
//!   The accrual step adds one premium per elapsed billing cycle and never
//!   moves the next-due timestamp backwards.
//! - The [`PaymentLedger`] keeps an immutable, timestamp-ordered payment
//!   history per contract number. Entries are only ever appended.
//!
//! Balances are signed: positive is owed, negative is retained credit from
//! an overpayment.

pub mod error;
pub mod ledger;
pub mod schedule;

pub use error::BillingError;
pub use ledger::{PaymentLedger, PaymentRecord};
pub use schedule::{BillingSchedule, PaymentFrequency};
