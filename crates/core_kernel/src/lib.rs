//! Core Kernel - Foundational types for the contract portfolio engine
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Integer ledger amounts and truncating percentage rates
//! - The simulated clock and calendar-month stepping for billing cycles
//! - Strongly typed identifiers for insurers and contracts

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{ContractNumber, IdentifierError, InsurerId};
pub use money::{Amount, MoneyError, Rate};
pub use temporal::{add_months, SimClock, TemporalError, Timestamp};
