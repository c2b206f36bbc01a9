//! Party Domain - identifier classification and contract parties
//!
//! A party is anyone who can hold a contract, be insured under one, or
//! receive a claim payout. Parties are classified as natural persons or
//! legal entities purely from their national identifier: a birth number
//! marks a natural person, a company registration number a legal entity.
//! The identifier is validated once, at construction, and is immutable
//! afterwards.

pub mod error;
pub mod national_id;
pub mod party;

pub use error::PartyError;
pub use national_id::{classify, Classification, LegalForm, NationalId};
pub use party::Party;
