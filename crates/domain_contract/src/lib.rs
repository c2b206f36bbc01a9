//! Contract Domain - insured assets and the contract hierarchy
//!
//! Contracts come in three shapes sharing one common record:
//!
//! - [`SingleVehicleContract`] insures one vehicle and bills through its own
//!   schedule.
//! - [`MasterVehicleContract`] groups single-vehicle contracts for a legal
//!   entity. It carries no schedule and no coverage of its own; its activity
//!   is derived from its children.
//! - [`TravelContract`] insures a set of natural persons and bills through
//!   its own schedule.
//!
//! The [`Contract`] enum is the tagged union the registry stores; behavioural
//! differences between the shapes are dispatched by pattern matching. A
//! contract's identity is the `(contract number, insurer)` pair, so numbers
//! only need to be unique within one insurer's registry.

pub mod contract;
pub mod error;
pub mod vehicle;

pub use contract::{
    Contract, ContractKind, ContractTerms, MasterVehicleContract, SingleVehicleContract,
    TravelContract,
};
pub use error::ContractError;
pub use vehicle::Vehicle;
