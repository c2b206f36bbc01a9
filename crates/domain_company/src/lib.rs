//! Company Domain - the contract registry and everything that moves money
//!
//! The [`InsuranceCompany`] is the single owner of all state: the contracts
//! it issued, the party directory, the payment ledger, and the simulated
//! clock. Contracts reference their insurer by identifier only; there is no
//! sharing between insurers.
//!
//! The flow through a portfolio's life:
//!
//! 1. the registry issues a contract and charges the first premium,
//! 2. the clock is advanced and the accrual loop charges premiums that fell
//!    due,
//! 3. incoming payments are distributed by the [`PaymentAllocator`] - across
//!    a master contract's children when needed - and recorded in the ledger,
//! 4. a claim pays out to a party and may deactivate the contract.
//!
//! Every operation validates before it mutates, so a returned
//! [`CompanyError`] implies the registry is unchanged.

pub mod allocator;
pub mod company;
pub mod error;
pub mod snapshot;

pub use allocator::PaymentAllocator;
pub use company::InsuranceCompany;
pub use error::{CompanyError, ErrorKind};
pub use snapshot::{BillingState, ContractSnapshot, PortfolioSnapshot};
