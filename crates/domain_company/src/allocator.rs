//! Payment allocation
//!
//! One incoming payment lands on one contract. For a leaf contract the whole
//! amount debits that contract's balance. For a master contract the amount is
//! fanned out across the children in insertion order, in two phases:
//!
//! 1. **Debt phase** - zero out positive child balances, oldest child first,
//!    until funds run out.
//! 2. **Advance-credit phase** - sweep the children repeatedly, debiting up
//!    to one premium per child per sweep, until funds run out or a full sweep
//!    applies nothing.
//!
//! Inactive children are skipped throughout, and so are zero-premium children
//! in the credit phase (a sweep that only meets those would otherwise never
//! terminate). Whatever the internal distribution, exactly one record with
//! the original requested amount is appended to the ledger.

use std::cmp::min;

use tracing::debug;

use core_kernel::{Amount, ContractNumber, InsurerId, Timestamp};
use domain_billing::{PaymentLedger, PaymentRecord};
use domain_contract::{Contract, MasterVehicleContract};

use crate::error::CompanyError;

/// Applies incoming payments to contracts and records them
///
/// The allocator only accepts contracts issued by the insurer it was created
/// for; it owns the payment ledger those payments are recorded in.
#[derive(Debug)]
pub struct PaymentAllocator {
    insurer: InsurerId,
    ledger: PaymentLedger,
}

impl PaymentAllocator {
    /// Creates an allocator for one insurer with an empty ledger
    pub fn new(insurer: InsurerId) -> Self {
        Self {
            insurer,
            ledger: PaymentLedger::new(),
        }
    }

    /// Returns the payment ledger
    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    /// Returns a contract's payment history, oldest first
    pub fn history(&self, number: &ContractNumber) -> &[PaymentRecord] {
        self.ledger.history(number)
    }

    /// Applies a payment to a contract
    ///
    /// All checks run before any balance moves: the amount must be positive,
    /// the contract must belong to this insurer and be active, and a master
    /// contract must have at least one child.
    ///
    /// # Errors
    ///
    /// - `CompanyError::NonPositiveAmount`
    /// - `CompanyError::WrongInsurer`
    /// - `CompanyError::ContractInactive`
    /// - `CompanyError::NoChildContracts`
    pub fn pay(
        &mut self,
        contract: &mut Contract,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), CompanyError> {
        if !amount.is_positive() {
            return Err(CompanyError::NonPositiveAmount);
        }
        if contract.insurer() != self.insurer {
            return Err(CompanyError::WrongInsurer(contract.number().clone()));
        }
        if !contract.is_active() {
            return Err(CompanyError::ContractInactive(contract.number().clone()));
        }

        match contract {
            Contract::MasterVehicle(master) => {
                if master.children().is_empty() {
                    return Err(CompanyError::NoChildContracts(master.number().clone()));
                }
                distribute(master, amount);
            }
            Contract::SingleVehicle(single) => single.schedule_mut().apply_payment(amount),
            Contract::Travel(travel) => travel.schedule_mut().apply_payment(amount),
        }

        debug!(number = %contract.number(), %amount, "payment applied");
        self.ledger.record(contract.number().clone(), now, amount);
        Ok(())
    }
}

/// Fans a payment out across a master contract's children
fn distribute(master: &mut MasterVehicleContract, amount: Amount) {
    let remaining = settle_outstanding(master, amount);
    sweep_advance_credit(master, remaining);
}

/// Debt phase: clears positive child balances in insertion order
fn settle_outstanding(master: &mut MasterVehicleContract, mut remaining: Amount) -> Amount {
    for child in master.children_mut() {
        if remaining.is_zero() {
            break;
        }
        if !child.is_active() {
            continue;
        }
        let owed = child.schedule().outstanding_balance();
        if owed.is_positive() {
            let applied = min(owed, remaining);
            child.schedule_mut().apply_payment(applied);
            remaining -= applied;
        }
    }
    remaining
}

/// Advance-credit phase: repeated sweeps of up to one premium per child
fn sweep_advance_credit(master: &mut MasterVehicleContract, mut remaining: Amount) {
    while remaining.is_positive() {
        let mut applied_any = false;
        for child in master.children_mut() {
            if !child.is_active() {
                continue;
            }
            let premium = child.schedule().premium();
            if !premium.is_positive() {
                continue;
            }
            let applied = min(premium, remaining);
            child.schedule_mut().apply_payment(applied);
            remaining -= applied;
            applied_any = true;
            if remaining.is_zero() {
                break;
            }
        }
        if !applied_any {
            break;
        }
    }
}
