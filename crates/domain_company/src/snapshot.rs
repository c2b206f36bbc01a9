//! Read-only portfolio snapshots
//!
//! A snapshot is a plain serializable copy of the registry's observable
//! state, for reporting or UI layers: every contract with its billing state
//! and payment history, masters with their children nested. Capturing a
//! snapshot never mutates the registry.

use serde::Serialize;

use core_kernel::{Amount, ContractNumber, Timestamp};
use domain_billing::{BillingSchedule, PaymentFrequency, PaymentLedger, PaymentRecord};
use domain_contract::{Contract, ContractKind, SingleVehicleContract};

/// Billing state of one contract at capture time
#[derive(Debug, Clone, Serialize)]
pub struct BillingState {
    pub premium: Amount,
    pub frequency: PaymentFrequency,
    pub next_due_at: Timestamp,
    pub outstanding_balance: Amount,
}

impl BillingState {
    fn of(schedule: &BillingSchedule) -> Self {
        Self {
            premium: schedule.premium(),
            frequency: schedule.frequency(),
            next_due_at: schedule.next_due_at(),
            outstanding_balance: schedule.outstanding_balance(),
        }
    }
}

/// One contract as seen by a reporting layer
#[derive(Debug, Clone, Serialize)]
pub struct ContractSnapshot {
    pub number: ContractNumber,
    pub kind: ContractKind,
    pub policy_holder: String,
    pub coverage_amount: Amount,
    pub active: bool,
    /// Absent for master contracts, which carry no schedule of their own
    pub billing: Option<BillingState>,
    /// Child contracts of a master, in insertion order; empty for leaves
    pub children: Vec<ContractSnapshot>,
    /// Payment history, oldest first
    pub payments: Vec<PaymentRecord>,
}

impl ContractSnapshot {
    fn of(contract: &Contract, ledger: &PaymentLedger) -> Self {
        let children = contract
            .as_master()
            .map(|master| {
                master
                    .children()
                    .iter()
                    .map(|child| Self::of_child(child, ledger))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            number: contract.number().clone(),
            kind: contract.kind(),
            policy_holder: contract.policy_holder().to_string(),
            coverage_amount: contract.coverage_amount(),
            active: contract.is_active(),
            billing: contract.schedule().map(BillingState::of),
            children,
            payments: ledger.history(contract.number()).to_vec(),
        }
    }

    fn of_child(child: &SingleVehicleContract, ledger: &PaymentLedger) -> Self {
        Self {
            number: child.number().clone(),
            kind: ContractKind::SingleVehicle,
            policy_holder: child.terms().policy_holder().to_string(),
            coverage_amount: child.terms().coverage_amount(),
            active: child.is_active(),
            billing: Some(BillingState::of(child.schedule())),
            children: Vec::new(),
            payments: ledger.history(child.number()).to_vec(),
        }
    }
}

/// The whole portfolio at one instant
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSnapshot {
    /// The simulated instant the snapshot was taken at
    pub taken_at: Timestamp,
    /// Top-level contracts in issuance order
    pub contracts: Vec<ContractSnapshot>,
}

impl PortfolioSnapshot {
    pub(crate) fn capture(
        taken_at: Timestamp,
        contracts: &[Contract],
        ledger: &PaymentLedger,
    ) -> Self {
        Self {
            taken_at,
            contracts: contracts
                .iter()
                .map(|c| ContractSnapshot::of(c, ledger))
                .collect(),
        }
    }
}
