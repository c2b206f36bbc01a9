//! Test data builders
//!
//! Builder patterns for billing schedules and single-vehicle contracts with
//! sensible defaults; tests override only the fields they assert on.

use core_kernel::{Amount, ContractNumber, InsurerId, Timestamp};
use domain_billing::{BillingSchedule, PaymentFrequency};
use domain_contract::{SingleVehicleContract, Vehicle};
use domain_party::NationalId;

use crate::fixtures::{IdFixtures, TemporalFixtures, VehicleFixtures};

/// Builder for billing schedules
pub struct ScheduleBuilder {
    premium: Amount,
    frequency: PaymentFrequency,
    first_due_at: Timestamp,
    seeded_balance: Amount,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a builder with a monthly premium of 100 due at the opening
    pub fn new() -> Self {
        Self {
            premium: Amount::new(100),
            frequency: PaymentFrequency::Monthly,
            first_due_at: TemporalFixtures::opening(),
            seeded_balance: Amount::ZERO,
        }
    }

    /// Sets the per-cycle premium
    pub fn with_premium(mut self, premium: i64) -> Self {
        self.premium = Amount::new(premium);
        self
    }

    /// Sets the payment frequency
    pub fn with_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the first due instant
    pub fn with_first_due_at(mut self, first_due_at: Timestamp) -> Self {
        self.first_due_at = first_due_at;
        self
    }

    /// Seeds an opening outstanding balance (negative for credit)
    pub fn with_outstanding_balance(mut self, balance: i64) -> Self {
        self.seeded_balance = Amount::new(balance);
        self
    }

    /// Builds the schedule
    pub fn build(self) -> BillingSchedule {
        let mut schedule = BillingSchedule::new(self.premium, self.frequency, self.first_due_at)
            .expect("builder premium is non-negative");
        if !self.seeded_balance.is_zero() {
            schedule.apply_payment(-self.seeded_balance);
        }
        schedule
    }
}

/// Builder for single-vehicle contracts
pub struct SingleContractBuilder {
    number: ContractNumber,
    insurer: InsurerId,
    beneficiary: Option<NationalId>,
    policy_holder: NationalId,
    schedule: ScheduleBuilder,
    coverage: Amount,
    vehicle: Vehicle,
    active: bool,
}

impl SingleContractBuilder {
    /// Creates a builder for the given insurer with fixture defaults
    pub fn new(insurer: InsurerId, number: &str) -> Self {
        Self {
            number: IdFixtures::contract_number(number),
            insurer,
            beneficiary: None,
            policy_holder: IdFixtures::legal_entity(),
            schedule: ScheduleBuilder::new(),
            coverage: Amount::new(5_000),
            vehicle: VehicleFixtures::standard(),
            active: true,
        }
    }

    /// Sets the policy holder
    pub fn with_policy_holder(mut self, policy_holder: NationalId) -> Self {
        self.policy_holder = policy_holder;
        self
    }

    /// Sets the beneficiary
    pub fn with_beneficiary(mut self, beneficiary: NationalId) -> Self {
        self.beneficiary = Some(beneficiary);
        self
    }

    /// Configures the billing schedule
    pub fn with_schedule(mut self, schedule: ScheduleBuilder) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets the coverage amount
    pub fn with_coverage(mut self, coverage: i64) -> Self {
        self.coverage = Amount::new(coverage);
        self
    }

    /// Sets the insured vehicle
    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Builds the contract pre-deactivated
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Builds the contract
    pub fn build(self) -> SingleVehicleContract {
        let mut contract = SingleVehicleContract::new(
            self.number,
            self.insurer,
            self.beneficiary,
            self.policy_holder,
            self.schedule.build(),
            self.coverage,
            self.vehicle,
        )
        .expect("builder defaults are valid");
        if !self.active {
            contract.set_inactive();
        }
        contract
    }
}
