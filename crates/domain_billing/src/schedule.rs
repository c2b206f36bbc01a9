//! Premium schedules and the accrual step

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{add_months, Amount, Timestamp};

use crate::error::BillingError;

/// How often a premium falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    /// Returns the billing-cycle length in months
    pub fn months(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 1,
            PaymentFrequency::Quarterly => 3,
            PaymentFrequency::SemiAnnual => 6,
            PaymentFrequency::Annual => 12,
        }
    }

    /// Annualizes a per-cycle premium (`premium × 12 / months`, truncating)
    pub fn annualize(&self, premium: Amount) -> Amount {
        Amount::new(premium.value().saturating_mul(12) / i64::from(self.months()))
    }
}

/// The billing state of one contract
///
/// Owned exclusively by the contract it bills. The outstanding balance is
/// signed: an overpayment is retained as credit and shows up negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSchedule {
    premium: Amount,
    frequency: PaymentFrequency,
    next_due_at: Timestamp,
    outstanding_balance: Amount,
}

impl BillingSchedule {
    /// Creates a schedule with a zero opening balance
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NegativePremium` if the premium is negative.
    pub fn new(
        premium: Amount,
        frequency: PaymentFrequency,
        first_due_at: Timestamp,
    ) -> Result<Self, BillingError> {
        if premium.is_negative() {
            return Err(BillingError::NegativePremium);
        }
        Ok(Self {
            premium,
            frequency,
            next_due_at: first_due_at,
            outstanding_balance: Amount::ZERO,
        })
    }

    /// Returns the per-cycle premium
    pub fn premium(&self) -> Amount {
        self.premium
    }

    /// Returns the payment frequency
    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// Returns when the next premium falls due
    pub fn next_due_at(&self) -> Timestamp {
        self.next_due_at
    }

    /// Returns the current outstanding balance
    pub fn outstanding_balance(&self) -> Amount {
        self.outstanding_balance
    }

    /// Updates the per-cycle premium
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NegativePremium` if the premium is negative.
    pub fn set_premium(&mut self, premium: Amount) -> Result<(), BillingError> {
        if premium.is_negative() {
            return Err(BillingError::NegativePremium);
        }
        self.premium = premium;
        Ok(())
    }

    /// Updates the payment frequency
    ///
    /// Takes effect from the next accrual step; the next-due timestamp is
    /// left untouched.
    pub fn set_frequency(&mut self, frequency: PaymentFrequency) {
        self.frequency = frequency;
    }

    /// Charges every premium that has fallen due by `now`
    ///
    /// Adds one premium to the outstanding balance per elapsed billing cycle
    /// and steps the next-due timestamp forward by the cycle length each
    /// time. Idempotent once the next-due timestamp has passed `now`; the
    /// timestamp never regresses. Returns the number of cycles charged.
    pub fn accrue_due(&mut self, now: Timestamp) -> u32 {
        let mut cycles = 0;
        while self.next_due_at <= now {
            self.outstanding_balance += self.premium;
            self.next_due_at = add_months(self.next_due_at, self.frequency.months());
            cycles += 1;
        }
        if cycles > 0 {
            debug!(
                cycles,
                balance = %self.outstanding_balance,
                next_due = %self.next_due_at,
                "accrued premiums"
            );
        }
        cycles
    }

    /// Applies a received payment, debiting the outstanding balance
    ///
    /// The balance may go negative; overpayment is retained as credit.
    pub fn apply_payment(&mut self, amount: Amount) {
        self.outstanding_balance -= amount;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn accrual_never_regresses_next_due(
            premium in 0i64..10_000i64,
            elapsed_days in 0i64..1000i64
        ) {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut schedule = BillingSchedule::new(
                Amount::new(premium),
                PaymentFrequency::Monthly,
                start,
            ).unwrap();

            let now = start + Duration::days(elapsed_days);
            schedule.accrue_due(now);

            prop_assert!(schedule.next_due_at() > now);
            prop_assert!(schedule.next_due_at() >= start);
        }

        #[test]
        fn accrued_balance_matches_cycle_count(
            premium in 0i64..10_000i64,
            elapsed_days in 0i64..1000i64
        ) {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut schedule = BillingSchedule::new(
                Amount::new(premium),
                PaymentFrequency::Quarterly,
                start,
            ).unwrap();

            let cycles = schedule.accrue_due(start + Duration::days(elapsed_days));
            prop_assert_eq!(
                schedule.outstanding_balance(),
                Amount::new(premium).saturating_mul(i64::from(cycles))
            );
        }
    }
}
