//! Pre-validated fixture values
//!
//! The identifier fixtures are structurally valid birth numbers and
//! registration numbers, so `NationalId` construction in tests can never
//! fail for the wrong reason.

use chrono::{TimeZone, Utc};

use core_kernel::{Amount, ContractNumber, Timestamp};
use domain_contract::Vehicle;
use domain_party::NationalId;

/// Identifier fixtures
pub struct IdFixtures;

impl IdFixtures {
    /// A natural person (10-digit birth number with valid check digit)
    pub fn natural_person() -> NationalId {
        NationalId::new("8004175146").expect("fixture id is valid")
    }

    /// A second, distinct natural person
    pub fn second_natural_person() -> NationalId {
        NationalId::new("8054176383").expect("fixture id is valid")
    }

    /// A third, distinct natural person
    pub fn third_natural_person() -> NationalId {
        NationalId::new("8351068242").expect("fixture id is valid")
    }

    /// A natural person with a pre-1954 nine-digit birth number
    pub fn vintage_natural_person() -> NationalId {
        NationalId::new("530101123").expect("fixture id is valid")
    }

    /// A legal entity (8-digit registration number)
    pub fn legal_entity() -> NationalId {
        NationalId::new("12345678").expect("fixture id is valid")
    }

    /// A second, distinct legal entity (6-digit registration number)
    pub fn second_legal_entity() -> NationalId {
        NationalId::new("654321").expect("fixture id is valid")
    }

    /// A contract number from a short label
    pub fn contract_number(label: &str) -> ContractNumber {
        ContractNumber::new(label).expect("fixture contract number is non-empty")
    }
}

/// Timestamp fixtures
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The canonical portfolio opening instant
    pub fn opening() -> Timestamp {
        Self::at(2024, 1, 1)
    }

    /// Midnight UTC on the given date
    pub fn at(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("fixture date is valid")
    }
}

/// Vehicle fixtures
pub struct VehicleFixtures;

impl VehicleFixtures {
    /// The standard test vehicle: plate ABC1234, value 10 000
    pub fn standard() -> Vehicle {
        Self::with_value("ABC1234", 10_000)
    }

    /// A vehicle with the given plate and original value
    pub fn with_value(plate: &str, value: i64) -> Vehicle {
        Vehicle::new(plate, Amount::new(value)).expect("fixture vehicle is valid")
    }
}
