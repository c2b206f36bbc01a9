//! Insured vehicle facts
//!
//! Immutable once constructed; the original value anchors both the premium
//! floor at issuance and the write-off threshold on a claim.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use core_kernel::Amount;

use crate::error::ContractError;

/// An insurable vehicle
///
/// Two vehicles are equal iff their license plates are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    license_plate: String,
    original_value: Amount,
}

impl Vehicle {
    /// Creates a vehicle
    ///
    /// # Errors
    ///
    /// - `ContractError::InvalidLicensePlate` unless the plate is exactly
    ///   7 characters from `[A-Z0-9]`
    /// - `ContractError::NonPositiveVehicleValue` unless the value is positive
    pub fn new(license_plate: impl Into<String>, original_value: Amount) -> Result<Self, ContractError> {
        let license_plate = license_plate.into();
        let well_formed = license_plate.len() == 7
            && license_plate
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !well_formed {
            return Err(ContractError::InvalidLicensePlate(license_plate));
        }
        if !original_value.is_positive() {
            return Err(ContractError::NonPositiveVehicleValue);
        }
        Ok(Self {
            license_plate,
            original_value,
        })
    }

    /// Returns the license plate
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Returns the vehicle's original value
    pub fn original_value(&self) -> Amount {
        self.original_value
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.license_plate == other.license_plate
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.license_plate.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plates() {
        assert!(Vehicle::new("ABC1234", Amount::new(10000)).is_ok());
        assert!(Vehicle::new("0000000", Amount::new(1)).is_ok());
    }

    #[test]
    fn test_plate_shape_is_enforced() {
        for plate in ["", "ABC123", "ABC12345", "abc1234", "ABC 234", "ÁBC1234"] {
            assert!(
                matches!(
                    Vehicle::new(plate, Amount::new(10000)),
                    Err(ContractError::InvalidLicensePlate(_))
                ),
                "{plate:?}"
            );
        }
    }

    #[test]
    fn test_value_must_be_positive() {
        assert_eq!(
            Vehicle::new("ABC1234", Amount::ZERO),
            Err(ContractError::NonPositiveVehicleValue)
        );
        assert_eq!(
            Vehicle::new("ABC1234", Amount::new(-5)),
            Err(ContractError::NonPositiveVehicleValue)
        );
    }

    #[test]
    fn test_equality_is_by_plate() {
        let a = Vehicle::new("ABC1234", Amount::new(10000)).unwrap();
        let b = Vehicle::new("ABC1234", Amount::new(99999)).unwrap();
        assert_eq!(a, b);
    }
}
