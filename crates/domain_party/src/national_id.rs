//! National identifier classification
//!
//! Parties are classified from their national identifier alone:
//!
//! - **Birth number** (natural person): 9 or 10 digits encoding a birth date.
//!   The month carries a +50 offset for women. Nine-digit numbers were issued
//!   up to 1953; ten-digit numbers carry a final check digit making the
//!   alternating digit sum divisible by 11.
//! - **Registration number** (legal entity): exactly 6 or 8 digits.
//!
//! The two forms are disjoint by length, so every identifier maps to at most
//! one legal form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PartyError;

/// The legal form of a party, derived from its identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalForm {
    /// A natural person, identified by a birth number
    Natural,
    /// A legal entity, identified by a company registration number
    Legal,
}

/// Outcome of classifying an arbitrary identifier string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Natural,
    Legal,
    Invalid,
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn digit(value: &str, index: usize) -> i32 {
    (value.as_bytes()[index] - b'0') as i32
}

/// Returns true if the identifier is a structurally valid birth number
pub fn is_valid_birth_number(value: &str) -> bool {
    let length = value.len();
    if length != 9 && length != 10 {
        return false;
    }
    if !is_all_digits(value) {
        return false;
    }

    let year: i32 = value[0..2].parse().unwrap_or(-1);
    let mut month: u32 = value[2..4].parse().unwrap_or(0);
    let day: u32 = value[4..6].parse().unwrap_or(0);

    if !((1..=12).contains(&month) || (51..=62).contains(&month)) {
        return false;
    }
    if month > 50 {
        month -= 50;
    }

    let year = if length == 9 {
        if year > 53 {
            return false;
        }
        year + 1900
    } else {
        year + if year >= 54 { 1900 } else { 2000 }
    };

    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return false;
    }

    if length == 10 {
        let sum: i32 = (0..10)
            .map(|i| if i % 2 == 0 { digit(value, i) } else { -digit(value, i) })
            .sum();
        return sum % 11 == 0;
    }

    true
}

/// Returns true if the identifier is a structurally valid registration number
pub fn is_valid_registration_number(value: &str) -> bool {
    matches!(value.len(), 6 | 8) && is_all_digits(value)
}

/// Classifies an arbitrary identifier string
pub fn classify(value: &str) -> Classification {
    if is_valid_birth_number(value) {
        Classification::Natural
    } else if is_valid_registration_number(value) {
        Classification::Legal
    } else {
        Classification::Invalid
    }
}

/// A validated national identifier
///
/// Carries the legal form derived at construction. Two identifiers are equal
/// iff their string values are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId {
    value: String,
    form: LegalForm,
}

impl NationalId {
    /// Validates and classifies an identifier
    ///
    /// # Errors
    ///
    /// Returns `PartyError::InvalidIdentifier` if the string is neither a
    /// valid birth number nor a valid registration number.
    pub fn new(value: impl Into<String>) -> Result<Self, PartyError> {
        let value = value.into();
        let form = match classify(&value) {
            Classification::Natural => LegalForm::Natural,
            Classification::Legal => LegalForm::Legal,
            Classification::Invalid => return Err(PartyError::InvalidIdentifier(value)),
        };
        Ok(Self { value, form })
    }

    /// Returns the identifier string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the legal form derived from the identifier
    pub fn legal_form(&self) -> LegalForm {
        self.form
    }

    /// Returns true for a natural person's birth number
    pub fn is_natural(&self) -> bool {
        self.form == LegalForm::Natural
    }

    /// Returns true for a legal entity's registration number
    pub fn is_legal(&self) -> bool {
        self.form == LegalForm::Legal
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for NationalId {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NationalId {
    type Error = PartyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> String {
        id.value
    }
}
