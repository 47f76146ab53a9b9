//! Swedish personal identity / organisation number.
//!
//! Buyers type these in many shapes: `19800101-1234`, `800101 1234`,
//! `556036-0793`. Everything normalizes to the 10-digit `NNNNNN-NNNN` form
//! Billogram stores in its `org_no` field.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const DIGITS: usize = 10;
const CENTURY_PREFIX: usize = 2;
const SPLIT_AT: usize = 6;

/// Normalized identification number, always `NNNNNN-NNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Normalizes raw buyer input.
    ///
    /// Non-digits are stripped. A residue longer than 10 digits loses its
    /// first two characters (the century). Exactly 10 digits must remain.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` for any other digit count.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        let digits = if digits.len() > DIGITS {
            &digits[CENTURY_PREFIX..]
        } else {
            digits.as_str()
        };

        if digits.len() != DIGITS {
            return Err(ValidationError::invalid_format(
                "org_no",
                format!("expected {} digits, got {}", DIGITS, digits.len()),
            ));
        }

        let (date_part, serial) = digits.split_at(SPLIT_AT);
        Ok(Self(format!("{}-{}", date_part, serial)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NationalId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> Self {
        id.0
    }
}
