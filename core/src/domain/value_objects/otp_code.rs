//! One-time passcode as typed by the user.

use std::fmt;

use crate::errors::ValidationFailure;

/// Fixed-length digit sequence; never persisted and never logged
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Accepts only `expected_len` ASCII digits
    pub fn parse(raw: &str, expected_len: usize) -> Result<Self, ValidationFailure> {
        let complete = raw.len() == expected_len && raw.chars().all(|c| c.is_ascii_digit());
        if complete {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationFailure::IncompleteCode {
                expected: expected_len,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpCode({})", "*".repeat(self.0.len()))
    }
}
