//! Local mobile number captured for a verification attempt.

use rj_shared::phone::{is_valid_local_phone, mask_phone_number, with_country_code};
use serde::Serialize;

use crate::errors::ValidationFailure;

/// Exactly ten ASCII digits, no country code.
///
/// The country code is a presentation constant and is only attached when the
/// number is handed to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse user input; anything other than ten digits is rejected as-is
    pub fn parse(raw: &str) -> Result<Self, ValidationFailure> {
        if is_valid_local_phone(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationFailure::InvalidPhoneFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs and status views
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }

    /// E.164 form, e.g. `+919876543210`
    pub fn with_country_code(&self, country_code: &str) -> String {
        with_country_code(country_code, &self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = ValidationFailure;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
