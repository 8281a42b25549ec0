//! Name and email collected from a rider who has no account yet.

use rj_shared::validation::{validators, FieldErrors};
use serde::{Deserialize, Serialize};

/// Minimum number of characters in a rider name
pub const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
}

impl ProfileDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check both fields independently and report every failure at once
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if !validators::not_empty(name) {
            errors.add("name", "Name is required");
        } else if !validators::min_chars(name, MIN_NAME_CHARS) {
            errors.add("name", "Name must be at least 2 characters");
        }

        let email = self.email.trim();
        if !validators::not_empty(email) {
            errors.add("email", "Email is required");
        } else if !validators::is_valid_email(email) {
            errors.add("email", "Please enter a valid email");
        }

        errors.into_result()
    }
}
