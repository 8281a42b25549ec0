//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a local mobile number
pub const LOCAL_PHONE_LENGTH: usize = 10;

// Local mobile number: exactly ten digits, no country code
static LOCAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10}$").unwrap()
});

/// Strip everything except ASCII digits
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is a valid local number (exactly ten digits, nothing else)
pub fn is_valid_local_phone(phone: &str) -> bool {
    LOCAL_PHONE_REGEX.is_match(phone)
}

/// Prefix a local number with a country code for SMS delivery, e.g. `+919876543210`
pub fn with_country_code(country_code: &str, phone: &str) -> String {
    let code = country_code.trim().trim_start_matches('+');
    format!("+{}{}", code, phone)
}

/// Mask a phone number for display and logs (e.g., 987****210)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() >= 7 {
        format!("{}****{}", &digits[0..3], &digits[digits.len() - 3..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("98765-43210"), "9876543210");
        assert_eq!(digits_only("+91 98765 43210"), "919876543210");
    }

    #[test]
    fn test_is_valid_local_phone() {
        assert!(is_valid_local_phone("9876543210"));
        assert!(is_valid_local_phone("0000000000"));
        assert!(!is_valid_local_phone("987654321"));    // Too short
        assert!(!is_valid_local_phone("98765432101"));  // Too long
        assert!(!is_valid_local_phone("98765a3210"));   // Letter
        assert!(!is_valid_local_phone("+919876543210")); // Country code
        assert!(!is_valid_local_phone(" 9876543210"));  // Whitespace
        assert!(!is_valid_local_phone("９８７６５４３２１０")); // Full-width digits
    }

    #[test]
    fn test_with_country_code() {
        assert_eq!(with_country_code("+91", "9876543210"), "+919876543210");
        assert_eq!(with_country_code("91", "9876543210"), "+919876543210");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("9876543210"), "987****210");
        assert_eq!(mask_phone_number("+919876543210"), "919****210");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
