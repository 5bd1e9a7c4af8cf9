//! Field validation rules

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)] // pattern literals are compile-time constants
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

#[allow(clippy::expect_used)] // pattern literals are compile-time constants
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 /\-()]{5,19}$").expect("valid phone pattern"));

#[allow(clippy::expect_used)] // pattern literals are compile-time constants
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("valid postal code pattern"));

/// Require a non-blank value.
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// Validate an email address.
pub fn validate_email(value: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err("email is not a valid address".to_string());
    }
    Ok(())
}

/// Validate a phone number (digits with common separators, optional +).
pub fn validate_phone(value: &str) -> Result<(), String> {
    if !PHONE_RE.is_match(value.trim()) {
        return Err("phone is not a valid number".to_string());
    }
    Ok(())
}

/// Validate a five-digit postal code.
pub fn validate_postal_code(value: &str) -> Result<(), String> {
    if !POSTAL_CODE_RE.is_match(value.trim()) {
        return Err("postal code must be five digits".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("anna.schmidt@example.de").is_ok());
        assert!(validate_email("kunde+fiber@mail.example.com").is_ok());
    }

    #[test]
    fn rejects_bad_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.example.de").is_err());
        assert!(validate_email("x@y").is_err());
    }

    #[test]
    fn accepts_common_phone_formats() {
        assert!(validate_phone("+49 30 1234567").is_ok());
        assert!(validate_phone("030/1234567").is_ok());
        assert!(validate_phone("0151-2345678").is_ok());
    }

    #[test]
    fn rejects_bad_phone_numbers() {
        assert!(validate_phone("12").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn postal_code_is_five_digits() {
        assert!(validate_postal_code("10115").is_ok());
        assert!(validate_postal_code("1011").is_err());
        assert!(validate_postal_code("101155").is_err());
        assert!(validate_postal_code("1011a").is_err());
    }

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required("first name", "Anna").is_ok());
        assert!(validate_required("first name", "   ").is_err());
    }
}
