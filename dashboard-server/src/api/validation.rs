use once_cell::sync::Lazy;
use regex::Regex;

use super::ApiError;
use crate::db::PageRequest;

/// Pragmatic address check: one `@`, no whitespace, a dotted domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Failed to compile email regex")
});

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid email address: {}", email)))
    }
}

pub fn validate_page(page: &PageRequest) -> Result<(), ApiError> {
    page.validate().map_err(ApiError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        for email in ["a@x.com", "first.last+tag@sub.example.org", "u1@example.com"] {
            assert!(validate_email(email).is_ok(), "{} should be valid", email);
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for email in ["", "plain", "a@x", "@x.com", "a@@x.com", "a b@x.com"] {
            assert!(validate_email(email).is_err(), "{} should be invalid", email);
        }
    }

    #[test]
    fn test_page_bounds_map_to_validation_error() {
        assert!(validate_page(&PageRequest::new(1, 10)).is_ok());
        assert!(matches!(
            validate_page(&PageRequest::new(0, 10)),
            Err(ApiError::Validation(_))
        ));
    }
}
