//! Short code generation and validation utilities.
//!
//! Generated codes are random base62 strings; custom aliases are checked
//! against a small rule set before they become short codes.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 8;

const ALIAS_MIN_LEN: usize = 3;
const ALIAS_MAX_LEN: usize = 32;

/// Codes that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &["api", "health", "analytics", "admin"];

/// Generates a random base62 short code of [`CODE_LENGTH`] characters.
///
/// 62^8 possible codes; collisions are still possible and are resolved by
/// the caller retrying on [`AppError::Conflict`].
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < ALIAS_MIN_LEN || code.len() > ALIAS_MAX_LEN {
        return Err(AppError::bad_request(
            "Custom alias must be 3-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom alias cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code.to_ascii_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_base62_characters() {
        let code = generate_code();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_accepts_typical_aliases() {
        assert!(validate_custom_code("promo").is_ok());
        assert!(validate_custom_code("Summer-Sale_2024").is_ok());
        assert!(validate_custom_code("abc").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = validate_custom_code("ab").unwrap_err();
        assert!(err.to_string().contains("3-32 characters"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_custom_code(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("promo/2024").is_err());
        assert!(validate_custom_code("café").is_err());
    }

    #[test]
    fn test_validate_hyphen_edges() {
        let err = validate_custom_code("-promo").unwrap_err();
        assert!(err.to_string().contains("cannot start or end"));
        assert!(validate_custom_code("promo-").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
        assert!(validate_custom_code("API").is_err());
    }
}
