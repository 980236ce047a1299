//! Field validation for incoming records.
//!
//! Pure checks applied before any enrichment or storage happens. Rules run
//! in a fixed order and the first failure wins, so clients always see the
//! most fundamental problem first (missing field before short field).

use crate::config::ValidationConfig;
use crate::models::RawRecord;

/// Checks a raw record against the configured minimums.
///
/// Lengths are counted in Unicode scalars on the value as submitted,
/// before any trimming.
///
/// Returns `Err` with a human-readable, user-correctable reason.
pub fn validate(raw: &RawRecord, limits: &ValidationConfig) -> Result<(), String> {
    let name = match raw.name {
        Some(ref name) => name,
        None => return Err("Missing required field: name".to_string()),
    };

    let message = match raw.message {
        Some(ref message) => message,
        None => return Err("Missing required field: message".to_string()),
    };

    if name.chars().count() < limits.min_name_chars {
        return Err(format!(
            "Name must be at least {} characters",
            limits.min_name_chars
        ));
    }

    if message.chars().count() < limits.min_message_chars {
        return Err(format!(
            "Message must be at least {} characters",
            limits.min_message_chars
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: Option<&str>, message: Option<&str>) -> RawRecord {
        RawRecord {
            name: name.map(String::from),
            message: message.map(String::from),
            extra: serde_json::Map::new(),
        }
    }

    fn limits() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn test_valid_record() {
        assert!(validate(&raw(Some("ann"), Some("hello world")), &limits()).is_ok());
    }

    #[test]
    fn test_missing_name() {
        let err = validate(&raw(None, Some("hello world")), &limits()).unwrap_err();
        assert_eq!(err, "Missing required field: name");
    }

    #[test]
    fn test_missing_message() {
        let err = validate(&raw(Some("ann"), None), &limits()).unwrap_err();
        assert_eq!(err, "Missing required field: message");
    }

    #[test]
    fn test_missing_name_reported_before_missing_message() {
        let err = validate(&raw(None, None), &limits()).unwrap_err();
        assert_eq!(err, "Missing required field: name");
    }

    #[test]
    fn test_short_name_rejected_regardless_of_message() {
        let err = validate(&raw(Some("a"), Some("a perfectly fine message")), &limits())
            .unwrap_err();
        assert_eq!(err, "Name must be at least 2 characters");
    }

    #[test]
    fn test_short_message() {
        let err = validate(&raw(Some("bo"), Some("hi")), &limits()).unwrap_err();
        assert_eq!(err, "Message must be at least 5 characters");
    }

    #[test]
    fn test_short_name_reported_before_short_message() {
        let err = validate(&raw(Some("a"), Some("hi")), &limits()).unwrap_err();
        assert_eq!(err, "Name must be at least 2 characters");
    }

    #[test]
    fn test_lengths_counted_in_chars_not_bytes() {
        // Two chars, four bytes
        assert!(validate(&raw(Some("éé"), Some("héllo")), &limits()).is_ok());
    }

    #[test]
    fn test_configured_minimum_appears_in_reason() {
        let limits = ValidationConfig {
            min_name_chars: 4,
            min_message_chars: 5,
        };
        let err = validate(&raw(Some("ann"), Some("hello world")), &limits).unwrap_err();
        assert_eq!(err, "Name must be at least 4 characters");
    }
}
