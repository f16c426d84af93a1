//! Text format checks backing the email and UUID rules

use regex::Regex;
use std::sync::OnceLock;

// ASCII word characters plus the RFC 5322 atext symbols, dot-separated;
// domain labels followed by a 2 to 6 letter TLD.
const EMAIL_PATTERN: &str = r"^[[:word:]!#$%&'*+/=?`{|}~^-]+(?:\.[[:word:]!#$%&'*+/=?`{|}~^-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,6}$";

const UUID_PATTERN: &str =
    r"^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

/// Whether `value` is an email address
pub fn is_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}

/// Whether `value` is a lower-case, hyphenated UUID of version 1 to 5
pub fn is_uuid(value: &str) -> bool {
    static UUID_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    UUID_REGEX
        .get_or_init(|| Regex::new(UUID_PATTERN).ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}
