//! Reusable field rules
//!
//! Numeric bounds are strict on both ends. String length bounds are
//! inclusive. The two conventions are separate contracts and stay that way.

use super::formats;
use super::rule::Rule;
use std::fmt::Display;

/// Rule: value is present
pub fn not_null<T: 'static>() -> Rule<Option<T>> {
    Rule::from_predicate(|value: &Option<T>| value.is_some(), "must not be null.")
}

/// Rule: value is strictly greater than `min`
pub fn greater_than<T>(min: T) -> Rule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let message = format!("must be greater than {}.", min);
    Rule::from_predicate(move |value: &T| *value > min, message)
}

/// Rule: value is strictly lower than `max`
pub fn lower_than<T>(max: T) -> Rule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let message = format!("must be lower than {}.", max);
    Rule::from_predicate(move |value: &T| *value < max, message)
}

/// Rule: `min < value < max`
pub fn int_between<T>(min: T, max: T) -> Rule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    greater_than(min).and(lower_than(max))
}

/// String rules
pub mod text {
    use super::*;

    /// Rule: string holds at least one non-whitespace character
    pub fn not_blank() -> Rule<str> {
        Rule::from_predicate(
            |value: &str| value.chars().any(|c| !c.is_whitespace()),
            "must not be empty.",
        )
    }

    /// Rule: string has at least `size` characters
    ///
    /// Length is counted in Unicode scalar values, so `"😀"` has length 1
    /// rather than its 2 UTF-16 code units.
    pub fn more_than(size: usize) -> Rule<str> {
        Rule::from_predicate(
            move |value: &str| value.chars().count() >= size,
            format!("must have more than {} chars.", size),
        )
    }

    /// Rule: string has at most `size` characters, counted as in [`more_than`]
    pub fn less_than(size: usize) -> Rule<str> {
        Rule::from_predicate(
            move |value: &str| value.chars().count() <= size,
            format!("must have less than {} chars.", size),
        )
    }

    /// Rule: `min <= length <= max`
    pub fn between(min: usize, max: usize) -> Rule<str> {
        more_than(min).and(less_than(max))
    }

    /// Rule: string contains `needle`
    pub fn contains(needle: impl Into<String>) -> Rule<str> {
        let needle = needle.into();
        let message = format!("must contain {}", needle);
        Rule::from_predicate(move |value: &str| value.contains(needle.as_str()), message)
    }

    /// Rule: string is an email address
    pub fn valid_email() -> Rule<str> {
        Rule::from_predicate(formats::is_email, "must be valid.")
    }

    /// Rule: string is a lower-case RFC 4122 UUID
    pub fn valid_uuid() -> Rule<str> {
        Rule::from_predicate(formats::is_uuid, "must be valid UUID.")
    }

    /// Same check as [`valid_uuid`], worded for identifiers passed in headers
    pub fn valid_uuid_on_header() -> Rule<str> {
        Rule::from_predicate(formats::is_uuid, "on the header must be valid UUID.")
    }
}

#[cfg(test)]
mod tests {
    use super::text::*;
    use super::*;

    // === not_null() ===

    #[test]
    fn test_not_null_rejects_none() {
        let rule = not_null::<i32>();
        assert_eq!(rule.evaluate(&None).message(), Some("must not be null."));
    }

    #[test]
    fn test_not_null_accepts_some() {
        assert!(not_null::<String>().evaluate(&Some(String::new())).is_valid());
    }

    // === greater_than() / lower_than() ===

    #[test]
    fn test_greater_than_is_strict() {
        let rule = greater_than(1);
        assert!(!rule.evaluate(&0).is_valid());
        assert!(!rule.evaluate(&1).is_valid());
        assert!(rule.evaluate(&2).is_valid());
    }

    #[test]
    fn test_greater_than_message() {
        assert_eq!(
            greater_than(1).evaluate(&1).message(),
            Some("must be greater than 1.")
        );
    }

    #[test]
    fn test_lower_than_is_strict() {
        let rule = lower_than(5);
        assert!(rule.evaluate(&4).is_valid());
        assert_eq!(rule.evaluate(&5).message(), Some("must be lower than 5."));
    }

    #[test]
    fn test_int_between_excludes_both_ends() {
        let rule = int_between(1, 5);
        assert!(!rule.evaluate(&1).is_valid());
        assert!(rule.evaluate(&2).is_valid());
        assert!(rule.evaluate(&4).is_valid());
        assert!(!rule.evaluate(&5).is_valid());
    }

    #[test]
    fn test_int_between_reports_lower_bound_first() {
        assert_eq!(
            int_between(10, 5).evaluate(&7).message(),
            Some("must be greater than 10.")
        );
    }

    #[test]
    fn test_numeric_rules_work_for_i64() {
        assert!(greater_than(10_i64).evaluate(&11).is_valid());
    }

    // === not_blank() ===

    #[test]
    fn test_not_blank_rejects_empty_and_whitespace() {
        let rule = not_blank();
        assert_eq!(rule.evaluate("").message(), Some("must not be empty."));
        assert!(!rule.evaluate("   \t\n").is_valid());
    }

    #[test]
    fn test_not_blank_accepts_text() {
        assert!(not_blank().evaluate(" ok ").is_valid());
    }

    #[test]
    fn test_not_blank_required_rejects_none() {
        let rule = not_blank().required::<String>();
        assert_eq!(rule.evaluate(&None).message(), Some("must not be empty."));
    }

    // === more_than() / less_than() ===

    #[test]
    fn test_more_than_is_inclusive() {
        let rule = more_than(3);
        assert!(rule.evaluate("abc").is_valid());
        assert_eq!(
            rule.evaluate("ab").message(),
            Some("must have more than 3 chars.")
        );
    }

    #[test]
    fn test_less_than_is_inclusive() {
        let rule = less_than(3);
        assert!(rule.evaluate("abc").is_valid());
        assert_eq!(
            rule.evaluate("abcd").message(),
            Some("must have less than 3 chars.")
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(less_than(3).evaluate("éàü").is_valid());
    }

    #[test]
    fn test_between_includes_both_ends() {
        let rule = between(2, 4);
        assert!(rule.evaluate("ab").is_valid());
        assert!(rule.evaluate("abcd").is_valid());
        assert!(!rule.evaluate("a").is_valid());
        assert!(!rule.evaluate("abcde").is_valid());
    }

    // === contains() ===

    #[test]
    fn test_contains() {
        let rule = contains("@");
        assert!(rule.evaluate("a@b").is_valid());
        assert_eq!(rule.evaluate("ab").message(), Some("must contain @"));
    }

    // === format rules ===

    #[test]
    fn test_valid_email_passes_on_match() {
        assert!(valid_email().evaluate("john.doe@example.com").is_valid());
    }

    #[test]
    fn test_valid_email_fails_on_mismatch() {
        assert_eq!(
            valid_email().evaluate("john.doe").message(),
            Some("must be valid.")
        );
    }

    #[test]
    fn test_valid_email_required_rejects_none() {
        assert!(!valid_email().required::<String>().evaluate(&None).is_valid());
    }

    #[test]
    fn test_valid_uuid() {
        let rule = valid_uuid();
        assert!(rule.evaluate("123e4567-e89b-12d3-a456-426614174000").is_valid());
        assert_eq!(rule.evaluate("nope").message(), Some("must be valid UUID."));
    }

    #[test]
    fn test_valid_uuid_on_header_message() {
        assert_eq!(
            valid_uuid_on_header().evaluate("nope").message(),
            Some("on the header must be valid UUID.")
        );
    }
}
