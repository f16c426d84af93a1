//! Validation outcomes and composable rules
//!
//! A [`Rule`] is a pure check over a value of type `K` that reports a
//! [`ValidationResult`]. Rules compose with [`Rule::and`], which evaluates
//! left to right and stops at the first failure.

use crate::core::error::FieldValidationError;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value passed the check
    Valid,

    /// The value failed the check, with a human-readable reason
    Invalid(String),
}

impl ValidationResult {
    /// A passing result
    pub fn ok() -> Self {
        ValidationResult::Valid
    }

    /// A failing result with the given message
    pub fn fail(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The failure message, present only when the result is invalid
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }

    /// Turn this result into an observable failure for `field`
    ///
    /// Does nothing for a valid result. An invalid result becomes a
    /// [`FieldValidationError`] whose display text is `"{field}: {message}"`.
    /// Callers chain these with `?` so the first failing field aborts the rest.
    pub fn ensure_valid(self, field: &str) -> Result<(), FieldValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(message) => {
                tracing::debug!(field = %field, "field check rejected value");
                Err(FieldValidationError::new(field, message))
            }
        }
    }
}

type Check<K> = dyn Fn(&K) -> ValidationResult + Send + Sync;

/// A named, pure check over values of type `K`
///
/// Rules are immutable once built and cheap to clone; the check itself is
/// shared behind an `Arc`. Every rule carries the message it reports first,
/// which is also what [`Rule::required`] reports for an absent value.
pub struct Rule<K: ?Sized> {
    message: Arc<str>,
    check: Arc<Check<K>>,
}

impl<K: ?Sized> Clone for Rule<K> {
    fn clone(&self) -> Self {
        Self {
            message: Arc::clone(&self.message),
            check: Arc::clone(&self.check),
        }
    }
}

impl<K: ?Sized> fmt::Debug for Rule<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<K: ?Sized + 'static> Rule<K> {
    /// Build a rule from an arbitrary check
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&K) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            message: Arc::from(message.into()),
            check: Arc::new(check),
        }
    }

    /// Build a rule that passes when `predicate` holds and fails with `message` otherwise
    pub fn from_predicate<P>(predicate: P, message: impl Into<String>) -> Self
    where
        P: Fn(&K) -> bool + Send + Sync + 'static,
    {
        let message: Arc<str> = Arc::from(message.into());
        let on_error = Arc::clone(&message);
        Self {
            message,
            check: Arc::new(move |value: &K| {
                if predicate(value) {
                    ValidationResult::ok()
                } else {
                    ValidationResult::fail(on_error.to_string())
                }
            }),
        }
    }

    /// The message this rule reports on its first failing step
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn evaluate(&self, value: &K) -> ValidationResult {
        (self.check)(value)
    }

    /// Both rules must pass; `other` is not evaluated when `self` fails
    pub fn and(self, other: Rule<K>) -> Rule<K> {
        let first = self.check;
        let second = other.check;
        Self {
            message: self.message,
            check: Arc::new(move |value: &K| {
                let result = first(value);
                if !result.is_valid() {
                    return result;
                }
                second(value)
            }),
        }
    }

    /// Lift this rule over an optional value
    ///
    /// A present value is checked as-is. An absent value fails with this
    /// rule's message.
    pub fn required<T>(self) -> Rule<Option<T>>
    where
        T: Borrow<K> + 'static,
    {
        let absent = Arc::clone(&self.message);
        let check = self.check;
        Rule {
            message: self.message,
            check: Arc::new(move |value: &Option<T>| match value {
                Some(inner) => check(<T as Borrow<K>>::borrow(inner)),
                None => ValidationResult::fail(absent.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spy(calls: Arc<AtomicUsize>) -> Rule<i32> {
        Rule::new("spy", move |_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            ValidationResult::ok()
        })
    }

    #[test]
    fn test_result_message_present_only_when_invalid() {
        assert_eq!(ValidationResult::ok().message(), None);
        assert_eq!(ValidationResult::fail("nope").message(), Some("nope"));
        assert!(ValidationResult::ok().is_valid());
        assert!(!ValidationResult::fail("nope").is_valid());
    }

    #[test]
    fn test_ensure_valid_is_noop_for_valid_result() {
        assert!(ValidationResult::ok().ensure_valid("header").is_ok());
    }

    #[test]
    fn test_ensure_valid_prefixes_field_label() {
        let err = ValidationResult::fail("must not be empty.")
            .ensure_valid("header")
            .unwrap_err();
        assert_eq!(err.field(), "header");
        assert_eq!(err.reason(), "must not be empty.");
        assert_eq!(err.to_string(), "header: must not be empty.");
    }

    #[test]
    fn test_from_predicate_reports_message() {
        let rule = Rule::from_predicate(|v: &i32| *v % 2 == 0, "must be even.");
        assert!(rule.evaluate(&4).is_valid());
        assert_eq!(rule.evaluate(&3).message(), Some("must be even."));
    }

    #[test]
    fn test_and_skips_right_side_when_left_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let failing = Rule::from_predicate(|_: &i32| false, "left failed");
        let combined = failing.and(spy(Arc::clone(&calls)));

        let result = combined.evaluate(&10);
        assert_eq!(result.message(), Some("left failed"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_and_runs_right_side_when_left_passes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let passing = Rule::from_predicate(|_: &i32| true, "unused");
        let combined = passing.and(spy(Arc::clone(&calls)));

        assert!(combined.evaluate(&10).is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_and_reports_right_failure() {
        let combined = Rule::from_predicate(|v: &i32| *v > 0, "must be positive.")
            .and(Rule::from_predicate(|v: &i32| *v < 10, "must be small."));
        assert_eq!(combined.evaluate(&12).message(), Some("must be small."));
        assert_eq!(combined.evaluate(&-1).message(), Some("must be positive."));
    }

    #[test]
    fn test_and_chain_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Rule::from_predicate(|_: &i32| true, "a")
            .and(Rule::from_predicate(|_: &i32| false, "b"))
            .and(spy(Arc::clone(&calls)));

        assert_eq!(chain.evaluate(&0).message(), Some("b"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_required_fails_absent_value_with_own_message() {
        let rule = Rule::from_predicate(|s: &str| !s.is_empty(), "must not be empty.")
            .required::<String>();
        assert_eq!(rule.evaluate(&None).message(), Some("must not be empty."));
        assert!(rule.evaluate(&Some("x".to_string())).is_valid());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let rule = Rule::from_predicate(|v: &i32| *v > 1, "must be greater than 1.");
        assert_eq!(rule.evaluate(&1), rule.evaluate(&1));
    }
}
