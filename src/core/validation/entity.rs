//! Per-entity validators
//!
//! Each validator runs its field checks in a fixed order and stops at the
//! first failing field.

use super::rule::Rule;
use super::validators::{greater_than, not_null, text};
use crate::core::error::FieldValidationError;
use crate::core::model::{EventModel, UserModel};

pub const EVENT_HEADER_FIELD: &str = "header";
pub const EVENT_CAPACITY_FIELD: &str = "capacity";
pub const USER_FIRST_NAME_FIELD: &str = "firstName";
pub const USER_LAST_NAME_FIELD: &str = "lastName";
pub const USER_USERNAME_FIELD: &str = "userName";
pub const USER_MAIL_FIELD: &str = "mail";

/// Validates an entity before it is persisted
pub trait EntityValidator<E>: Send + Sync {
    fn validate(&self, entity: &E) -> Result<(), FieldValidationError>;
}

/// Requires a non-blank header and a capacity greater than 1
#[derive(Debug, Clone)]
pub struct EventValidator {
    header: Rule<Option<String>>,
    capacity: Rule<Option<i32>>,
}

impl EventValidator {
    pub fn new() -> Self {
        Self {
            header: text::not_blank().required(),
            capacity: not_null().and(greater_than(1).required()),
        }
    }
}

impl Default for EventValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityValidator<EventModel> for EventValidator {
    fn validate(&self, event: &EventModel) -> Result<(), FieldValidationError> {
        self.header
            .evaluate(&event.header)
            .ensure_valid(EVENT_HEADER_FIELD)?;
        self.capacity
            .evaluate(&event.capacity)
            .ensure_valid(EVENT_CAPACITY_FIELD)?;
        Ok(())
    }
}

/// Requires first name, last name, user name and mail, and a well-formed mail
#[derive(Debug, Clone)]
pub struct UserValidator {
    not_blank: Rule<Option<String>>,
    mail: Rule<Option<String>>,
}

impl UserValidator {
    pub fn new() -> Self {
        Self {
            not_blank: text::not_blank().required(),
            mail: text::valid_email().required(),
        }
    }
}

impl Default for UserValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityValidator<UserModel> for UserValidator {
    fn validate(&self, user: &UserModel) -> Result<(), FieldValidationError> {
        self.not_blank
            .evaluate(&user.first_name)
            .ensure_valid(USER_FIRST_NAME_FIELD)?;
        self.not_blank
            .evaluate(&user.last_name)
            .ensure_valid(USER_LAST_NAME_FIELD)?;
        self.not_blank
            .evaluate(&user.user_name)
            .ensure_valid(USER_USERNAME_FIELD)?;
        self.not_blank
            .evaluate(&user.mail)
            .ensure_valid(USER_MAIL_FIELD)?;

        // the rejected address is part of the label
        let mail_label = format!(
            "{}:{}",
            USER_MAIL_FIELD,
            user.mail.as_deref().unwrap_or_default()
        );
        self.mail.evaluate(&user.mail).ensure_valid(&mail_label)?;
        Ok(())
    }
}
