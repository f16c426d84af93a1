//! Field validation engine
//!
//! Leaf rules from [`validators`] compose into per-field checks with
//! [`Rule::and`]; [`entity`] chains those checks per entity type and stops at
//! the first failing field.

pub mod entity;
pub mod formats;
pub mod rule;
pub mod validators;

pub use entity::{EntityValidator, EventValidator, UserValidator};
pub use rule::{Rule, ValidationResult};
