//! Core types: validation, paging, the field cipher and the services using them

pub mod cipher;
pub mod error;
pub mod model;
pub mod query;
pub mod service;
pub mod validation;

pub use cipher::FieldCipher;
pub use error::{ConfigError, CoreError, FieldValidationError, UnrecognizedSortDirection};
pub use model::{Event, EventModel, User, UserModel};
pub use query::{Page, PageParams, PageRequest, PagedResult, SortDirection};
pub use service::{EventService, EventStore, UserService, UserStore};
pub use validation::{EntityValidator, EventValidator, Rule, UserValidator, ValidationResult};
