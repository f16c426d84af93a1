//! # gettogether-core
//!
//! Reusable core of the get-together event backend.
//!
//! ## Features
//!
//! - **Composable validation**: pure [`Rule`](core::Rule)s combined with a
//!   fail-fast `and`, plus per-entity validators that stop at the first bad field
//! - **Paged envelopes**: [`PagedResult`](core::PagedResult) wraps any store page
//!   as `{ totalElements, totalPages, numberOfElements, content }`
//! - **Sort normalization**: raw `asc`/`desc` tokens become a
//!   [`SortDirection`](core::SortDirection)
//! - **Field encryption**: [`FieldCipher`](core::FieldCipher) protects the user
//!   credential at rest and never fails a request because of a cipher error
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gettogether::prelude::*;
//!
//! let config = CoreConfig::from_yaml_file("gettogether.yaml")?.with_env_overrides()?;
//! let cipher = Arc::new(FieldCipher::from_config(&config.cipher)?);
//! let events = EventService::new(InMemoryEventStore::new(), cipher, config.paging.clone());
//!
//! let saved = events.save(Event {
//!     header: Some("Board games night".to_string()),
//!     capacity: Some(6),
//!     ..Event::default()
//! })?;
//!
//! let page = events.search_by_header("board", PageParams::default())?;
//! assert_eq!(page.number_of_elements(), 1);
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Validation ===
    pub use crate::core::validation::{
        EntityValidator, EventValidator, Rule, UserValidator, ValidationResult,
        validators::{greater_than, int_between, lower_than, not_null, text},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, CoreError, ErrorResponse, FieldValidationError, UnrecognizedSortDirection,
    };

    // === Paging ===
    pub use crate::core::query::{Page, PageParams, PageRequest, PagedResult, SortDirection};

    // === Models & Services ===
    pub use crate::core::cipher::FieldCipher;
    pub use crate::core::model::{Event, EventModel, User, UserModel};
    pub use crate::core::service::{EventService, EventStore, UserService, UserStore};

    // === Storage ===
    pub use crate::storage::{InMemoryEventStore, InMemoryUserStore};

    // === Config ===
    pub use crate::config::{CipherConfig, CipherMode, CoreConfig, PagingConfig};

    // === Logging ===
    pub use crate::logging::init_tracing;

    pub use std::sync::Arc;
}
