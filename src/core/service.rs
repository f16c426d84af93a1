//! Store traits and the services that drive the core
//!
//! Stores are external collaborators: they persist records and answer paged
//! queries. Services validate before persisting, pass credentials through the
//! field cipher, and wrap query results in [`PagedResult`] envelopes.

use crate::config::PagingConfig;
use crate::core::cipher::FieldCipher;
use crate::core::error::CoreError;
use crate::core::model::{Event, EventModel, User, UserModel};
use crate::core::query::{Page, PageParams, PageRequest, PagedResult};
use crate::core::validation::{EntityValidator, EventValidator, UserValidator};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

/// Persistence for events
pub trait EventStore: Send + Sync {
    /// Insert or replace an event, assigning an id when it has none
    fn save(&self, event: EventModel) -> Result<EventModel>;

    fn find_by_id(&self, id: i32) -> Result<Option<EventModel>>;

    /// Events whose header contains `header`, ignoring case
    fn find_by_header_containing(
        &self,
        header: &str,
        request: &PageRequest,
    ) -> Result<Page<EventModel>>;
}

/// Persistence for users
pub trait UserStore: Send + Sync {
    /// Insert or replace a user, assigning an id when it has none
    fn save(&self, user: UserModel) -> Result<UserModel>;

    fn find_by_id(&self, id: i32) -> Result<Option<UserModel>>;

    fn exists_by_user_name(&self, user_name: &str) -> Result<bool>;

    fn exists_by_mail(&self, mail: &str) -> Result<bool>;

    /// Users whose user name contains `user_name`, ignoring case
    fn find_by_user_name_containing(
        &self,
        user_name: &str,
        request: &PageRequest,
    ) -> Result<Page<UserModel>>;
}

/// Event operations
pub struct EventService<S> {
    store: S,
    validator: EventValidator,
    cipher: Arc<FieldCipher>,
    paging: PagingConfig,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S, cipher: Arc<FieldCipher>, paging: PagingConfig) -> Self {
        Self {
            store,
            validator: EventValidator::new(),
            cipher,
            paging,
        }
    }

    /// Validate and persist an event, stamping `created` with the current time
    pub fn save(&self, event: Event) -> Result<Event, CoreError> {
        let mut model = event.into_model(&self.cipher);
        self.validator.validate(&model)?;
        model.created = Some(Utc::now());

        let saved = self.store.save(model)?;
        tracing::debug!(id = ?saved.id, "event saved");
        Ok(Event::from_model(saved, &self.cipher))
    }

    pub fn find_by_id(&self, id: i32) -> Result<Event, CoreError> {
        let model = self
            .store
            .find_by_id(id)?
            .ok_or_else(|| CoreError::not_found("event", format!("id {}", id)))?;
        Ok(Event::from_model(model, &self.cipher))
    }

    /// Page through events by header; an empty page is `NotFound`
    pub fn search_by_header(
        &self,
        header: &str,
        params: PageParams,
    ) -> Result<PagedResult<Event>, CoreError> {
        let request = params.into_request(&self.paging)?;
        tracing::debug!(header = %header, page = request.page, size = request.size, "searching events");

        let page = self.store.find_by_header_containing(header, &request)?;
        if page.is_empty() {
            return Err(CoreError::not_found("event", format!("header '{}'", header)));
        }
        Ok(PagedResult::from_page(page, |model| {
            Event::from_model(model, &self.cipher)
        }))
    }
}

/// User operations
pub struct UserService<S> {
    store: S,
    validator: UserValidator,
    cipher: Arc<FieldCipher>,
    paging: PagingConfig,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S, cipher: Arc<FieldCipher>, paging: PagingConfig) -> Self {
        Self {
            store,
            validator: UserValidator::new(),
            cipher,
            paging,
        }
    }

    /// Validate and persist a user; the credential is stored encrypted
    ///
    /// A user without an id is new and must not reuse a taken user name or
    /// mail. The user name is checked first. `created` is always set to the
    /// current time.
    pub fn save(&self, user: User) -> Result<User, CoreError> {
        let mut model = user.into_model(&self.cipher);
        self.validator.validate(&model)?;
        if model.id.is_none() {
            self.ensure_unique(&model)?;
        }
        model.created = Some(Utc::now());

        let saved = self.store.save(model)?;
        tracing::debug!(id = ?saved.id, "user saved");
        Ok(User::from_model(saved, &self.cipher))
    }

    fn ensure_unique(&self, model: &UserModel) -> Result<(), CoreError> {
        // both fields are present once validation passed
        let user_name = model.user_name.as_deref().unwrap_or_default();
        if self.store.exists_by_user_name(user_name)? {
            return Err(CoreError::already_in_use("UserName", user_name));
        }
        let mail = model.mail.as_deref().unwrap_or_default();
        if self.store.exists_by_mail(mail)? {
            return Err(CoreError::already_in_use("Mail", mail));
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: i32) -> Result<User, CoreError> {
        let model = self
            .store
            .find_by_id(id)?
            .ok_or_else(|| CoreError::not_found("user", format!("id {}", id)))?;
        Ok(User::from_model(model, &self.cipher))
    }

    /// Page through users by user name; an empty page is `NotFound`
    pub fn search_by_user_name(
        &self,
        user_name: &str,
        params: PageParams,
    ) -> Result<PagedResult<User>, CoreError> {
        let request = params.into_request(&self.paging)?;
        tracing::debug!(user_name = %user_name, page = request.page, size = request.size, "searching users");

        let page = self.store.find_by_user_name_containing(user_name, &request)?;
        if page.is_empty() {
            return Err(CoreError::not_found(
                "user",
                format!("userName '{}'", user_name),
            ));
        }
        Ok(PagedResult::from_page(page, |model| {
            User::from_model(model, &self.cipher)
        }))
    }
}
