//! In-memory stores for testing and development

use crate::core::model::{EventModel, UserModel};
use crate::core::query::{Page, PageRequest};
use crate::core::service::{EventStore, UserStore};
use anyhow::{Result, anyhow, bail};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    /// `None` once `i32::MAX` has been used
    next_id: Option<i32>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl<T> Table<T> {
    /// Id to store a row under, allocating one for new rows
    ///
    /// Fails once every id up to `i32::MAX` has been handed out.
    fn assign(&mut self, id: Option<i32>, entity: &str) -> Result<i32> {
        let id = match id {
            Some(id) => id,
            None => match self.next_id {
                Some(id) => id,
                None => bail!("{} id space exhausted", entity),
            },
        };
        if self.next_id.is_some_and(|next| id >= next) {
            self.next_id = id.checked_add(1);
        }
        Ok(id)
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

/// In-memory event store
///
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    table: Arc<RwLock<Table<EventModel>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn comparator(field: &str) -> Result<fn(&EventModel, &EventModel) -> Ordering> {
        let compare: fn(&EventModel, &EventModel) -> Ordering = match field {
            "id" => |a, b| a.id.cmp(&b.id),
            "header" => |a, b| a.header.cmp(&b.header),
            "description" => |a, b| a.description.cmp(&b.description),
            "capacity" => |a, b| a.capacity.cmp(&b.capacity),
            "attending" => |a, b| a.attending.cmp(&b.attending),
            "created" => |a, b| a.created.cmp(&b.created),
            other => bail!("Unknown event sort field '{}'", other),
        };
        Ok(compare)
    }
}

impl EventStore for InMemoryEventStore {
    fn save(&self, mut event: EventModel) -> Result<EventModel> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = table.assign(event.id, "event")?;
        event.id = Some(id);
        table.rows.insert(id, event.clone());

        Ok(event)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<EventModel>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    fn find_by_header_containing(
        &self,
        header: &str,
        request: &PageRequest,
    ) -> Result<Page<EventModel>> {
        let compare = Self::comparator(&request.sort_by)?;
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let matches: Vec<EventModel> = table
            .rows
            .values()
            .filter(|event| contains_ignore_case(event.header.as_deref(), header))
            .cloned()
            .collect();

        Ok(Page::paginate_by(matches, request, compare))
    }
}

/// In-memory user store
///
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table<UserModel>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored row, credential still encrypted
    pub fn raw(&self, id: i32) -> Result<Option<UserModel>> {
        self.find_by_id(id)
    }

    fn comparator(field: &str) -> Result<fn(&UserModel, &UserModel) -> Ordering> {
        let compare: fn(&UserModel, &UserModel) -> Ordering = match field {
            "id" => |a, b| a.id.cmp(&b.id),
            "userName" => |a, b| a.user_name.cmp(&b.user_name),
            "firstName" => |a, b| a.first_name.cmp(&b.first_name),
            "lastName" => |a, b| a.last_name.cmp(&b.last_name),
            "mail" => |a, b| a.mail.cmp(&b.mail),
            "created" => |a, b| a.created.cmp(&b.created),
            other => bail!("Unknown user sort field '{}'", other),
        };
        Ok(compare)
    }
}

impl UserStore for InMemoryUserStore {
    fn save(&self, mut user: UserModel) -> Result<UserModel> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = table.assign(user.id, "user")?;
        user.id = Some(id);
        table.rows.insert(id, user.clone());

        Ok(user)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<UserModel>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    fn exists_by_user_name(&self, user_name: &str) -> Result<bool> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table
            .rows
            .values()
            .any(|user| user.user_name.as_deref() == Some(user_name)))
    }

    fn exists_by_mail(&self, mail: &str) -> Result<bool> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table
            .rows
            .values()
            .any(|user| user.mail.as_deref() == Some(mail)))
    }

    fn find_by_user_name_containing(
        &self,
        user_name: &str,
        request: &PageRequest,
    ) -> Result<Page<UserModel>> {
        let compare = Self::comparator(&request.sort_by)?;
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let matches: Vec<UserModel> = table
            .rows
            .values()
            .filter(|user| contains_ignore_case(user.user_name.as_deref(), user_name))
            .cloned()
            .collect();

        Ok(Page::paginate_by(matches, request, compare))
    }
}
