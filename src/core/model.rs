//! Event and user records plus their client-facing representations
//!
//! `*Model` types are what a store persists; credential fields there hold
//! ciphertext. [`Event`] and [`User`] are what clients send and receive.

use crate::core::cipher::FieldCipher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventModel {
    pub id: Option<i32>,
    pub header: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub attending: Option<i32>,
    pub created: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub host_id: Option<i32>,
    pub attendees: Vec<UserModel>,
}

/// A stored user; `password` is ciphertext
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserModel {
    pub id: Option<i32>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub biography: Option<String>,
    pub mail: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub password: Option<String>,
}

/// Client-facing event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub attending: Option<i32>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub host_id: Option<i32>,
    #[serde(default)]
    pub attendees: Vec<User>,
}

/// Client-facing user; `password` is plaintext
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone_number", &self.phone_number)
            .field("biography", &self.biography)
            .field("mail", &self.mail)
            .field("created", &self.created)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl User {
    /// Representation of a stored user, decrypting the credential
    pub fn from_model(model: UserModel, cipher: &FieldCipher) -> Self {
        let password = cipher.decrypt(model.password.as_deref());
        Self {
            id: model.id,
            user_name: model.user_name,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            biography: model.biography,
            mail: model.mail,
            created: model.created,
            password,
        }
    }

    /// Record to persist, encrypting the credential
    pub fn into_model(self, cipher: &FieldCipher) -> UserModel {
        let password = cipher.encrypt(self.password.as_deref());
        UserModel {
            id: self.id,
            user_name: self.user_name,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            biography: self.biography,
            mail: self.mail,
            created: self.created,
            password,
        }
    }
}

impl Event {
    /// Representation of a stored event and its attendees
    pub fn from_model(model: EventModel, cipher: &FieldCipher) -> Self {
        Self {
            id: model.id,
            header: model.header,
            description: model.description,
            capacity: model.capacity,
            attending: model.attending,
            created: model.created,
            is_active: model.is_active,
            host_id: model.host_id,
            attendees: model
                .attendees
                .into_iter()
                .map(|attendee| User::from_model(attendee, cipher))
                .collect(),
        }
    }

    /// Record to persist, encrypting attendee credentials
    pub fn into_model(self, cipher: &FieldCipher) -> EventModel {
        EventModel {
            id: self.id,
            header: self.header,
            description: self.description,
            capacity: self.capacity,
            attending: self.attending,
            created: self.created,
            is_active: self.is_active,
            host_id: self.host_id,
            attendees: self
                .attendees
                .into_iter()
                .map(|attendee| attendee.into_model(cipher))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CipherMode;

    fn cipher() -> FieldCipher {
        FieldCipher::new(b"0123456789abcdef0123456789abcdef", CipherMode::Ecb).unwrap()
    }

    fn user() -> User {
        User {
            user_name: Some("jdoe".to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            mail: Some("john@example.com".to_string()),
            password: Some("hunter2".to_string()),
            ..User::default()
        }
    }

    #[test]
    fn test_user_into_model_encrypts_password() {
        let model = user().into_model(&cipher());
        let stored = model.password.unwrap();
        assert_ne!(stored, "hunter2");
        assert_eq!(cipher().decrypt(Some(&stored)).as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_user_model_round_trip() {
        let original = user();
        let back = User::from_model(original.clone().into_model(&cipher()), &cipher());
        assert_eq!(back, original);
    }

    #[test]
    fn test_user_without_password_stays_without() {
        let model = User {
            password: None,
            ..user()
        }
        .into_model(&cipher());
        assert!(model.password.is_none());
    }

    #[test]
    fn test_event_maps_attendees() {
        let event = Event {
            header: Some("Board games".to_string()),
            capacity: Some(6),
            attendees: vec![user()],
            ..Event::default()
        };
        let model = event.clone().into_model(&cipher());
        assert_ne!(model.attendees[0].password.as_deref(), Some("hunter2"));
        assert_eq!(Event::from_model(model, &cipher()), event);
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["userName"], "jdoe");
        assert_eq!(json["firstName"], "John");
        assert!(json.get("user_name").is_none());
    }

    #[test]
    fn test_event_deserializes_with_missing_fields() {
        let event: Event = serde_json::from_str(r#"{"header":"Hike","capacity":3}"#).unwrap();
        assert_eq!(event.header.as_deref(), Some("Hike"));
        assert!(event.attendees.is_empty());
        assert!(event.id.is_none());
    }

    #[test]
    fn test_user_debug_redacts_password() {
        let debug = format!("{:?}", user());
        assert!(!debug.contains("hunter2"));
    }
}
