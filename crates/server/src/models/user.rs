//! User records and their credential-free public view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outfitter_core::{Email, Role, UserId};

/// A store user as persisted in the document.
///
/// `pass` holds an argon2 PHC hash, never the raw credential. Users
/// created through the role-upsert flow have no credential until they
/// register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, server-generated identifier.
    pub id: UserId,
    /// Lowercase-canonical email; unique key within the collection.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Role within the store.
    pub role: Role,
    /// Argon2 password hash, absent for role-upserted users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    /// Avatar reference.
    #[serde(default)]
    pub photo: String,
    /// Creation time (epoch milliseconds on the wire).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A user as returned by the API: the credential hash is always omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub photo: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            photo: user.photo.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
