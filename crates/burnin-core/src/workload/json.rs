//! Serialization workload: a nested synthetic user dataset.
//!
//! Records are a pure function of their index and the request timestamp, so
//! two requests built with the same `now` produce identical payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{BurninError, Result};

/// Records per response.
pub const DEFAULT_RECORDS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub metadata: UserMetadata,
}

impl User {
    /// Synthetic user at position `i`.
    ///
    /// Every 10th index is an admin; even indices are active.
    pub fn synthetic(i: usize, now: DateTime<Utc>) -> Self {
        let id = i as u64;
        Self {
            id,
            name: format!("User {i}"),
            email: format!("user{i}@example.com"),
            active: i % 2 == 0,
            metadata: UserMetadata {
                role: if i % 10 == 0 { Role::Admin } else { Role::User },
                created_at: now - Duration::minutes(i as i64),
                preferences: Preferences {
                    theme: if i % 2 == 0 { Theme::Dark } else { Theme::Light },
                    notifications: i % 3 == 0,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Full `/json` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPayload {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub users: Vec<User>,
    pub pagination: Pagination,
}

/// Build a single-page dataset of `records` users.
pub fn build_payload(records: usize, now: DateTime<Utc>) -> UsersPayload {
    let users = (0..records).map(|i| User::synthetic(i, now)).collect();
    UsersPayload {
        status: "ok".to_string(),
        timestamp: now,
        users,
        pagination: Pagination { total: records, page: 1, per_page: records },
    }
}

/// Encode `value` to bytes and decode it back.
pub fn roundtrip<T>(value: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let bytes = serde_json::to_vec(value).map_err(|e| BurninError::Serialize(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| BurninError::Deserialize(e.to_string()))
}
