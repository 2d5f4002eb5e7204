// ABOUTME: User account model backing authentication and social relationships
// ABOUTME: Stored in the users table; avatar is a relative media path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address, unique across accounts, used for login
    pub email: String,
    /// Public username, unique across accounts
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Bcrypt password hash, never serialized in responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Relative media path of the uploaded avatar, if any
    pub avatar: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    #[must_use]
    pub fn new(
        email: String,
        username: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            first_name,
            last_name,
            password_hash,
            avatar: None,
            created_at: Utc::now(),
        }
    }
}
