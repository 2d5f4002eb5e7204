// ABOUTME: Database operations for directed follow relationships between users
// ABOUTME: Enforces the strict policy of no self-follow and unique follower/followee pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use crate::database::users::row_to_user;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Follow relationship database operations manager
pub struct FollowsManager {
    pool: SqlitePool,
}

impl FollowsManager {
    /// Create a new follows manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a follow relationship
    ///
    /// # Errors
    ///
    /// `SelfFollowNotAllowed` when follower equals followee,
    /// `ResourceNotFound` when the followee does not exist,
    /// `ResourceAlreadyExists` on a double follow
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<()> {
        if follower_id == followee_id {
            return Err(AppError::self_follow());
        }

        let followee = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(followee_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        if followee.is_none() {
            return Err(AppError::not_found(format!("User {followee_id}")));
        }

        if self.is_following(follower_id, followee_id).await? {
            return Err(AppError::already_exists(format!(
                "Already following user {followee_id}"
            )));
        }

        sqlx::query(
            "INSERT INTO follows (follower_id, followee_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(follower_id.to_string())
        .bind(followee_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a follow relationship
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the relationship is absent
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2",
        )
        .bind(follower_id.to_string())
        .bind(followee_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Follow of user {followee_id}"
            )));
        }
        Ok(())
    }

    /// Check whether `follower` follows `followee`
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2",
        )
        .bind(follower_id.to_string())
        .bind(followee_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// List the users this user follows, oldest follow first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn followees(
        &self,
        follower_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name,
                   u.password_hash, u.avatar, u.created_at
            FROM follows f
            JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(follower_id.to_string())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }
}
