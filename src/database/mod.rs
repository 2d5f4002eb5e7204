// ABOUTME: Database access layer built on a shared sqlx SQLite pool
// ABOUTME: Exposes per-domain managers for users, ingredients, recipes, and relationships
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Database layer
//!
//! A single `SqlitePool` is shared by per-domain managers. Pair tables carry
//! `UNIQUE` constraints so the storage layer remains the authoritative guard
//! behind the managers' existence checks.

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Follow relationship management
pub mod follows;
/// Ingredient reference data
pub mod ingredients;
/// Recipe validation, composition, and CRUD
pub mod recipes;
/// Schema bootstrap
pub mod schema;
/// Favorite and shopping-cart list management
pub mod user_lists;
/// User accounts
pub mod users;

pub use follows::FollowsManager;
pub use ingredients::IngredientsManager;
pub use recipes::{RecipeFilter, RecipesManager};
pub use user_lists::{ListKind, UserListsManager};
pub use users::UsersManager;

/// Shared database handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and bootstrap the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema bootstrap fails
    pub async fn new(connection_string: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        schema::init_schema(&pool).await?;
        info!("Database schema ready");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests bootstrap their own schema)
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Ingredient reference data operations
    #[must_use]
    pub fn ingredients(&self) -> IngredientsManager {
        IngredientsManager::new(self.pool.clone())
    }

    /// Recipe operations
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Favorite and shopping-cart operations
    #[must_use]
    pub fn user_lists(&self) -> UserListsManager {
        UserListsManager::new(self.pool.clone())
    }

    /// Follow relationship operations
    #[must_use]
    pub fn follows(&self) -> FollowsManager {
        FollowsManager::new(self.pool.clone())
    }
}
