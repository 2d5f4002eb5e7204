// ABOUTME: Database operations for per-user recipe lists (favorites and shopping cart)
// ABOUTME: Idempotency-checked add/remove plus the raw rows behind shopping list aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Favorite and shopping-cart membership
//!
//! Both lists share the same shape: a `(user, recipe)` pair table with a
//! `UNIQUE` constraint. The manager's existence checks are a fast path; the
//! constraint remains the authoritative guard under concurrent requests.

use crate::errors::{AppError, AppResult};
use crate::models::RecipeMinified;
use crate::shopping_list::CartIngredientRow;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Which per-user recipe list an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Recipes marked for quick retrieval
    Favorites,
    /// Recipes whose ingredients feed the shopping list
    Cart,
}

impl ListKind {
    /// Backing table name
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Cart => "cart_items",
        }
    }

    /// Human-readable name for error messages
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Favorites => "favorite",
            Self::Cart => "shopping cart item",
        }
    }
}

/// Favorite and shopping-cart database operations manager
pub struct UserListsManager {
    pool: SqlitePool,
}

impl UserListsManager {
    /// Create a new user lists manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a recipe to the user's list
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the recipe does not exist,
    /// `ResourceAlreadyExists` when the relationship is already present
    pub async fn add(
        &self,
        kind: ListKind,
        user_id: Uuid,
        recipe_id: i64,
    ) -> AppResult<RecipeMinified> {
        let recipe = self
            .minified_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        if self.contains(kind, user_id, recipe_id).await? {
            return Err(AppError::already_exists(format!(
                "Recipe {recipe_id} is already a {}",
                kind.describe()
            )));
        }

        let query = format!(
            "INSERT INTO {} (user_id, recipe_id, created_at) VALUES ($1, $2, $3)",
            kind.table()
        );
        sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(recipe)
    }

    /// Remove a recipe from the user's list
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the relationship is absent
    pub async fn remove(&self, kind: ListKind, user_id: Uuid, recipe_id: i64) -> AppResult<()> {
        let query = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            kind.table()
        );
        let result = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Recipe {recipe_id} {}",
                kind.describe()
            )));
        }
        Ok(())
    }

    /// Check list membership
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn contains(&self, kind: ListKind, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let query = format!(
            "SELECT 1 FROM {} WHERE user_id = $1 AND recipe_id = $2",
            kind.table()
        );
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Raw `(recipe, ingredient, amount)` rows across every cart recipe
    ///
    /// Rows come back in association insertion order so aggregation ties
    /// stay stable. Summing and sorting happen in `shopping_list::aggregate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn cart_ingredient_rows(&self, user_id: Uuid) -> AppResult<Vec<CartIngredientRow>> {
        let rows = sqlx::query(
            r"
            SELECT i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM cart_items c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| CartIngredientRow {
                ingredient_id: row.get("ingredient_id"),
                name: row.get("name"),
                measurement_unit: row.get("measurement_unit"),
                amount: row.get("amount"),
            })
            .collect())
    }

    async fn minified_recipe(&self, recipe_id: i64) -> AppResult<Option<RecipeMinified>> {
        let row = sqlx::query("SELECT id, name, image, cooking_time FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| RecipeMinified {
            id: r.get("id"),
            name: r.get("name"),
            image: r.get("image"),
            cooking_time: r.get("cooking_time"),
        }))
    }
}
