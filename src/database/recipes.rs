// ABOUTME: Database operations for recipes and their ingredient associations
// ABOUTME: Validates submitted ingredient lists and composes association sets transactionally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Recipe validation and composition
//!
//! A recipe and its `(recipe, ingredient, amount)` association rows are
//! written inside a single transaction: either the recipe and its full
//! validated association set commit together, or nothing does. Updates that
//! carry a new ingredient list replace the prior association set wholesale;
//! updates without one leave associations untouched.

use crate::errors::{AppError, AppResult};
use crate::models::{IngredientAmount, Recipe, RecipeIngredient, RecipePayload, RecipeUpdatePayload};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

/// Filter options for listing recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Restrict to recipes by this author
    pub author: Option<Uuid>,
    /// Restrict to recipes favorited by this user
    pub favorited_by: Option<Uuid>,
    /// Restrict to recipes in this user's shopping cart
    pub in_cart_of: Option<Uuid>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate a submitted ingredient list
    ///
    /// # Errors
    ///
    /// - `EmptyIngredientList` when the list is empty
    /// - `DuplicateIngredient` (naming the duplicated ids) when an ingredient
    ///   reference repeats
    /// - `InvalidInput` when an amount is below 1
    pub fn validate_ingredients(ingredients: &[IngredientAmount]) -> AppResult<()> {
        if ingredients.is_empty() {
            return Err(AppError::empty_ingredient_list());
        }

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in ingredients {
            if !seen.insert(entry.id) && !duplicates.contains(&entry.id) {
                duplicates.push(entry.id);
            }
            if entry.amount < 1 {
                return Err(AppError::invalid_input(format!(
                    "Amount for ingredient {} must be at least 1",
                    entry.id
                )));
            }
        }

        if !duplicates.is_empty() {
            return Err(AppError::duplicate_ingredients(&duplicates));
        }
        Ok(())
    }

    /// Create a recipe together with its association set, atomically
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload, `ResourceNotFound` when
    /// a referenced ingredient does not exist, or a database error; on any
    /// failure no rows remain committed
    pub async fn create(&self, author_id: Uuid, payload: &RecipePayload) -> AppResult<Recipe> {
        Self::validate_ingredients(&payload.ingredients)?;
        Self::validate_scalar_fields(&payload.name, payload.cooking_time)?;
        self.ensure_ingredients_exist(&payload.ingredients).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(author_id.to_string())
        .bind(&payload.name)
        .bind(&payload.image)
        .bind(&payload.text)
        .bind(payload.cooking_time)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        let recipe_id = result.last_insert_rowid();

        for entry in &payload.ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
            )
            .bind(recipe_id)
            .bind(entry.id)
            .bind(entry.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Recipe {
            id: recipe_id,
            author_id,
            name: payload.name.clone(),
            image: payload.image.clone(),
            text: payload.text.clone(),
            cooking_time: payload.cooking_time,
            created_at: now,
        })
    }

    /// Update a recipe; a supplied ingredient list fully replaces the prior set
    ///
    /// Only the recipe's author may update it.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the recipe is absent, `PermissionDenied` when
    /// the actor is not the author, validation errors for a bad payload
    pub async fn update(
        &self,
        recipe_id: i64,
        actor_id: Uuid,
        payload: &RecipeUpdatePayload,
    ) -> AppResult<Recipe> {
        let existing = self
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        if existing.author_id != actor_id {
            return Err(AppError::permission_denied(
                "Only the author may update this recipe",
            ));
        }

        if let Some(ingredients) = &payload.ingredients {
            Self::validate_ingredients(ingredients)?;
            self.ensure_ingredients_exist(ingredients).await?;
        }

        let name = payload.name.clone().unwrap_or(existing.name);
        let image = payload.image.clone().unwrap_or(existing.image);
        let text = payload.text.clone().unwrap_or(existing.text);
        let cooking_time = payload.cooking_time.unwrap_or(existing.cooking_time);
        Self::validate_scalar_fields(&name, cooking_time)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE recipes SET name = $1, image = $2, text = $3, cooking_time = $4 WHERE id = $5",
        )
        .bind(&name)
        .bind(&image)
        .bind(&text)
        .bind(cooking_time)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

        if let Some(ingredients) = &payload.ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe_id)
                .execute(&mut *tx)
                .await?;

            for entry in ingredients {
                sqlx::query(
                    "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
                )
                .bind(recipe_id)
                .bind(entry.id)
                .bind(entry.amount)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Recipe {
            id: recipe_id,
            author_id: existing.author_id,
            name,
            image,
            text,
            cooking_time,
            created_at: existing.created_at,
        })
    }

    /// Delete a recipe; associations, favorites, and cart rows cascade
    ///
    /// Only the recipe's author may delete it.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when absent, `PermissionDenied` for non-authors
    pub async fn delete(&self, recipe_id: i64, actor_id: Uuid) -> AppResult<()> {
        let existing = self
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        if existing.author_id != actor_id {
            return Err(AppError::permission_denied(
                "Only the author may delete this recipe",
            ));
        }

        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Resolve a recipe's association set, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_ingredients(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredient>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| RecipeIngredient {
                id: row.get("id"),
                name: row.get("name"),
                measurement_unit: row.get("measurement_unit"),
                amount: row.get("amount"),
            })
            .collect())
    }

    /// List recipes newest first with optional relationship filters
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        let limit = i64::from(filter.limit.unwrap_or(20));
        let offset = i64::from(filter.offset.unwrap_or(0));

        let author_clause = if filter.author.is_some() {
            "AND r.author_id = $3"
        } else {
            "AND $3 IS NULL"
        };
        let favorited_clause = if filter.favorited_by.is_some() {
            "AND r.id IN (SELECT recipe_id FROM favorites WHERE user_id = $4)"
        } else {
            "AND $4 IS NULL"
        };
        let cart_clause = if filter.in_cart_of.is_some() {
            "AND r.id IN (SELECT recipe_id FROM cart_items WHERE user_id = $5)"
        } else {
            "AND $5 IS NULL"
        };

        let query = format!(
            r"
            SELECT r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.created_at
            FROM recipes r
            WHERE 1 = 1 {author_clause} {favorited_clause} {cart_clause}
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $1 OFFSET $2
            "
        );

        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .bind(filter.author.map(|u| u.to_string()))
            .bind(filter.favorited_by.map(|u| u.to_string()))
            .bind(filter.in_cart_of.map(|u| u.to_string()))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// List an author's recipes newest first, truncated to `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_by_author(&self, author_id: Uuid, limit: u32) -> AppResult<Vec<Recipe>> {
        self.list(&RecipeFilter {
            author: Some(author_id),
            limit: Some(limit),
            ..RecipeFilter::default()
        })
        .await
    }

    fn validate_scalar_fields(name: &str, cooking_time: i64) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe name must not be empty"));
        }
        if cooking_time < 1 {
            return Err(AppError::invalid_input("Cooking time must be at least 1"));
        }
        Ok(())
    }

    /// Every referenced ingredient id must exist before composition begins
    async fn ensure_ingredients_exist(&self, ingredients: &[IngredientAmount]) -> AppResult<()> {
        for entry in ingredients {
            let exists = sqlx::query("SELECT 1 FROM ingredients WHERE id = $1")
                .bind(entry.id)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                return Err(AppError::not_found(format!("Ingredient {}", entry.id)));
            }
        }
        Ok(())
    }
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let author_id_str: String = row.get("author_id");
    let created_at_str: String = row.get("created_at");

    Ok(Recipe {
        id: row.get("id"),
        author_id: Uuid::parse_str(&author_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        name: row.get("name"),
        image: row.get("image"),
        text: row.get("text"),
        cooking_time: row.get("cooking_time"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
