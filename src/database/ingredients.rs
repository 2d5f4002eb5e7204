// ABOUTME: Database operations for ingredient reference data
// ABOUTME: Read-mostly lookups with name-prefix search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use crate::errors::AppResult;
use crate::models::Ingredient;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Ingredient database operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List ingredients, optionally restricted to a name prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, name_prefix: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = match name_prefix {
            Some(prefix) => {
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit FROM ingredients
                    WHERE name LIKE $1 || '%' ESCAPE '\' ORDER BY name
                    ",
                )
                .bind(escape_like(prefix))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT id, name, measurement_unit FROM ingredients ORDER BY name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT id, name, measurement_unit FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_ingredient))
    }

    /// Insert a new ingredient (seeding and tests)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(&self, name: &str, measurement_unit: &str) -> AppResult<Ingredient> {
        let result = sqlx::query("INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2)")
            .bind(name)
            .bind(measurement_unit)
            .execute(&self.pool)
            .await?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            measurement_unit: measurement_unit.to_owned(),
        })
    }
}

// LIKE wildcards in user input would widen the prefix match; the escape
// character itself must go first or a trailing `\` swallows the appended `%`
fn escape_like(prefix: &str) -> String {
    prefix
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}


fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
    }
}
