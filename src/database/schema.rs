// ABOUTME: SQLite schema bootstrap for all Ladle tables
// ABOUTME: Pair tables carry UNIQUE constraints as the authoritative relationship guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use crate::errors::{AppError, AppResult};
use sqlx::SqlitePool;

/// Create all tables and indexes if they do not exist
///
/// # Errors
///
/// Returns an error if any DDL statement fails
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        r"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE NOT NULL,
            username TEXT UNIQUE NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            avatar TEXT,
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            measurement_unit TEXT NOT NULL
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)
        ",
        r"
        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            image TEXT NOT NULL,
            text TEXT NOT NULL,
            cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
            created_at TEXT NOT NULL
        )
        ",
        r"
        CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)
        ",
        r"
        CREATE TABLE IF NOT EXISTS recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
            amount INTEGER NOT NULL CHECK (amount >= 1),
            UNIQUE(recipe_id, ingredient_id)
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS favorites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, recipe_id)
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS cart_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, recipe_id)
        )
        ",
        r"
        CREATE TABLE IF NOT EXISTS follows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            follower_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            followee_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            UNIQUE(follower_id, followee_id)
        )
        ",
    ];

    for ddl in statements {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Schema bootstrap failed: {e}")))?;
    }

    Ok(())
}
