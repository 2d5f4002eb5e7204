// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: In-memory database bootstrap plus user, ingredient, and recipe factories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, dead_code)]

use ladle::database::{schema, Database};
use ladle::models::{Ingredient, IngredientAmount, Recipe, RecipePayload, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

/// Fresh in-memory database with the schema bootstrapped
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn test_database() -> Database {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    schema::init_schema(&pool).await.unwrap();
    Database::from_pool(pool)
}

/// Insert a user with a unique email and username
pub async fn create_user(database: &Database, tag: &str) -> User {
    let suffix = Uuid::new_v4().simple().to_string();
    let user = User::new(
        format!("{tag}-{suffix}@example.com"),
        format!("{tag}-{suffix}"),
        "Test".to_owned(),
        "User".to_owned(),
        "not-a-real-hash".to_owned(),
    );
    database.users().create(&user).await.unwrap();
    user
}

/// Insert an ingredient and return it with its assigned id
pub async fn create_ingredient(database: &Database, name: &str, unit: &str) -> Ingredient {
    database.ingredients().create(name, unit).await.unwrap()
}

/// A valid payload referencing the given ingredient amounts
pub fn recipe_payload(name: &str, ingredients: Vec<IngredientAmount>) -> RecipePayload {
    RecipePayload {
        name: name.to_owned(),
        image: "recipes/test.png".to_owned(),
        text: "Combine and serve.".to_owned(),
        cooking_time: 15,
        ingredients,
    }
}

/// Insert a recipe by `author` using one fresh ingredient
pub async fn create_recipe(database: &Database, author: &User, name: &str) -> Recipe {
    let ingredient = create_ingredient(database, &format!("{name} base"), "g").await;
    let payload = recipe_payload(
        name,
        vec![IngredientAmount {
            id: ingredient.id,
            amount: 100,
        }],
    );
    database.recipes().create(author.id, &payload).await.unwrap()
}
