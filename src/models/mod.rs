// ABOUTME: Domain models shared between the database layer and HTTP routes
// ABOUTME: Users, ingredients, recipes, and their association payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Common data models for the Ladle server

/// Recipe, ingredient, and association models
pub mod recipe;
/// User account models
pub mod user;

pub use recipe::{
    Ingredient, IngredientAmount, Recipe, RecipeIngredient, RecipeMinified, RecipePayload,
    RecipeUpdatePayload,
};
pub use user::User;
