// ABOUTME: Recipe, ingredient, and association models plus submission payloads
// ABOUTME: Recipes own an ordered set of (ingredient, amount) associations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable reference data shared by many recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit, e.g. "g" or "ml"
    pub measurement_unit: String,
}

/// A recipe as stored, without its association set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier (base62 short-link input)
    pub id: i64,
    /// Owning author
    pub author_id: Uuid,
    /// Recipe name
    pub name: String,
    /// Relative media path of the recipe image
    pub image: String,
    /// Free-text body
    pub text: String,
    /// Cooking time in minutes, at least 1
    pub cooking_time: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One (recipe, ingredient, amount) association with resolved ingredient data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Positive amount required by this recipe
    pub amount: i64,
}

/// Minimal recipe representation returned by relationship toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeMinified {
    /// Unique identifier
    pub id: i64,
    /// Recipe name
    pub name: String,
    /// Relative media path of the recipe image
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

impl From<&Recipe> for RecipeMinified {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// One submitted ingredient reference with its amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// Referenced ingredient identifier
    pub id: i64,
    /// Positive amount
    pub amount: i64,
}

/// Author-submitted payload for creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePayload {
    /// Recipe name
    pub name: String,
    /// Relative media path of the recipe image
    pub image: String,
    /// Free-text body
    pub text: String,
    /// Cooking time in minutes, at least 1
    pub cooking_time: i64,
    /// Ordered ingredient list; an absent key validates like an empty list
    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
}

/// Author-submitted payload for updating a recipe
///
/// `ingredients: None` leaves the existing association set untouched;
/// `Some(list)` fully replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdatePayload {
    /// New name (if provided)
    pub name: Option<String>,
    /// New image path (if provided)
    pub image: Option<String>,
    /// New body text (if provided)
    pub text: Option<String>,
    /// New cooking time (if provided)
    pub cooking_time: Option<i64>,
    /// Replacement ingredient list (if provided)
    pub ingredients: Option<Vec<IngredientAmount>>,
}
