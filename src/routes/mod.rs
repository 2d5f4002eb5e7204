// ABOUTME: Route module organization for Ladle HTTP endpoints
// ABOUTME: Route definitions per domain with thin handlers delegating to managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Route module for the Ladle server
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database managers.

/// Registration and login routes
pub mod auth;
/// Health check routes
pub mod health;
/// Ingredient lookup routes
pub mod ingredients;
/// Recipe CRUD, favorites, cart, and shopping list routes
pub mod recipes;
/// Short-link redirect routes
pub mod shortlinks;
/// User profile, avatar, and subscription routes
pub mod users;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use shortlinks::ShortLinkRoutes;
pub use users::{UserResponse, UserRoutes, UserWithRecipesResponse};
