// ABOUTME: Main library entry point for the Ladle recipe-sharing backend
// ABOUTME: Exposes the database layer, HTTP routes, and short-link/shopping-list domain logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![deny(unsafe_code)]

//! # Ladle
//!
//! A recipe-sharing backend: user accounts with JWT auth, recipes composed
//! of validated ingredient association sets, per-user favorite and
//! shopping-cart lists, follow relationships, aggregated plain-text
//! shopping lists, and base62 short links.
//!
//! ## Architecture
//!
//! - **Models**: Data structures for users, recipes, and ingredients
//! - **Database**: Per-domain managers over a shared `SQLite` pool
//! - **Routes**: Thin axum handlers delegating to the managers
//! - **Shortlink**: Base62 codec for compact recipe links
//! - **Shopping list**: Cart aggregation and text rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ladle::config::ServerConfig;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ladle configured with HTTP port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT token issuance and validation, password hashing
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Database access layer
pub mod database;

/// Error types and HTTP error mapping
pub mod errors;

/// Structured logging initialization
pub mod logging;

/// Uploaded image decoding and storage
pub mod media;

/// Data models
pub mod models;

/// HTTP route handlers
pub mod routes;

/// Server assembly and shared resources
pub mod server;

/// Shopping list aggregation and rendering
pub mod shopping_list;

/// Base62 short-link codec
pub mod shortlink;
