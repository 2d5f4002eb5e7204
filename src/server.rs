// ABOUTME: Centralized resource container and HTTP server assembly
// ABOUTME: Merges per-domain routers and serves them over axum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! # Server assembly
//!
//! `ServerResources` is the dependency-injection container shared by every
//! route handler: database handle, auth manager, and configuration. The
//! server merges the per-domain routers and serves them with request tracing
//! and permissive CORS.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::routes::{
    AuthRoutes, HealthRoutes, IngredientRoutes, RecipeRoutes, ShortLinkRoutes, UserRoutes,
};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Centralized resource container for dependency injection
pub struct ServerResources {
    /// Shared database handle
    pub database: Database,
    /// JWT and password authentication
    pub auth_manager: AuthManager,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        Self {
            database,
            auth_manager,
            config,
        }
    }
}

/// The Ladle HTTP server
pub struct LadleServer {
    resources: Arc<ServerResources>,
}

impl LadleServer {
    /// Create a new server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(UserRoutes::routes(resources.clone()))
            .merge(IngredientRoutes::routes(resources.clone()))
            .merge(RecipeRoutes::routes(resources.clone()))
            .merge(ShortLinkRoutes::routes(resources))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self, port: u16) -> AppResult<()> {
        let router = Self::router(self.resources);

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind port {port}: {e}")))?;

        info!("HTTP server listening on port {port}");

        axum::serve(listener, router)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}
