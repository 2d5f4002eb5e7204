// ABOUTME: Short-link redirect route resolving base62 codes to recipe pages
// ABOUTME: Unknown codes 404; malformed codes 400
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::shortlink;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

/// Short-link route handler
pub struct ShortLinkRoutes;

impl ShortLinkRoutes {
    /// Create short-link routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/s/:code", get(Self::handle_redirect))
            .with_state(resources)
    }

    /// Handle GET /s/:code - redirect to the recipe page
    async fn handle_redirect(
        State(resources): State<Arc<ServerResources>>,
        Path(code): Path<String>,
    ) -> Result<Response, AppError> {
        let id = shortlink::decode(&code)?;
        let recipe_id = i64::try_from(id)
            .map_err(|_| AppError::not_found(format!("Recipe for code {code}")))?;

        resources
            .database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe for code {code}")))?;

        let location = format!("{}/recipes/{recipe_id}", resources.config.base_url);
        Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
    }
}
