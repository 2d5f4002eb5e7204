// ABOUTME: Recipe CRUD, favorite/cart toggles, shopping list download, and short-link minting
// ABOUTME: Handlers stay thin; validation and composition live in the database managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Recipe routes
//!
//! Reads are public, writes require a bearer token. The favorite and
//! shopping-cart endpoints share one handler pair parameterized by
//! [`ListKind`].

use crate::database::{ListKind, RecipeFilter};
use crate::errors::AppError;
use crate::media;
use crate::models::{Recipe, RecipeIngredient, RecipePayload, RecipeUpdatePayload};
use crate::routes::users::{user_response, UserResponse};
use crate::server::ServerResources;
use crate::shopping_list;
use crate::shortlink;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Full recipe representation with author, ingredients, and viewer flags
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub id: i64,
    /// Recipe author
    pub author: UserResponse,
    /// Recipe name
    pub name: String,
    /// Image path or URL
    pub image: String,
    /// Description text
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Ingredient associations with amounts
    pub ingredients: Vec<RecipeIngredient>,
    /// Whether the acting viewer has favorited this recipe
    pub is_favorited: bool,
    /// Whether this recipe is in the acting viewer's shopping cart
    pub is_in_shopping_cart: bool,
}

/// Query parameters for the recipe listing
#[derive(Debug, Deserialize, Default)]
pub struct RecipeListQuery {
    /// Restrict to recipes by this author
    pub author: Option<Uuid>,
    /// When "1", restrict to the viewer's favorites
    pub is_favorited: Option<String>,
    /// When "1", restrict to the viewer's shopping cart
    pub is_in_shopping_cart: Option<String>,
    /// Maximum recipes to return
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

/// Short-link response; the key is hyphenated on the wire
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortLinkResponse {
    /// Absolute short URL for the recipe
    #[serde(rename = "short-link")]
    pub short_link: String,
}

/// Recipe route handlers
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route(
                "/api/recipes/download_shopping_cart",
                get(Self::handle_download_shopping_cart),
            )
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", patch(Self::handle_update))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .route("/api/recipes/:id/favorite", post(Self::handle_add_favorite))
            .route(
                "/api/recipes/:id/favorite",
                delete(Self::handle_remove_favorite),
            )
            .route(
                "/api/recipes/:id/shopping_cart",
                post(Self::handle_add_to_cart),
            )
            .route(
                "/api/recipes/:id/shopping_cart",
                delete(Self::handle_remove_from_cart),
            )
            .route("/api/recipes/:id/get-link", get(Self::handle_get_link))
            .with_state(resources)
    }

    /// Handle GET /api/recipes - public listing with relationship filters
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        let viewer = resources
            .auth_manager
            .authenticate_optional(&headers)?
            .map(|auth| auth.user_id);

        // Relationship filters only apply for an authenticated viewer
        let favorited_by = viewer.filter(|_| flag_set(query.is_favorited.as_deref()));
        let in_cart_of = viewer.filter(|_| flag_set(query.is_in_shopping_cart.as_deref()));

        let filter = RecipeFilter {
            author: query.author,
            favorited_by,
            in_cart_of,
            limit: query.limit,
            offset: query.offset,
        };

        let recipes = resources.database.recipes().list(&filter).await?;
        let mut responses = Vec::with_capacity(recipes.len());
        for recipe in &recipes {
            responses.push(recipe_response(&resources, recipe, viewer).await?);
        }

        Ok((StatusCode::OK, Json(responses)).into_response())
    }

    /// Handle POST /api/recipes - create a recipe with its ingredient set
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut payload): Json<RecipePayload>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        if media::is_image_data_uri(&payload.image) {
            payload.image = store_recipe_image(&resources, &payload.image).await?;
        }
        let recipe = resources
            .database
            .recipes()
            .create(auth.user_id, &payload)
            .await?;
        info!(recipe_id = recipe.id, author_id = %auth.user_id, "Recipe created");

        let response = recipe_response(&resources, &recipe, Some(auth.user_id)).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let viewer = resources
            .auth_manager
            .authenticate_optional(&headers)?
            .map(|auth| auth.user_id);

        let recipe = resources
            .database
            .recipes()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        let response = recipe_response(&resources, &recipe, viewer).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /api/recipes/:id - author-only partial update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(mut payload): Json<RecipeUpdatePayload>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        if let Some(image) = &payload.image {
            if media::is_image_data_uri(image) {
                payload.image = Some(store_recipe_image(&resources, image).await?);
            }
        }
        let recipe = resources
            .database
            .recipes()
            .update(id, auth.user_id, &payload)
            .await?;
        info!(recipe_id = id, "Recipe updated");

        let response = recipe_response(&resources, &recipe, Some(auth.user_id)).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - author-only
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        resources.database.recipes().delete(id, auth.user_id).await?;
        info!(recipe_id = id, "Recipe deleted");

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/recipes/:id/favorite
    async fn handle_add_favorite(
        state: State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Path<i64>,
    ) -> Result<Response, AppError> {
        Self::handle_list_add(state, headers, path, ListKind::Favorites).await
    }

    /// Handle DELETE /api/recipes/:id/favorite
    async fn handle_remove_favorite(
        state: State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Path<i64>,
    ) -> Result<Response, AppError> {
        Self::handle_list_remove(state, headers, path, ListKind::Favorites).await
    }

    /// Handle POST /api/recipes/:id/shopping_cart
    async fn handle_add_to_cart(
        state: State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Path<i64>,
    ) -> Result<Response, AppError> {
        Self::handle_list_add(state, headers, path, ListKind::Cart).await
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart
    async fn handle_remove_from_cart(
        state: State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Path<i64>,
    ) -> Result<Response, AppError> {
        Self::handle_list_remove(state, headers, path, ListKind::Cart).await
    }

    /// Shared add handler for both per-user lists
    async fn handle_list_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        kind: ListKind,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let minified = resources
            .database
            .user_lists()
            .add(kind, auth.user_id, id)
            .await?;

        Ok((StatusCode::CREATED, Json(minified)).into_response())
    }

    /// Shared remove handler for both per-user lists
    async fn handle_list_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        kind: ListKind,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        resources
            .database
            .user_lists()
            .remove(kind, auth.user_id, id)
            .await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/recipes/download_shopping_cart - aggregated plain-text list
    async fn handle_download_shopping_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let rows = resources
            .database
            .user_lists()
            .cart_ingredient_rows(auth.user_id)
            .await?;

        let entries = shopping_list::aggregate(&rows);
        let body = shopping_list::render_text(&entries);

        let response_headers = [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_cart.txt\"",
            ),
        ];
        Ok((StatusCode::OK, response_headers, body).into_response())
    }

    /// Handle GET /api/recipes/:id/get-link - mint an absolute short URL
    async fn handle_get_link(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .recipes()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        #[allow(clippy::cast_sign_loss)]
        let code = shortlink::encode(id as u64);
        let response = ShortLinkResponse {
            short_link: format!("{}/s/{code}", resources.config.base_url),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

/// Interpret a query flag: "1" and "true" enable it
fn flag_set(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Persist a data-URI recipe image under a fresh name and return its path
async fn store_recipe_image(
    resources: &Arc<ServerResources>,
    data: &str,
) -> Result<String, AppError> {
    media::store_image_data_uri(
        &resources.config.media_dir,
        "recipes",
        &Uuid::new_v4().to_string(),
        data,
    )
    .await
}

/// Build the full representation of a recipe for a given viewer
async fn recipe_response(
    resources: &Arc<ServerResources>,
    recipe: &Recipe,
    viewer: Option<Uuid>,
) -> Result<RecipeResponse, AppError> {
    let author = resources
        .database
        .users()
        .get(recipe.author_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Missing author for recipe {}", recipe.id)))?;

    let ingredients = resources
        .database
        .recipes()
        .get_ingredients(recipe.id)
        .await?;

    let user_lists = resources.database.user_lists();
    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            user_lists
                .contains(ListKind::Favorites, viewer_id, recipe.id)
                .await?,
            user_lists
                .contains(ListKind::Cart, viewer_id, recipe.id)
                .await?,
        ),
        None => (false, false),
    };

    Ok(RecipeResponse {
        id: recipe.id,
        author: user_response(&resources.database.follows(), &author, viewer).await?,
        name: recipe.name.clone(),
        image: recipe.image.clone(),
        text: recipe.text.clone(),
        cooking_time: recipe.cooking_time,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_set() {
        assert!(flag_set(Some("1")));
        assert!(flag_set(Some("true")));
        assert!(!flag_set(Some("0")));
        assert!(!flag_set(Some("yes")));
        assert!(!flag_set(None));
    }
}
