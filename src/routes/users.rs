// ABOUTME: User profile, avatar upload, and follow/subscription routes
// ABOUTME: Viewer-dependent fields take the acting user explicitly, never implicit request state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! User routes
//!
//! Profile reads are public; avatar and subscription management require a
//! bearer token. `is_subscribed` is computed against the explicitly passed
//! viewer.

use crate::database::FollowsManager;
use crate::errors::AppError;
use crate::media;
use crate::models::{RecipeMinified, User};
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Public representation of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Public username
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the acting viewer follows this user
    pub is_subscribed: bool,
    /// Relative media path of the avatar, if any
    pub avatar: Option<String>,
}

/// A followee with their recent recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct UserWithRecipesResponse {
    /// The user
    #[serde(flatten)]
    pub user: UserResponse,
    /// Nested recipe list, truncated to `recipes_limit`
    pub recipes: Vec<RecipeMinified>,
    /// Count of nested recipes returned
    pub recipes_count: usize,
}

/// Query parameters for the subscriptions listing
#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionsQuery {
    /// Maximum followees to return
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
    /// Truncates each followee's nested recipe array
    pub recipes_limit: Option<u32>,
}

/// Query parameters for the user listing
#[derive(Debug, Deserialize, Default)]
pub struct ListUsersQuery {
    /// Maximum users to return
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

/// Request body for the avatar upload
#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    /// Data-URI encoded image: `data:image/<ext>;base64,<payload>`
    pub avatar: String,
}

/// Response for the avatar upload
#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarResponse {
    /// Stored relative media path
    pub avatar: String,
}

/// User route handlers
pub struct UserRoutes;

impl UserRoutes {
    /// Create user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", get(Self::handle_list))
            .route("/api/users/me", get(Self::handle_me))
            .route("/api/users/me/avatar", put(Self::handle_set_avatar))
            .route("/api/users/me/avatar", delete(Self::handle_delete_avatar))
            .route("/api/users/subscriptions", get(Self::handle_subscriptions))
            .route("/api/users/:id", get(Self::handle_get))
            .route("/api/users/:id/subscribe", post(Self::handle_subscribe))
            .route("/api/users/:id/subscribe", delete(Self::handle_unsubscribe))
            .with_state(resources)
    }

    /// Handle GET /api/users - public listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListUsersQuery>,
    ) -> Result<Response, AppError> {
        let viewer = resources
            .auth_manager
            .authenticate_optional(&headers)?
            .map(|auth| auth.user_id);

        let users = resources
            .database
            .users()
            .list(query.limit.unwrap_or(20), query.offset.unwrap_or(0))
            .await?;

        let follows = resources.database.follows();
        let mut responses = Vec::with_capacity(users.len());
        for user in &users {
            responses.push(user_response(&follows, user, viewer).await?);
        }

        Ok((StatusCode::OK, Json(responses)).into_response())
    }

    /// Handle GET /api/users/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let response = user_response(&resources.database.follows(), &user, None).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id - public profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let viewer = resources
            .auth_manager
            .authenticate_optional(&headers)?
            .map(|auth| auth.user_id);

        let user = resources
            .database
            .users()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        let response = user_response(&resources.database.follows(), &user, viewer).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/users/me/avatar - data-URI upload
    async fn handle_set_avatar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<AvatarRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let relative_path = media::store_image_data_uri(
            &resources.config.media_dir,
            "users",
            &auth.user_id.to_string(),
            &body.avatar,
        )
        .await?;

        resources
            .database
            .users()
            .set_avatar(auth.user_id, Some(&relative_path))
            .await?;
        info!(user_id = %auth.user_id, path = %relative_path, "Avatar updated");

        let response = AvatarResponse {
            avatar: relative_path,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/me/avatar
    async fn handle_delete_avatar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        if let Some(relative_path) = &user.avatar {
            let full_path = resources.config.media_dir.join(relative_path);
            // A missing file is not an error; the stored path is cleared regardless
            let _ = tokio::fs::remove_file(full_path).await;
        }

        resources
            .database
            .users()
            .set_avatar(auth.user_id, None)
            .await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/users/:id/subscribe - follow a user
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        resources.database.follows().follow(auth.user_id, id).await?;

        let followee = resources
            .database
            .users()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        let response =
            user_with_recipes_response(&resources, &followee, Some(auth.user_id), None).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe - unfollow a user
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;
        resources
            .database
            .follows()
            .unfollow(auth.user_id, id)
            .await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/users/subscriptions - followees with nested recipes
    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SubscriptionsQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_manager.authenticate(&headers)?;

        let followees = resources
            .database
            .follows()
            .followees(
                auth.user_id,
                query.limit.unwrap_or(20),
                query.offset.unwrap_or(0),
            )
            .await?;

        let mut responses = Vec::with_capacity(followees.len());
        for followee in &followees {
            responses.push(
                user_with_recipes_response(
                    &resources,
                    followee,
                    Some(auth.user_id),
                    query.recipes_limit,
                )
                .await?,
            );
        }

        Ok((StatusCode::OK, Json(responses)).into_response())
    }
}

/// Build the public representation of a user for a given viewer
pub(crate) async fn user_response(
    follows: &FollowsManager,
    user: &User,
    viewer: Option<Uuid>,
) -> Result<UserResponse, AppError> {
    let is_subscribed = match viewer {
        Some(viewer_id) if viewer_id != user.id => {
            follows.is_following(viewer_id, user.id).await?
        }
        _ => false,
    };

    Ok(UserResponse {
        id: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed,
        avatar: user.avatar.clone(),
    })
}

/// Build a followee representation with nested, truncated recipes
async fn user_with_recipes_response(
    resources: &Arc<ServerResources>,
    user: &User,
    viewer: Option<Uuid>,
    recipes_limit: Option<u32>,
) -> Result<UserWithRecipesResponse, AppError> {
    let recipes = resources
        .database
        .recipes()
        .list_by_author(user.id, recipes_limit.unwrap_or(u32::MAX))
        .await?;

    let minified: Vec<RecipeMinified> = recipes.iter().map(RecipeMinified::from).collect();
    let recipes_count = minified.len();

    Ok(UserWithRecipesResponse {
        user: user_response(&resources.database.follows(), user, viewer).await?,
        recipes: minified,
        recipes_count,
    })
}

