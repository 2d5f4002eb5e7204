// ABOUTME: Registration and login routes issuing JWT access tokens
// ABOUTME: Passwords are bcrypt-hashed before persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address, unique across accounts
    pub email: String,
    /// Public username, unique across accounts
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Registration response with the new account's identity
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// New user id
    pub id: String,
    /// Registered email
    pub email: String,
    /// Registered username
    pub username: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Login response with token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type, always "Bearer"
    pub token_type: String,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        if body.email.trim().is_empty() || !body.email.contains('@') {
            return Err(AppError::invalid_input("Invalid email address"));
        }
        if body.username.trim().is_empty() {
            return Err(AppError::invalid_input("Username must not be empty"));
        }
        if body.password.len() < 8 {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&body.password)?;
        let user = User::new(
            body.email,
            body.username,
            body.first_name,
            body.last_name,
            password_hash,
        );

        resources.database.users().create(&user).await?;
        info!(user_id = %user.id, "User registered");

        let response = RegisterResponse {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .users()
            .get_by_email(&body.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !verify_password(&body.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let access_token = resources.auth_manager.generate_token(&user)?;
        info!(user_id = %user.id, "User logged in");

        let response = LoginResponse {
            access_token,
            token_type: "Bearer".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
