// ABOUTME: End-to-end route tests driving the assembled router with in-memory requests
// ABOUTME: Covers registration, login, recipe CRUD, toggles, short links, and the cart download
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{create_ingredient, test_database};
use ladle::auth::AuthManager;
use ladle::config::{AuthConfig, DatabaseUrl, Environment, ServerConfig};
use ladle::database::Database;
use ladle::server::{LadleServer, ServerResources};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_SECRET: &[u8] = b"test-only-secret";

fn test_config(media_dir: std::path::PathBuf) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: DatabaseUrl::Memory,
        base_url: "http://testserver".to_owned(),
        media_dir,
        auth: AuthConfig {
            jwt_secret: "test-only-secret".to_owned(),
            jwt_expiry_hours: 1,
        },
        environment: Environment::Testing,
    }
}

async fn test_app() -> (Router, Database, tempfile::TempDir) {
    let database = test_database().await;
    let media = tempfile::tempdir().unwrap();
    let resources = Arc::new(ServerResources::new(
        database.clone(),
        AuthManager::new(TEST_SECRET, 1),
        Arc::new(test_config(media.path().to_path_buf())),
    ));
    (LadleServer::router(resources), database, media)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a user and return a bearer token for them
async fn register_and_login(app: &Router, email: &str, username: &str) -> String {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "username": username,
            "first_name": "Test",
            "last_name": "User",
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _database, _media) = test_app().await;
    let (status, body) = send_json(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (app, _database, _media) = test_app().await;
    register_and_login(&app, "dup@example.com", "first").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "dup@example.com",
            "username": "second",
            "first_name": "Test",
            "last_name": "User",
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (app, _database, _media) = test_app().await;
    register_and_login(&app, "who@example.com", "who").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "who@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recipe_create_requires_auth() {
    let (app, database, _media) = test_app().await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = json!({
        "name": "Unauthorized",
        "image": "recipes/x.png",
        "text": "n/a",
        "cooking_time": 5,
        "ingredients": [{ "id": salt.id, "amount": 1 }],
    });
    let (status, body) = send_json(&app, "POST", "/api/recipes", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_recipe_lifecycle_over_http() {
    let (app, database, _media) = test_app().await;
    let token = register_and_login(&app, "cook@example.com", "cook").await;
    let flour = create_ingredient(&database, "flour", "g").await;

    let payload = json!({
        "name": "Bread",
        "image": "recipes/bread.png",
        "text": "Bake it.",
        "cooking_time": 90,
        "ingredients": [{ "id": flour.id, "amount": 500 }],
    });
    let (status, body) =
        send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let recipe_id = body["id"].as_i64().unwrap();
    assert_eq!(body["author"]["username"], "cook");
    assert_eq!(body["is_favorited"], false);
    assert_eq!(body["ingredients"][0]["amount"], 500);

    // Public read without auth
    let (status, body) =
        send_json(&app, "GET", &format!("/api/recipes/{recipe_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Bread");

    // Partial update keeps the ingredient set
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        Some(json!({ "name": "Sourdough" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sourdough");
    assert_eq!(body["ingredients"][0]["id"], flour.id);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        send_json(&app, "GET", &format!("/api/recipes/{recipe_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_toggle_over_http() {
    let (app, database, _media) = test_app().await;
    let token = register_and_login(&app, "fan@example.com", "fan").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = json!({
        "name": "Pasta",
        "image": "recipes/pasta.png",
        "text": "Boil.",
        "cooking_time": 12,
        "ingredients": [{ "id": salt.id, "amount": 3 }],
    });
    let (_, body) = send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    let recipe_id = body["id"].as_i64().unwrap();

    let uri = format!("/api/recipes/{recipe_id}/favorite");
    let (status, body) = send_json(&app, "POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Pasta");

    let (status, body) = send_json(&app, "POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // The viewer flag shows up in reads
    let (_, body) = send_json(
        &app,
        "GET",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["is_favorited"], true);

    let (status, _) = send_json(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_short_link_mint_and_redirect() {
    let (app, database, _media) = test_app().await;
    let token = register_and_login(&app, "link@example.com", "link").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = json!({
        "name": "Linked",
        "image": "recipes/l.png",
        "text": "n/a",
        "cooking_time": 1,
        "ingredients": [{ "id": salt.id, "amount": 1 }],
    });
    let (_, body) = send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    let recipe_id = body["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/recipes/{recipe_id}/get-link"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let link = body["short-link"].as_str().unwrap();
    let code = link.rsplit('/').next().unwrap();
    assert!(link.starts_with("http://testserver/s/"));

    let request = Request::builder()
        .method("GET")
        .uri(format!("/s/{code}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("http://testserver/recipes/{recipe_id}")
    );

    // Malformed code is a client error, unknown code a 404
    let (status, _) = send_json(&app, "GET", "/s/not~valid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send_json(&app, "GET", "/s/zzzzzz", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_shopping_cart_as_attachment() {
    let (app, database, _media) = test_app().await;
    let token = register_and_login(&app, "shopper@example.com", "shopper").await;
    let flour = create_ingredient(&database, "flour", "g").await;

    let payload = json!({
        "name": "Loaf",
        "image": "recipes/loaf.png",
        "text": "Bake.",
        "cooking_time": 60,
        "ingredients": [{ "id": flour.id, "amount": 300 }],
    });
    let (_, body) = send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    let recipe_id = body["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/recipes/{recipe_id}/shopping_cart"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let request = Request::builder()
        .method("GET")
        .uri("/api/recipes/download_shopping_cart")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("shopping_cart.txt"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text, "1. Flour (g) — 300\n");
}

#[tokio::test]
async fn test_subscription_flow_over_http() {
    let (app, database, _media) = test_app().await;
    let follower_token = register_and_login(&app, "f@example.com", "follower").await;
    let _author_token = register_and_login(&app, "a@example.com", "writer").await;

    let author = database
        .users()
        .get_by_email("a@example.com")
        .await
        .unwrap()
        .unwrap();
    common::create_recipe(&database, &author, "Authored dish").await;

    let uri = format!("/api/users/{}/subscribe", author.id);
    let (status, body) = send_json(&app, "POST", &uri, Some(&follower_token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "writer");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 1);

    let (status, body) = send_json(&app, "POST", &uri, Some(&follower_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Self-follow is a conflict, not a validation error
    let follower = database
        .users()
        .get_by_email("f@example.com")
        .await
        .unwrap()
        .unwrap();
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/users/{}/subscribe", follower.id),
        Some(&follower_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SELF_FOLLOW_NOT_ALLOWED");

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/users/subscriptions?recipes_limit=0",
        Some(&follower_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["recipes_count"], 0);

    let (status, _) = send_json(&app, "DELETE", &uri, Some(&follower_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_ingredient_search_over_http_is_prefix_only() {
    let (app, database, _media) = test_app().await;
    create_ingredient(&database, "salt", "g").await;
    create_ingredient(&database, "sea salt", "g").await;
    create_ingredient(&database, "basalt", "g").await;

    let (status, body) = send_json(&app, "GET", "/api/ingredients?name=salt", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["salt"]);
}

#[tokio::test]
async fn test_recipe_image_uploaded_as_data_uri() {
    let (app, database, media) = test_app().await;
    let token = register_and_login(&app, "photo@example.com", "photo").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = json!({
        "name": "Pictured",
        "image": "data:image/png;base64,aGVsbG8=",
        "text": "n/a",
        "cooking_time": 5,
        "ingredients": [{ "id": salt.id, "amount": 1 }],
    });
    let (status, body) =
        send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let recipe_id = body["id"].as_i64().unwrap();

    // The stored value is a relative media path, not the data URI
    let image = body["image"].as_str().unwrap();
    assert!(image.starts_with("recipes/"));
    assert!(image.ends_with(".png"));
    let bytes = std::fs::read(media.path().join(image)).unwrap();
    assert_eq!(bytes, b"hello");

    // Updating with a new data URI replaces the stored image
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        Some(json!({ "image": "data:image/jpeg;base64,d29ybGQ=" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = body["image"].as_str().unwrap();
    assert!(updated.ends_with(".jpeg"));
    assert_ne!(updated, image);

    // A plain path in an update passes through untouched
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        Some(json!({ "image": "recipes/external.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"], "recipes/external.png");
}

#[tokio::test]
async fn test_recipe_with_malformed_image_data_uri_is_rejected() {
    let (app, database, _media) = test_app().await;
    let token = register_and_login(&app, "badpic@example.com", "badpic").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = json!({
        "name": "Broken",
        "image": "data:image/png;base64,!!!",
        "text": "n/a",
        "cooking_time": 5,
        "ingredients": [{ "id": salt.id, "amount": 1 }],
    });
    let (status, body) =
        send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_recipe_without_ingredients_key_fails_validation() {
    let (app, _database, _media) = test_app().await;
    let token = register_and_login(&app, "keyless@example.com", "keyless").await;

    let payload = json!({
        "name": "Missing key",
        "image": "recipes/x.png",
        "text": "n/a",
        "cooking_time": 5,
    });
    let (status, body) =
        send_json(&app, "POST", "/api/recipes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_INGREDIENT_LIST");
}

#[tokio::test]
async fn test_avatar_upload_and_delete() {
    let (app, _database, _media) = test_app().await;
    let token = register_and_login(&app, "pic@example.com", "pic").await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/users/me/avatar",
        Some(&token),
        Some(json!({ "avatar": "data:image/png;base64,aGVsbG8=" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let avatar = body["avatar"].as_str().unwrap();
    assert!(avatar.ends_with(".png"));

    let (status, body) = send_json(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avatar"].as_str().unwrap(), avatar);

    let (status, _) = send_json(&app, "DELETE", "/api/users/me/avatar", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_json(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert!(body["avatar"].is_null());

    // Rejected payloads leave the avatar untouched
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/users/me/avatar",
        Some(&token),
        Some(json!({ "avatar": "not a data uri" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
