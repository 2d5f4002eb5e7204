// ABOUTME: Integration tests for follow relationship management
// ABOUTME: Covers self-follow rejection, duplicate follows, and followee listing order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_user, test_database};
use ladle::errors::ErrorCode;
use uuid::Uuid;

#[tokio::test]
async fn test_follow_and_unfollow() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;
    let bob = create_user(&database, "bob").await;

    database.follows().follow(alice.id, bob.id).await.unwrap();
    assert!(database.follows().is_following(alice.id, bob.id).await.unwrap());
    // Follows are directional
    assert!(!database.follows().is_following(bob.id, alice.id).await.unwrap());

    database.follows().unfollow(alice.id, bob.id).await.unwrap();
    assert!(!database.follows().is_following(alice.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn test_self_follow_is_rejected() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;

    let err = database.follows().follow(alice.id, alice.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SelfFollowNotAllowed);
}

#[tokio::test]
async fn test_double_follow_conflicts() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;
    let bob = create_user(&database, "bob").await;

    database.follows().follow(alice.id, bob.id).await.unwrap();
    let err = database.follows().follow(alice.id, bob.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_follow_missing_user_is_not_found() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;

    let err = database
        .follows()
        .follow(alice.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_unfollow_absent_is_not_found() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;
    let bob = create_user(&database, "bob").await;

    let err = database.follows().unfollow(alice.id, bob.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_followees_listed_in_follow_order() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;
    let bob = create_user(&database, "bob").await;
    let carol = create_user(&database, "carol").await;

    database.follows().follow(alice.id, bob.id).await.unwrap();
    database.follows().follow(alice.id, carol.id).await.unwrap();

    let followees = database.follows().followees(alice.id, 20, 0).await.unwrap();
    assert_eq!(followees.len(), 2);
    assert_eq!(followees[0].id, bob.id);
    assert_eq!(followees[1].id, carol.id);

    let page = database.follows().followees(alice.id, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, carol.id);
}
