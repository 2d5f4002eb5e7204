// ABOUTME: Integration tests for recipe validation, composition, and CRUD
// ABOUTME: Covers full-replace ingredient updates, author-only mutation, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_ingredient, create_user, recipe_payload, test_database};
use ladle::database::RecipesManager;
use ladle::errors::ErrorCode;
use ladle::models::{IngredientAmount, RecipePayload, RecipeUpdatePayload};

#[tokio::test]
async fn test_create_recipe_with_ingredients() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let flour = create_ingredient(&database, "flour", "g").await;
    let milk = create_ingredient(&database, "milk", "ml").await;

    let payload = recipe_payload(
        "Pancakes",
        vec![
            IngredientAmount {
                id: flour.id,
                amount: 200,
            },
            IngredientAmount {
                id: milk.id,
                amount: 300,
            },
        ],
    );

    let recipe = database.recipes().create(author.id, &payload).await.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.author_id, author.id);

    let ingredients = database.recipes().get_ingredients(recipe.id).await.unwrap();
    assert_eq!(ingredients.len(), 2);
    assert_eq!(ingredients[0].id, flour.id);
    assert_eq!(ingredients[0].amount, 200);
    assert_eq!(ingredients[1].id, milk.id);
    assert_eq!(ingredients[1].amount, 300);
}

#[tokio::test]
async fn test_create_rejects_empty_ingredient_list() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;

    let payload = recipe_payload("Nothing", vec![]);
    let err = database
        .recipes()
        .create(author.id, &payload)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyIngredientList);
}

#[test]
fn test_absent_ingredients_key_validates_as_empty_list() {
    let payload: RecipePayload = serde_json::from_value(serde_json::json!({
        "name": "Keyless",
        "image": "recipes/x.png",
        "text": "n/a",
        "cooking_time": 5,
    }))
    .unwrap();

    let err = RecipesManager::validate_ingredients(&payload.ingredients).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyIngredientList);
}

#[tokio::test]
async fn test_create_rejects_duplicate_ingredients() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = recipe_payload(
        "Salty",
        vec![
            IngredientAmount {
                id: salt.id,
                amount: 1,
            },
            IngredientAmount {
                id: salt.id,
                amount: 2,
            },
        ],
    );

    let err = database
        .recipes()
        .create(author.id, &payload)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateIngredient);
    assert_eq!(err.details["ingredient_ids"], serde_json::json!([salt.id]));
}

#[tokio::test]
async fn test_create_rejects_zero_amount() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let salt = create_ingredient(&database, "salt", "g").await;

    let payload = recipe_payload(
        "Flat",
        vec![IngredientAmount {
            id: salt.id,
            amount: 0,
        }],
    );

    let err = database
        .recipes()
        .create(author.id, &payload)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_create_rejects_unknown_ingredient() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;

    let payload = recipe_payload(
        "Ghost",
        vec![IngredientAmount {
            id: 9999,
            amount: 1,
        }],
    );

    let err = database
        .recipes()
        .create(author.id, &payload)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // Nothing committed
    let recipes = database
        .recipes()
        .list(&ladle::database::RecipeFilter::default())
        .await
        .unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_update_replaces_ingredient_set() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let flour = create_ingredient(&database, "flour", "g").await;
    let milk = create_ingredient(&database, "milk", "ml").await;
    let sugar = create_ingredient(&database, "sugar", "g").await;

    let payload = recipe_payload(
        "Dough",
        vec![
            IngredientAmount {
                id: flour.id,
                amount: 500,
            },
            IngredientAmount {
                id: milk.id,
                amount: 250,
            },
        ],
    );
    let recipe = database.recipes().create(author.id, &payload).await.unwrap();

    let update = RecipeUpdatePayload {
        ingredients: Some(vec![IngredientAmount {
            id: sugar.id,
            amount: 50,
        }]),
        ..RecipeUpdatePayload::default()
    };
    database
        .recipes()
        .update(recipe.id, author.id, &update)
        .await
        .unwrap();

    // The prior set {flour, milk} is gone wholesale
    let ingredients = database.recipes().get_ingredients(recipe.id).await.unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0].id, sugar.id);
    assert_eq!(ingredients[0].amount, 50);
}

#[tokio::test]
async fn test_update_without_ingredients_leaves_set_untouched() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let flour = create_ingredient(&database, "flour", "g").await;

    let payload = recipe_payload(
        "Bread",
        vec![IngredientAmount {
            id: flour.id,
            amount: 400,
        }],
    );
    let recipe = database.recipes().create(author.id, &payload).await.unwrap();

    let update = RecipeUpdatePayload {
        name: Some("Sourdough".to_owned()),
        ..RecipeUpdatePayload::default()
    };
    let updated = database
        .recipes()
        .update(recipe.id, author.id, &update)
        .await
        .unwrap();
    assert_eq!(updated.name, "Sourdough");

    let ingredients = database.recipes().get_ingredients(recipe.id).await.unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0].amount, 400);
}

#[tokio::test]
async fn test_update_with_empty_list_is_rejected() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let recipe = common::create_recipe(&database, &author, "Soup").await;

    let update = RecipeUpdatePayload {
        ingredients: Some(vec![]),
        ..RecipeUpdatePayload::default()
    };
    let err = database
        .recipes()
        .update(recipe.id, author.id, &update)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyIngredientList);

    // Prior set untouched after the rejected update
    let ingredients = database.recipes().get_ingredients(recipe.id).await.unwrap();
    assert_eq!(ingredients.len(), 1);
}

#[tokio::test]
async fn test_update_by_non_author_is_denied() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let intruder = create_user(&database, "intruder").await;
    let recipe = common::create_recipe(&database, &author, "Stew").await;

    let update = RecipeUpdatePayload {
        name: Some("Hijacked".to_owned()),
        ..RecipeUpdatePayload::default()
    };
    let err = database
        .recipes()
        .update(recipe.id, intruder.id, &update)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_delete_by_non_author_is_denied() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;
    let intruder = create_user(&database, "intruder").await;
    let recipe = common::create_recipe(&database, &author, "Pie").await;

    let err = database
        .recipes()
        .delete(recipe.id, intruder.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    database.recipes().delete(recipe.id, author.id).await.unwrap();
    assert!(database.recipes().get(recipe.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_recipe_is_not_found() {
    let database = test_database().await;
    let author = create_user(&database, "author").await;

    let err = database
        .recipes()
        .update(424_242, author.id, &RecipeUpdatePayload::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_list_filters_by_author() {
    let database = test_database().await;
    let alice = create_user(&database, "alice").await;
    let bob = create_user(&database, "bob").await;
    common::create_recipe(&database, &alice, "Alice dish").await;
    common::create_recipe(&database, &bob, "Bob dish").await;

    let filter = ladle::database::RecipeFilter {
        author: Some(alice.id),
        ..ladle::database::RecipeFilter::default()
    };
    let recipes = database.recipes().list(&filter).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].author_id, alice.id);
}
