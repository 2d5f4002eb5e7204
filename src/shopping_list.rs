// ABOUTME: Shopping list aggregation over cart recipe ingredient rows
// ABOUTME: Sums amounts per ingredient and renders the downloadable text body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Shopping list aggregation
//!
//! The database layer supplies one row per `(recipe, ingredient, amount)`
//! association across every recipe in the user's cart. Aggregation groups the
//! rows by ingredient identity, sums the amounts, and orders the result by
//! ingredient name (case-insensitive, ties stable in input order). Rendering
//! produces the plain-text attachment body, one numbered line per ingredient.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw `(recipe, ingredient, amount)` association row from the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartIngredientRow {
    /// Ingredient identity used for grouping
    pub ingredient_id: i64,
    /// Ingredient display name
    pub name: String,
    /// Measurement unit, e.g. "g" or "ml"
    pub measurement_unit: String,
    /// Amount required by a single recipe
    pub amount: i64,
}

/// One aggregated shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Ingredient display name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Total amount summed across every cart recipe
    pub total_amount: i64,
}

/// Aggregate raw cart rows into a sorted shopping list.
///
/// The same ingredient appearing in multiple recipes (or multiple times in
/// one) accumulates into a single entry. An empty cart yields an empty list.
#[must_use]
pub fn aggregate(rows: &[CartIngredientRow]) -> Vec<ShoppingListEntry> {
    let mut entries: Vec<ShoppingListEntry> = Vec::new();
    let mut index_by_ingredient: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        match index_by_ingredient.get(&row.ingredient_id) {
            Some(&idx) => entries[idx].total_amount += row.amount,
            None => {
                index_by_ingredient.insert(row.ingredient_id, entries.len());
                entries.push(ShoppingListEntry {
                    name: row.name.clone(),
                    measurement_unit: row.measurement_unit.clone(),
                    total_amount: row.amount,
                });
            }
        }
    }

    // Stable sort keeps equal names in first-seen order
    entries.sort_by_key(|e| e.name.to_lowercase());
    entries
}

/// Render the aggregated list as the downloadable text body.
///
/// Format per line: `"{n}. {Name} ({unit}) — {total}"` with 1-based numbering
/// and title-cased names. Non-empty output ends with a single newline; an
/// empty list renders as an empty string.
#[must_use]
pub fn render_text(entries: &[ShoppingListEntry]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. {} ({}) — {}",
                i + 1,
                title_case(&entry.name),
                entry.measurement_unit,
                entry.total_amount
            )
        })
        .collect();

    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    body
}

/// Uppercase the first letter of each word, lowercase the rest.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
