// ABOUTME: Media storage for images submitted as base64 data URIs
// ABOUTME: Decodes data:image payloads and persists them under the media directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Uploaded image handling
//!
//! Avatars and recipe images arrive as `data:image/<ext>;base64,<payload>`
//! strings. The MIME subtype becomes the file extension and the decoded
//! bytes land under the configured media directory; responses carry the
//! stored relative path.

use crate::errors::{AppError, AppResult};
use base64::Engine;
use std::path::Path;

/// Whether a submitted image value is a data URI rather than a stored path
#[must_use]
pub fn is_image_data_uri(value: &str) -> bool {
    value.starts_with("data:image/")
}

/// Split a `data:image/<ext>;base64,<payload>` string into extension and bytes
///
/// # Errors
///
/// `InvalidInput` when the value is not an image data URI, the subtype is
/// missing or non-alphanumeric, or the payload is not valid base64
pub fn parse_image_data_uri(data: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = data
        .strip_prefix("data:image/")
        .ok_or_else(|| AppError::invalid_input("Image must be a data:image URI"))?;

    let (subtype, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::invalid_input("Image data URI must be base64 encoded"))?;

    if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::invalid_input("Invalid image subtype"));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AppError::invalid_input(format!("Invalid base64 payload: {e}")))?;

    Ok((subtype.to_owned(), bytes))
}

/// Decode a data URI and persist it as `{subdir}/{stem}.{ext}`
///
/// Returns the stored relative path.
///
/// # Errors
///
/// `InvalidInput` for a malformed data URI, `StorageError` when the file
/// cannot be written
pub async fn store_image_data_uri(
    media_dir: &Path,
    subdir: &str,
    stem: &str,
    data: &str,
) -> AppResult<String> {
    let (extension, bytes) = parse_image_data_uri(data)?;

    let relative_path = format!("{subdir}/{stem}.{extension}");
    let full_path = media_dir.join(&relative_path);
    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create media dir: {e}")))?;
    }
    tokio::fs::write(&full_path, bytes)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write image: {e}")))?;

    Ok(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_data_uri() {
        let (ext, bytes) = parse_image_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(ext, "png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_parse_image_data_uri_rejects_non_image() {
        assert!(parse_image_data_uri("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(parse_image_data_uri("plain string").is_err());
        assert!(parse_image_data_uri("data:image/png;base64,!!!").is_err());
        assert!(parse_image_data_uri("data:image/;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_is_image_data_uri() {
        assert!(is_image_data_uri("data:image/png;base64,aGVsbG8="));
        assert!(!is_image_data_uri("recipes/stored.png"));
    }

    #[tokio::test]
    async fn test_store_image_writes_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_image_data_uri(dir.path(), "recipes", "abc", "data:image/png;base64,aGVsbG8=")
            .await
            .unwrap();

        assert_eq!(path, "recipes/abc.png");
        let bytes = tokio::fs::read(dir.path().join(&path)).await.unwrap();
        assert_eq!(bytes, b"hello");
    }
}
