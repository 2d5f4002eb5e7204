// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment-driven configuration for the Ladle server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

//! Configuration module for the Ladle server
//!
//! Centralized configuration management, loaded from environment variables at
//! startup and shared through `ServerResources`.

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, ServerConfig};
