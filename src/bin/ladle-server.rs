// ABOUTME: Main server binary wiring configuration, database, auth, and routes
// ABOUTME: Loads environment config, bootstraps the schema, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle contributors

#![deny(unsafe_code)]

//! Ladle recipe-sharing server

use anyhow::Result;
use clap::Parser;
use ladle::auth::AuthManager;
use ladle::config::ServerConfig;
use ladle::database::Database;
use ladle::logging;
use ladle::server::{LadleServer, ServerResources};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ladle-server")]
#[command(about = "Recipe-sharing backend server")]
struct Args {
    /// Override the HTTP port from the environment
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }

    logging::init_from_env()?;
    info!("Configuration loaded: {}", config.summary());

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        i64::from(config.auth.jwt_expiry_hours),
    );

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));

    LadleServer::new(resources).run(port).await?;
    Ok(())
}
