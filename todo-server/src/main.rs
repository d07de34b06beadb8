//! Content repository server for the todo example.
//!
//! This server:
//! - Renders the todo page for a list resource
//! - Exports lists as `.model.json` for client-side hydration
//! - Accepts form posts that create and update item nodes
//! - Serves the embedded browser bundle

mod config;
mod repository;
mod routes;

use anyhow::Context as _;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::RwLock;
use todo_core::model::placeholder_items;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::repository::Repository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let mut repo = Repository::new();
    let items = if config.seed_placeholders {
        placeholder_items()
    } else {
        Vec::new()
    };
    repo.seed_list(&config.resource_path, &config.title, &items)
        .with_context(|| format!("invalid resource path {}", config.resource_path))?;

    let app = routes::router(Arc::new(RwLock::new(repo)));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!("Server running on http://{}", config.addr);
    tracing::info!("Todo page: http://{}{}", config.addr, config.resource_path);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
