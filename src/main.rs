use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use filegate::api::{self, AppState};
use filegate::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("filegate=info")),
        )
        .init();

    let mut config = ServerConfig::parse();

    // Canonicalize once so every resolved identifier sits under a real,
    // absolute root.
    config.root = config.root.canonicalize().with_context(|| {
        format!(
            "Sandbox root {} does not exist or is not readable",
            config.root.display()
        )
    })?;
    anyhow::ensure!(
        config.root.is_dir(),
        "Sandbox root {} is not a directory",
        config.root.display()
    );

    let bind = config.bind;
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!(
        addr = %bind,
        root = %state.sandbox.root().display(),
        "file API service listening"
    );

    axum::serve(listener, api::router(state))
        .await
        .context("Server error")?;
    Ok(())
}
