//! Palaver webhook server.
//!
//! Loads `palaver.toml`, binds the configured platform intakes, and serves
//! the `/hooks/{platform}` webhook routes.

mod http;
mod state;
mod telemetry;
mod turn;

use std::path::Path;

use crate::http::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let config = palaver_platforms::config::load_config(Path::new("palaver.toml")).await;
    let state = AppState::from_config(&config);

    tracing::info!(
        bind_addr = %state.bind_addr,
        platforms = ?state.hooks.names(),
        "starting webhook server"
    );

    let listener = tokio::net::TcpListener::bind(&state.bind_addr).await?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
