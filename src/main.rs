use std::sync::Arc;

use anyhow::Context;
use book_chat::{config::AppConfig, routes, shutdown::shutdown_signal, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_chat=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let state = Arc::new(
        AppState::from_config(&config)
            .await
            .context("Failed to connect to the database")?,
    );

    let app = routes::create_router().with_state(state.clone());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(model = %config.model, "Backend server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    tracing::info!("server stopped");
    Ok(())
}
