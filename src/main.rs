use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use knowledge_chat::{
    config::Config,
    routes,
    services::answer_client::HttpAnswerClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let client = HttpAnswerClient::new(config.answer.clone())
        .context("failed to build answering service client")?;
    tracing::info!(endpoint = client.endpoint(), "answering service configured");

    let state = Arc::new(AppState::new(config.session_ttl, Arc::new(client)));
    let purge_every = (config.session_ttl / 2).max(Duration::from_secs(1));
    let _purger = state.sessions.spawn_purger(purge_every);

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router(&config.static_dir)
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("knowledge chat running at http://{}", config.bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
