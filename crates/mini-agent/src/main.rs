use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use mini_agent::config::Settings;
use mini_agent::services::{ConversationAgent, ConversationStore, GeminiClient};
use mini_agent::{build_router, telemetry, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    telemetry::init_telemetry();

    info!("🚀 Starting Mini-Agent...");

    // Load configuration; a missing API key stops us here
    let settings = Settings::load()?;
    info!("✅ Configuration loaded (model: {})", settings.gemini.model);

    // Initialize services
    let provider = Arc::new(GeminiClient::new(settings.gemini.clone())?);
    let agent = Arc::new(ConversationAgent::new(provider, settings.persona.clone()));
    let store = Arc::new(ConversationStore::new(
        settings.conversation.max_turns_per_user,
    ));

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    // Build router
    let app = build_router(AppState::new(store, agent, settings));

    info!("🎯 Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
