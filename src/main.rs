use std::sync::Arc;

use todo_api::{
    application::auth_service::{AuthService, SystemClock},
    config::{Config, DEFAULT_JWT_SECRET},
    http::routing::{self, AppState},
    infrastructure::token_registry::TokenRegistry,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    if config.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set, using the development default");
    }

    let auth = AuthService::new(config.credentials, &config.jwt_secret, TokenRegistry::new(), Arc::new(SystemClock));
    let router = routing::app(AppState::in_memory(auth));

    let addr = config.bind_addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
