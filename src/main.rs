//! PrayerGlow premium gateway server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prayerglow::adapters::auth::identity_resolver_from_config;
use prayerglow::adapters::http::middleware::{SubscriptionState, UpgradeSettings};
use prayerglow::adapters::http::{api_router, shutdown_signal, PremiumAppState};
use prayerglow::adapters::subscription::InMemorySubscriptionStore;
use prayerglow::config::{AppConfig, ConfigError};
use prayerglow::domain::premium::AccessPolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    if let Err(e) = config.validate().map_err(ConfigError::from) {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    tracing::info!(
        environment = ?config.server.environment,
        identity_mode = ?config.auth.mode,
        "PrayerGlow starting"
    );

    let policy = AccessPolicy::standard();
    tracing::info!(features = policy.catalog().len(), "Feature catalog loaded");

    let state = PremiumAppState::new(policy, UpgradeSettings::from(&config.premium));
    let subscription = SubscriptionState::new(
        identity_resolver_from_config(&config.auth)?,
        Arc::new(InMemorySubscriptionStore::new()),
    );

    let app = api_router(state, subscription)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, pretty logs everywhere else.
fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
