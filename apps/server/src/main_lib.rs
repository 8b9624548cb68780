use std::sync::Arc;

use crate::{config::Config, sessions::SessionStore};
use anyhow::Context;
use folioview_broker::{BrokerClientFactory, IndexaClientFactory};
use folioview_core::settings::DashboardSettings;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Builds upstream clients for the caller's token.
    pub broker: Arc<dyn BrokerClientFactory>,
    /// Shared client of the `/api/*` pass-through.
    pub http: reqwest::Client,
    pub upstream_url: String,
    pub dashboard_settings: DashboardSettings,
    pub sessions: SessionStore,
}

pub fn init_tracing() {
    let log_format = std::env::var("FV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let factory = IndexaClientFactory::new(&config.upstream_url, config.request_timeout)
        .context("Failed to initialize the brokerage client")?;
    build_state_with(config, Arc::new(factory))
}

/// State with a caller-supplied client factory.
pub fn build_state_with(
    config: &Config,
    broker: Arc<dyn BrokerClientFactory>,
) -> anyhow::Result<Arc<AppState>> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to initialize the proxy HTTP client")?;

    tracing::info!(
        "Upstream {} | window -{}/+{} months | projection {:?}",
        config.upstream_url,
        config.dashboard.window.months_back,
        config.dashboard.window.months_forward,
        config.dashboard.projection_basis
    );

    Ok(Arc::new(AppState {
        broker,
        http,
        upstream_url: config.upstream_url.trim_end_matches('/').to_string(),
        dashboard_settings: config.dashboard.clone(),
        sessions: SessionStore::new(config.session_idle_ttl, config.max_sessions),
    }))
}
