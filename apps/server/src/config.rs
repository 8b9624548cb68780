use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use folioview_broker::DEFAULT_UPSTREAM_URL;
use folioview_core::settings::{DashboardSettings, WindowSettings};

use crate::sessions::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TTL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub upstream_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub dashboard: DashboardSettings,
    /// Dashboard sessions idle this long are dropped.
    pub session_idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            static_dir: "dist".to_string(),
            dashboard: DashboardSettings::default(),
            session_idle_ttl: DEFAULT_SESSION_IDLE_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Reads `key`, keeping `default` when unset or unparsable.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}='{}', using the default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("FV_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FV_LISTEN_ADDR '{}'", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let upstream_url = std::env::var("FV_UPSTREAM_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.upstream_url);
        let cors_allow = std::env::var("FV_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_parse("FV_REQUEST_TIMEOUT_MS", 30000);
        let static_dir = std::env::var("FV_STATIC_DIR").unwrap_or(defaults.static_dir);
        let session_idle_secs: u64 =
            env_parse("FV_SESSION_IDLE_SECS", defaults.session_idle_ttl.as_secs());
        let max_sessions: usize = env_parse("FV_MAX_SESSIONS", defaults.max_sessions);

        Ok(Self {
            listen_addr,
            upstream_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            dashboard: dashboard_settings_from_env(),
            session_idle_ttl: Duration::from_secs(session_idle_secs),
            max_sessions,
        })
    }
}

fn dashboard_settings_from_env() -> DashboardSettings {
    let defaults = DashboardSettings::default();
    let history_floor = std::env::var("FV_HISTORY_FLOOR").ok().and_then(|raw| {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!("Ignoring invalid FV_HISTORY_FLOOR='{}'", raw);
                None
            }
        }
    });

    DashboardSettings {
        window: WindowSettings {
            months_back: env_parse("FV_WINDOW_MONTHS_BACK", defaults.window.months_back),
            months_forward: env_parse("FV_WINDOW_MONTHS_FORWARD", defaults.window.months_forward),
            history_floor,
        },
        projection_basis: env_parse("FV_PROJECTION_BASIS", defaults.projection_basis),
        label_format: env_parse("FV_LABEL_FORMAT", defaults.label_format),
    }
}
