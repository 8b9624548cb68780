use std::collections::HashMap;
use std::time::{Duration, Instant};

use folioview_core::dashboard::{
    ChartData, ChartScale, CommitOutcome, DashboardSession, DashboardView, Generation,
};
use tokio::sync::Mutex;

use crate::auth::SessionKey;

pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// What `/dashboard/current` returns for a session.
pub struct RenderedView {
    pub account: Option<String>,
    pub view: DashboardView,
    pub portfolio_chart: ChartData,
    pub components_chart: ChartData,
}

struct SessionEntry {
    session: DashboardSession,
    last_seen: Instant,
}

/// Dashboard sessions of every caller, keyed by token digest.
///
/// A session untouched for `idle_ttl` is dropped, and the store never holds
/// more than `max_sessions`; the least recently used session goes first.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionKey, SessionEntry>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }
}

fn evict_idle(sessions: &mut HashMap<SessionKey, SessionEntry>, idle_ttl: Duration, now: Instant) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < idle_ttl);
    before - sessions.len()
}

fn evict_least_recent(sessions: &mut HashMap<SessionKey, SessionEntry>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(key, _)| *key);
    if let Some(key) = oldest {
        tracing::debug!("Session store full, evicting {:?}", key);
        sessions.remove(&key);
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn begin_selection(&self, key: SessionKey, account: &str) -> Generation {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let evicted = evict_idle(&mut sessions, self.idle_ttl, now);
        if evicted > 0 {
            tracing::debug!("Evicted {} idle dashboard sessions", evicted);
        }
        if !sessions.contains_key(&key) && sessions.len() >= self.max_sessions {
            evict_least_recent(&mut sessions);
        }

        let entry = sessions.entry(key).or_insert_with(|| SessionEntry {
            session: DashboardSession::new(),
            last_seen: now,
        });
        entry.last_seen = now;
        entry.session.begin_selection(account)
    }

    /// Hands a finished view to the session. `None` when the session was
    /// evicted while the view was being built.
    pub async fn commit(
        &self,
        key: SessionKey,
        generation: Generation,
        view: DashboardView,
    ) -> Option<CommitOutcome> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&key)?;
        entry.last_seen = Instant::now();
        Some(entry.session.commit(generation, view))
    }

    pub async fn render(&self, key: SessionKey, scale: ChartScale) -> Option<RenderedView> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&key)?;
        entry.last_seen = Instant::now();
        let session = &mut entry.session;
        let (portfolio_chart, components_chart) = session.render(scale)?;
        Some(RenderedView {
            account: session.account().map(str::to_string),
            view: session.view()?.clone(),
            portfolio_chart,
            components_chart,
        })
    }

    /// Drops every session idle at `now`. Returns how many were dropped.
    pub async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().await;
        evict_idle(&mut sessions, self.idle_ttl, now)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
