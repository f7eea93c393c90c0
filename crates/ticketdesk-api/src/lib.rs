//! `TicketDesk` API server library
//!
//! Every client opens a session and gets its own seeded ticket store. The
//! routes under `/api/sessions/:session_id` drive the creation form, the
//! editable grid, the metrics panel and both charts for that store.

#![forbid(unsafe_code)]

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use std::{
    sync::{Arc, Weak},
    time::Duration,
};
use ticketdesk_core::{Config, context_error::Result};

/// Build the API router with all routes and middleware
///
/// Also starts the idle-session sweeper, which stops once the router and
/// every clone of its state have been dropped. Must be called from within a
/// tokio runtime.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn build_router(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);

    spawn_session_sweeper(
        Arc::downgrade(&state),
        Duration::from_secs(state.config.sessions.sweep_interval_secs),
    );

    Ok(routes::build_router(&state).with_state(state))
}

fn spawn_session_sweeper(state: Weak<AppState>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(state) = state.upgrade() else {
                tracing::debug!("Application state dropped, stopping session sweeper");
                break;
            };

            let removed = state.sessions.sweep_expired();
            if removed > 0 {
                tracing::info!(
                    removed,
                    remaining = state.sessions.len(),
                    "Idle session sweep completed"
                );
            }
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_router_with_defaults() {
        assert!(build_router(Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_build_router_rejects_invalid_config() {
        let mut config = Config::default();
        config.sessions.max_sessions = 0;

        assert!(build_router(config).is_err());
    }

    #[tokio::test]
    async fn test_sweeper_discards_idle_sessions() {
        let mut config = Config::default();
        config.sessions.idle_timeout_secs = 0;
        let state = Arc::new(AppState::new(config).unwrap());
        state.sessions.create().unwrap();

        spawn_session_sweeper(Arc::downgrade(&state), Duration::from_millis(200));
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert!(state.sessions.is_empty());
    }
}
