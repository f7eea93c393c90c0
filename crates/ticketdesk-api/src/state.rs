//! Application state management

use std::time::Instant;
use ticketdesk_core::{Config, context_error::Result};
use ticketdesk_store::SessionRegistry;

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Live sessions, each owning its own ticket store
    pub sessions: SessionRegistry,
    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let sessions = SessionRegistry::new(config.seed.clone(), config.sessions.clone());
        Ok(Self {
            config,
            sessions,
            started_at: Instant::now(),
        })
    }

    /// Seconds since the server started
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Whether the registry can take another session
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.sessions.len() < self.config.sessions.max_sessions
    }
}
