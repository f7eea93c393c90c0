//! Per-client session registry

use crate::session::TicketSession;
use dashmap::DashMap;
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};
use ticketdesk_core::{
    Error, Result,
    config::{SeedConfig, SessionConfig},
};
use uuid::Uuid;

/// Opaque session handle given to clients
pub type SessionId = Uuid;

/// Thread-safe map of live sessions, each with its own ticket store
///
/// Sessions never share tickets. Every session starts from the same seed,
/// so two fresh sessions hold identical data until one of them is edited.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, TicketSession>,
    // Slots claimed against `max_sessions`, including sessions still being seeded
    reserved: AtomicUsize,
    seed: SeedConfig,
    limits: SessionConfig,
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(seed: SeedConfig, limits: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            reserved: AtomicUsize::new(0),
            seed,
            limits,
        }
    }

    /// Open a new seeded session
    ///
    /// Returns the new id together with the number of seeded tickets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] once `max_sessions` are live.
    pub fn create(&self) -> Result<(SessionId, usize)> {
        let max = self.limits.max_sessions;
        if let Err(live) = self
            .reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                (live < max).then_some(live + 1)
            })
        {
            tracing::warn!(live, max, "Session limit reached");
            return Err(Error::ResourceExhausted {
                resource: "sessions".to_string(),
            });
        }

        let session = TicketSession::seeded(&self.seed);
        let count = session.len();
        let id = Uuid::new_v4();
        self.sessions.insert(id, session);

        tracing::info!(session_id = %id, tickets = count, "Session created");
        Ok((id, count))
    }

    /// Run `f` against one session, marking it as recently used
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the session does not exist.
    pub fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut TicketSession) -> R,
    ) -> Result<R> {
        let mut entry = self.sessions.get_mut(&id).ok_or_else(|| Error::NotFound {
            resource: format!("session {id}"),
        })?;
        entry.touch();
        Ok(f(entry.value_mut()))
    }

    /// Discard a session; returns whether it existed
    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            self.release(1);
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Drop sessions idle for longer than `idle` as of `now`
    ///
    /// Returns the number of sessions removed.
    pub fn sweep_idle(&self, idle: Duration, now: Instant) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = now.saturating_duration_since(session.last_active()) <= idle;
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            self.release(removed);
            tracing::info!(removed, remaining = self.sessions.len(), "Swept idle sessions");
        }
        removed
    }

    /// Sweep using the configured idle timeout
    pub fn sweep_expired(&self) -> usize {
        self.sweep_idle(
            Duration::from_secs(self.limits.idle_timeout_secs),
            Instant::now(),
        )
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn release(&self, slots: usize) {
        self.reserved.fetch_sub(slots, Ordering::AcqRel);
    }

    /// Session limits in effect
    #[must_use]
    pub const fn limits(&self) -> &SessionConfig {
        &self.limits
    }
}
