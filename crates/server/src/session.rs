//! Conversation session store.
//!
//! Chat history lives in memory, keyed by session id, and expires after
//! a fixed idle period. Expired entries are dropped on access and by a
//! periodic sweeper task; nothing is persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::ai::client::Message;

/// Idle time after which a conversation is forgotten
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Messages kept per session; older turns are dropped first
const MAX_MESSAGES: usize = 40;

struct Session {
    messages: Vec<Message>,
    last_active: Instant,
}

/// In-memory conversation store keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Session>> {
        // Recover the map on poisoning; sessions are disposable state
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the history for a session.
    ///
    /// A missing id starts a fresh session with a new id; an expired one
    /// is dropped and restarts under the id the caller supplied.
    pub(crate) fn history(&self, id: Option<Uuid>) -> (Uuid, Vec<Message>) {
        let mut map = self.lock();
        match id {
            Some(id) => match map.get(&id) {
                Some(session) if session.last_active.elapsed() < self.ttl => {
                    (id, session.messages.clone())
                }
                _ => {
                    map.remove(&id);
                    (id, Vec::new())
                }
            },
            None => (Uuid::new_v4(), Vec::new()),
        }
    }

    /// Replace a session's history and refresh its activity stamp.
    pub(crate) fn store(&self, id: Uuid, mut messages: Vec<Message>) {
        if messages.len() > MAX_MESSAGES {
            messages.drain(..messages.len() - MAX_MESSAGES);
        }
        self.lock().insert(
            id,
            Session {
                messages,
                last_active: Instant::now(),
            },
        );
    }

    /// Drop all sessions idle past the TTL. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut map = self.lock();
        let before = map.len();
        map.retain(|_, session| session.last_active.elapsed() < self.ttl);
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run the expiry sweep on an interval until the process exits.
    pub fn spawn_sweeper(store: SessionStore) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = store.sweep();
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Swept expired sessions");
                }
            }
        });
    }
}
