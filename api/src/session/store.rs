//! In-memory session registry with idle expiry

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::{Duration, Instant};

use rj_core::services::VerifierFactory;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::factory::SessionParts;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "rj_verification";

/// One visitor's flow plus its bookkeeping
pub struct SessionEntry<V: VerifierFactory> {
    id: Uuid,
    parts: Mutex<SessionParts<V>>,
    last_seen: StdMutex<Instant>,
}

impl<V: VerifierFactory> SessionEntry<V> {
    fn new(id: Uuid, parts: SessionParts<V>) -> Self {
        Self {
            id,
            parts: Mutex::new(parts),
            last_seen: StdMutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for any in-flight operation, then claim the session
    pub async fn claim(&self) -> MutexGuard<'_, SessionParts<V>> {
        self.parts.lock().await
    }

    /// Claim the session for one operation; `None` while another is in flight
    pub fn try_claim(&self) -> Option<MutexGuard<'_, SessionParts<V>>> {
        self.parts.try_lock().ok()
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }
}

/// Live sessions keyed by cookie id
pub struct SessionStore<V: VerifierFactory> {
    sessions: RwLock<HashMap<Uuid, Arc<SessionEntry<V>>>>,
    idle_timeout: Duration,
}

impl<V: VerifierFactory + 'static> SessionStore<V> {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Register a freshly built session under a new id
    pub async fn insert(&self, parts: SessionParts<V>) -> Arc<SessionEntry<V>> {
        let entry = Arc::new(SessionEntry::new(Uuid::new_v4(), parts));
        self.sessions
            .write()
            .await
            .insert(entry.id, Arc::clone(&entry));
        tracing::debug!(session_id = %entry.id, event = "session_created", "Session created");
        entry
    }

    /// Look a session up and mark it active; idle sessions are evicted
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionEntry<V>>> {
        let entry = self.sessions.read().await.get(&id).cloned()?;
        if entry.idle_for() >= self.idle_timeout {
            self.remove(id).await;
            return None;
        }
        entry.touch();
        Some(entry)
    }

    pub async fn remove(&self, id: Uuid) -> Option<Arc<SessionEntry<V>>> {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_some() {
            tracing::debug!(session_id = %id, event = "session_removed", "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every session idle for longer than the timeout.
    /// Sessions with an operation in flight are left for the next sweep.
    pub async fn purge_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            if entry.idle_for() < self.idle_timeout {
                return true;
            }
            match entry.try_claim() {
                Some(mut parts) => {
                    parts.orchestrator.abandon();
                    false
                }
                None => true,
            }
        });
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!(purged, remaining = sessions.len(), event = "sessions_purged", "Idle sessions purged");
        }
        purged
    }

    /// Run `purge_idle` every `every` until the handle is aborted
    pub fn spawn_idle_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.purge_idle().await;
            }
        })
    }
}
