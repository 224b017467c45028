use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::state::{SessionId, SessionState};

/// Shared handle to one session. The lock is only held for short
/// synchronous mutations, never across an outbound call.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Owns every live session, keyed by a random id.
///
/// Sessions that see no access for `idle_timeout` are evicted, and the
/// store never holds more than `max_sessions` entries.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<SessionId, SessionHandle>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_timeout: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .eviction_listener(|id, _, cause| {
                debug!(session_id = %id, ?cause, "Session evicted");
            })
            .build();

        Self { sessions }
    }

    /// Create an empty session.
    pub async fn create(&self) -> (SessionId, SessionHandle) {
        let id = Uuid::new_v4();
        let handle: SessionHandle = Arc::new(Mutex::new(SessionState::new()));
        self.sessions.insert(id, handle.clone()).await;
        debug!(session_id = %id, "Session created");
        (id, handle)
    }

    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).await
    }

    /// Destroy a session. Returns whether it existed.
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).await.is_some()
    }

    /// Approximate number of live sessions.
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(100, Duration::from_secs(60));
        let (id, handle) = store.create().await;

        handle.lock().start_call(false).unwrap();

        let fetched = store.get(&id).await.expect("session should exist");
        assert!(fetched.lock().is_call_active());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(100, Duration::from_secs(60));
        let (_, first) = store.create().await;
        let (second_id, _) = store.create().await;

        first.lock().start_call(false).unwrap();

        let second = store.get(&second_id).await.unwrap();
        assert!(!second.lock().is_call_active());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(100, Duration::from_secs(60));
        let (id, _) = store.create().await;

        assert!(store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(!store.remove(&id).await);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(100, Duration::from_secs(60));
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }
}
