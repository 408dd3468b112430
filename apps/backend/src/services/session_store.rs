//! In-memory session store.
//!
//! Maps session ids to individually locked sessions. DashMap shards the
//! id map so lookups and inserts for different sessions do not contend;
//! each session sits behind its own async mutex, which serializes
//! operations on that one session only.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{Session, SessionId};

/// Shared handle to one session. Lock it for the duration of a single transition.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Allocate a fresh, active session with no round.
    pub fn create(&self) -> (SessionId, SessionHandle) {
        loop {
            let id = SessionId::generate();
            // Vacant-entry insert keeps ids unique even on a v4 collision.
            let handle = match self.sessions.entry(id.clone()) {
                Entry::Vacant(slot) => slot
                    .insert(Arc::new(Mutex::new(Session::new(id.clone()))))
                    .value()
                    .clone(),
                Entry::Occupied(_) => continue,
            };
            // Shard guard is released here; len() locks every shard.
            debug!(session_id = %id, live_sessions = self.sessions.len(), "Session created");
            return (id, handle);
        }
    }

    /// Look up a session by the raw id a caller supplied.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_session() {
        let store = SessionStore::new();
        let (id, handle) = store.create();

        let found = store.get(id.as_str()).expect("session should exist");
        assert!(Arc::ptr_eq(&handle, &found));

        let session = found.lock().await;
        assert_eq!(session.id(), &id);
        assert_eq!(session.score(), 0);
        assert!(session.is_active());
        assert!(session.round().is_none());
    }

    #[test]
    fn unknown_id_is_none() {
        let store = SessionStore::new();
        store.create();
        assert!(store.get("not-a-session").is_none());
        assert!(store.get("").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let store = SessionStore::new();
        let ids: std::collections::HashSet<_> = (0..200).map(|_| store.create().0).collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn stores_are_isolated() {
        let a = SessionStore::new();
        let b = SessionStore::new();
        let (id, _) = a.create();
        assert!(b.get(id.as_str()).is_none());
        assert!(b.is_empty());
    }
}
