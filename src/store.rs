//! Session persistence: the store abstraction and an in-memory backend.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::session::{Session, SessionId};

/// Key-value persistence for sessions.
///
/// Stores hold full session snapshots keyed by id and hand out strictly
/// increasing ids. Retention is the store's concern; the engine never
/// deletes a session.
pub trait SessionStore: Send + Sync {
    /// Loads the session with the given id, if present.
    fn load(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Saves a full session snapshot keyed by its id.
    fn save(&self, session: &Session) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns the next session id. Strictly increasing.
    fn next_id(&self) -> impl Future<Output = Result<SessionId, StoreError>> + Send;
}

/// In-memory session store.
///
/// Snapshots are kept as serialized JSON so every load and save round-trips
/// through the codec exactly as an external key-value store would.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<SessionId, String>>,
    next: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemoryStore {
    async fn load(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        let entries = self.entries.read().await;
        match entries.get(&id) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        self.entries.write().await.insert(session.id, raw);
        Ok(())
    }

    async fn next_id(&self) -> Result<SessionId, StoreError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
