//! In-memory registry of live checkout sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use super::{CheckoutError, CheckoutSession};

/// Live checkout sessions, keyed by session id.
///
/// Each session has its own mutex. [`acquire`](Self::acquire) never waits
/// for it: a session that is already being worked on is reported as
/// [`CheckoutError::InFlight`], which is what turns a double-submit into a
/// rejected request rather than a second order.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<CheckoutSession>>>>>,
}

impl SessionStore {
    pub async fn insert(&self, session: CheckoutSession) -> Uuid {
        let id = session.id();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Take exclusive use of a session. Acquiring counts as activity, so
    /// the idle clock restarts.
    pub async fn acquire(&self, id: Uuid) -> Result<OwnedMutexGuard<CheckoutSession>, CheckoutError> {
        let slot = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CheckoutError::SessionNotFound)?;
        let mut session = slot.try_lock_owned().map_err(|_| CheckoutError::InFlight)?;
        session.touch();
        Ok(session)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop sessions idle for at least `ttl`. Sessions in use are kept.
    ///
    /// Returns how many were dropped.
    pub async fn sweep(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| match slot.try_lock() {
            Ok(session) => session.idle_for() < ttl,
            Err(_) => true,
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::{MemoryBackend, started};
    use super::*;

    #[tokio::test]
    async fn test_acquire_unknown_session() {
        let store = SessionStore::default();
        let result = store.acquire(Uuid::new_v4()).await;
        assert!(matches!(result, Err(CheckoutError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_held_session_is_in_flight() {
        let backend = MemoryBackend::seeded();
        let store = SessionStore::default();
        let id = store.insert(started(&backend).await).await;

        let guard = store.acquire(id).await.unwrap();
        assert!(matches!(store.acquire(id).await, Err(CheckoutError::InFlight)));
        drop(guard);
        assert!(store.acquire(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_sweep_drops_expired_but_keeps_busy_sessions() {
        let backend = MemoryBackend::seeded();
        let store = SessionStore::default();
        let idle = store.insert(started(&backend).await).await;
        let busy = store.insert(started(&backend).await).await;

        assert_eq!(store.sweep(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.len().await, 2);

        let guard = store.acquire(busy).await.unwrap();
        assert_eq!(store.sweep(Duration::ZERO).await, 1);
        assert!(matches!(
            store.acquire(idle).await,
            Err(CheckoutError::SessionNotFound)
        ));
        drop(guard);
        assert!(store.acquire(busy).await.is_ok());
    }

    #[tokio::test]
    async fn test_activity_keeps_session_alive() {
        let backend = MemoryBackend::seeded();
        let store = SessionStore::default();
        let active = store.insert(started(&backend).await).await;
        let abandoned = store.insert(started(&backend).await).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        drop(store.acquire(active).await.unwrap());

        assert_eq!(store.sweep(Duration::from_millis(100)).await, 1);
        assert!(store.acquire(active).await.is_ok());
        assert!(matches!(
            store.acquire(abandoned).await,
            Err(CheckoutError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let backend = MemoryBackend::seeded();
        let store = SessionStore::default();
        let id = store.insert(started(&backend).await).await;
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.is_empty().await);
    }
}
