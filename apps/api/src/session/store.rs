use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::AssessmentSession;

pub type SharedSession = Arc<Mutex<AssessmentSession>>;

/// In-memory registry of live quiz sessions.
///
/// The map lock is only held to look a session up; orchestration calls hold
/// the per-session `Mutex` instead, so calls within one session are serialised
/// while different sessions proceed in parallel.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns its id.
    pub async fn insert(&self, session: AssessmentSession) -> Uuid {
        let id = session.id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        info!("Session {id} created");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {id} discarded");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for at least `timeout`. Sessions in the middle of a
    /// call are locked and therefore never idle.
    pub async fn sweep_idle(&self, timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| match session.try_lock() {
            Ok(guard) if guard.idle_for() >= timeout => {
                debug!("Session {id} idle for {:?}, discarding", guard.idle_for());
                false
            }
            _ => true,
        });
        before - sessions.len()
    }
}

/// Spawns the background task that sweeps idle sessions every `timeout / 4`
/// (at least once a second).
pub fn spawn_sweeper(store: SessionStore, timeout: Duration) -> JoinHandle<()> {
    let period = (timeout / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            let swept = store.sweep_idle(timeout).await;
            if swept > 0 {
                info!("Swept {swept} idle session(s), {} still active", store.len().await);
            }
        }
    })
}
