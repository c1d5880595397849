//! In-memory repositories
//!
//! Process-local session store, a seeded user directory and a bounded
//! operation log.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use kernel::id::SessionId;
use tokio::sync::RwLock;

use crate::application::config::SessionConfig;
use crate::domain::opt_log::OptLog;
use crate::domain::repository::{OptLogRepository, SessionRepository, UserRepository};
use crate::domain::session::Session;
use crate::error::GateResult;

/// Session store held in process memory
#[derive(Clone)]
pub struct MemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_timeout: chrono::Duration,
}

impl MemorySessionRepository {
    pub fn new(idle_timeout: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.idle_timeout_chrono())
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn find(&self, session_id: &SessionId) -> GateResult<Option<Session>> {
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get_mut(session_id) else {
            return Ok(None);
        };
        if !session.is_idle_expired(self.idle_timeout) {
            session.touch();
            return Ok(Some(session.clone()));
        }

        sessions.remove(session_id);
        tracing::debug!(session_id = %session_id, "Session expired");
        Ok(None)
    }

    async fn save(&self, session: &Session) -> GateResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> GateResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> GateResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle_expired(self.idle_timeout));
        Ok((before - sessions.len()) as u64)
    }
}

/// One directory entry
#[derive(Debug, Clone)]
struct DirectoryEntry {
    password: String,
    int_user_id: String,
}

/// User directory seeded at startup
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<HashMap<String, DirectoryEntry>>,
}

impl MemoryUserRepository {
    /// Build from `(user_id, password, int_user_id)` triples
    pub fn new<I, A, B, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, B, C)>,
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
    {
        let users = entries
            .into_iter()
            .map(|(user_id, password, int_user_id)| {
                (
                    user_id.into(),
                    DirectoryEntry {
                        password: password.into(),
                        int_user_id: int_user_id.into(),
                    },
                )
            })
            .collect();
        Self {
            users: Arc::new(users),
        }
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_int_user_id(&self, user_id: &str, password: &str) -> GateResult<Option<String>> {
        Ok(self
            .users
            .get(user_id)
            .filter(|entry| entry.password == password)
            .map(|entry| entry.int_user_id.clone()))
    }
}

/// Operation log kept in memory; the oldest entries are dropped past capacity
#[derive(Clone)]
pub struct MemoryOptLogRepository {
    entries: Arc<RwLock<VecDeque<OptLog>>>,
    capacity: usize,
}

impl MemoryOptLogRepository {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot, oldest first
    pub async fn entries(&self) -> Vec<OptLog> {
        self.entries.read().await.iter().cloned().collect()
    }
}

impl Default for MemoryOptLogRepository {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl OptLogRepository for MemoryOptLogRepository {
    async fn save(&self, log: &OptLog) -> GateResult<()> {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(log.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{SessionAttributes, USER_ID};

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = MemorySessionRepository::new(chrono::Duration::minutes(30));
        let mut session = Session::new();
        session.set_attribute(USER_ID, "u1".into());
        repo.save(&session).await.unwrap();

        let found = repo.find(&session.id).await.unwrap().unwrap();
        assert_eq!(found.text(USER_ID), Some("u1"));
    }

    #[tokio::test]
    async fn test_find_drops_idle_session() {
        let repo = MemorySessionRepository::new(chrono::Duration::minutes(30));
        let mut session = Session::new();
        session.last_accessed_at = chrono::Utc::now() - chrono::Duration::minutes(45);
        repo.save(&session).await.unwrap();

        assert!(repo.find(&session.id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_and_cleanup() {
        let repo = MemorySessionRepository::new(chrono::Duration::minutes(30));
        let live = Session::new();
        let mut stale = Session::new();
        stale.last_accessed_at = chrono::Utc::now() - chrono::Duration::hours(2);
        repo.save(&live).await.unwrap();
        repo.save(&stale).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);

        repo.delete(&live.id).await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let repo = MemoryUserRepository::new([("ruidev", "123456", "10001")]);

        assert_eq!(
            repo.find_int_user_id("ruidev", "123456").await.unwrap(),
            Some("10001".to_string())
        );
        assert_eq!(repo.find_int_user_id("ruidev", "").await.unwrap(), None);
        assert_eq!(repo.find_int_user_id("nobody", "123456").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_opt_log_drops_oldest_past_capacity() {
        use crate::domain::opt_log::Operation;

        let repo = MemoryOptLogRepository::new(2);
        for path in ["/a", "/b", "/c"] {
            repo.save(&OptLog::new(Operation::GateDenied, path)).await.unwrap();
        }

        let paths: Vec<String> = repo.entries().await.into_iter().map(|log| log.path).collect();
        assert_eq!(paths, ["/b", "/c"]);
    }
}
