//! Shared application state: the database handle plus the registry of
//! in-flight judging sessions.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use storage::Database;
use storage::dto::judging::{JudgingSessionState, SaveScoresRequest};
use storage::error::Result as StorageResult;
use storage::services::judging_session::JudgingSession;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            sessions: SessionRegistry::default(),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Database {
        state.db.clone()
    }
}

type SessionKey = (Uuid, Uuid);

/// In-memory judging sessions keyed by (competition, judge). Sessions
/// are created on start, replaced on restart, and dropped on end; all
/// durable scoring state lives in the database.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<SessionKey, JudgingSession>>>,
}

impl SessionRegistry {
    /// Register a freshly started session, replacing any previous one
    /// for the same judge and competition.
    pub async fn insert(&self, session: JudgingSession) -> JudgingSessionState {
        let key = (session.competition().competition_id, session.judge_id());
        let state = session.state();
        self.inner.write().await.insert(key, session);
        state
    }

    pub async fn state(&self, competition_id: Uuid, judge_id: Uuid) -> Option<JudgingSessionState> {
        self.inner
            .read()
            .await
            .get(&(competition_id, judge_id))
            .map(JudgingSession::state)
    }

    pub async fn set_current_entry(
        &self,
        competition_id: Uuid,
        judge_id: Uuid,
        index: usize,
    ) -> Option<JudgingSessionState> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&(competition_id, judge_id))?;
        session.set_current_entry(index);
        Some(session.state())
    }

    /// Persist a scoresheet through the session. None when no session
    /// is active for the pairing.
    pub async fn save_results(
        &self,
        pool: &PgPool,
        competition_id: Uuid,
        judge_id: Uuid,
        entry_id: Uuid,
        req: &SaveScoresRequest,
    ) -> Option<StorageResult<JudgingSessionState>> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&(competition_id, judge_id))?;
        Some(
            session
                .save_results(pool, entry_id, req)
                .await
                .map(|_| session.state()),
        )
    }

    /// Drop the in-memory session. Persisted scoresheets are untouched.
    pub async fn end(&self, competition_id: Uuid, judge_id: Uuid) -> bool {
        self.inner
            .write()
            .await
            .remove(&(competition_id, judge_id))
            .is_some()
    }
}
