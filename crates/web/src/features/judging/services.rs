use sqlx::PgPool;
use storage::{
    dto::judging::{JudgingSessionState, SaveScoresRequest},
    error::Result,
    services::judging_session::JudgingSession,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::SessionRegistry;

/// Open (or reopen) a judging session. Restarting replaces any prior
/// in-memory session for the pairing; recorded scoresheets are merged
/// back in from the database.
pub async fn start_session(
    pool: &PgPool,
    registry: &SessionRegistry,
    competition_id: Uuid,
    judge_id: Uuid,
) -> Result<JudgingSessionState> {
    let session = JudgingSession::start(pool, competition_id, judge_id).await?;
    Ok(registry.insert(session).await)
}

pub async fn session_state(
    registry: &SessionRegistry,
    competition_id: Uuid,
    judge_id: Uuid,
) -> Option<JudgingSessionState> {
    registry.state(competition_id, judge_id).await
}

pub async fn set_current_entry(
    registry: &SessionRegistry,
    competition_id: Uuid,
    judge_id: Uuid,
    index: usize,
) -> Option<JudgingSessionState> {
    registry.set_current_entry(competition_id, judge_id, index).await
}

/// Persist one scoresheet through the active session.
pub async fn save_results(
    pool: &PgPool,
    registry: &SessionRegistry,
    competition_id: Uuid,
    judge_id: Uuid,
    entry_id: Uuid,
    req: &SaveScoresRequest,
) -> std::result::Result<JudgingSessionState, WebError> {
    match registry
        .save_results(pool, competition_id, judge_id, entry_id, req)
        .await
    {
        Some(result) => result.map_err(WebError::from),
        None => Err(WebError::BadRequest(
            "No active judging session for this competition and judge".to_string(),
        )),
    }
}

pub async fn end_session(
    registry: &SessionRegistry,
    competition_id: Uuid,
    judge_id: Uuid,
) -> bool {
    registry.end(competition_id, judge_id).await
}
