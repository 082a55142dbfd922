use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::judging::SaveScoresRequest;
use crate::error::Result;
use crate::models::JudgingSession;

const SESSION_COLUMNS: &str = "session_id, competition_id, entry_id, judge_id, aroma_score, \
     appearance_score, flavor_score, mouthfeel_score, overall_score, total_score, judge_notes, \
     private_notes, scoresheet_data, judged_at, updated_at";

/// Repository for judging session (scoresheet) database operations
pub struct JudgingSessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JudgingSessionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All of a judge's recorded sessions for a competition
    pub async fn list_for_judge(
        &self,
        competition_id: Uuid,
        judge_id: Uuid,
    ) -> Result<Vec<JudgingSession>> {
        let sessions = sqlx::query_as::<_, JudgingSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM competition_judging_sessions \
             WHERE competition_id = $1 AND judge_id = $2"
        ))
        .bind(competition_id)
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sessions)
    }

    pub async fn find_by_key(
        &self,
        competition_id: Uuid,
        entry_id: Uuid,
        judge_id: Uuid,
    ) -> Result<Option<JudgingSession>> {
        let session = sqlx::query_as::<_, JudgingSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM competition_judging_sessions \
             WHERE competition_id = $1 AND entry_id = $2 AND judge_id = $3"
        ))
        .bind(competition_id)
        .bind(entry_id)
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Atomic upsert keyed on (competition, entry, judge). total_score
    /// is a generated column and never part of the write. Last write
    /// wins on concurrent saves.
    pub async fn upsert(
        &self,
        competition_id: Uuid,
        entry_id: Uuid,
        judge_id: Uuid,
        req: &SaveScoresRequest,
    ) -> Result<JudgingSession> {
        let session = sqlx::query_as::<_, JudgingSession>(&format!(
            "INSERT INTO competition_judging_sessions \
                 (competition_id, entry_id, judge_id, aroma_score, appearance_score, \
                  flavor_score, mouthfeel_score, overall_score, judge_notes, private_notes, \
                  scoresheet_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (competition_id, entry_id, judge_id) DO UPDATE SET \
                 aroma_score = EXCLUDED.aroma_score, \
                 appearance_score = EXCLUDED.appearance_score, \
                 flavor_score = EXCLUDED.flavor_score, \
                 mouthfeel_score = EXCLUDED.mouthfeel_score, \
                 overall_score = EXCLUDED.overall_score, \
                 judge_notes = EXCLUDED.judge_notes, \
                 private_notes = EXCLUDED.private_notes, \
                 scoresheet_data = EXCLUDED.scoresheet_data, \
                 updated_at = now() \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(competition_id)
        .bind(entry_id)
        .bind(judge_id)
        .bind(req.aroma_score)
        .bind(req.appearance_score)
        .bind(req.flavor_score)
        .bind(req.mouthfeel_score)
        .bind(req.overall_score)
        .bind(&req.judge_notes)
        .bind(&req.private_notes)
        .bind(&req.scoresheet_data)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }
}
