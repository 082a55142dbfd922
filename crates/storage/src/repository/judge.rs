use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::judge::{
    AssignJudgeRequest, JudgeAssignmentResponse, JudgeCompetitionInfo, JudgeInfo,
};
use crate::error::{Result, StorageError};
use crate::models::JudgeAssignment;

const ASSIGNMENT_COLUMNS: &str = "assignment_id, competition_id, judge_id, judge_role, \
     assignment_notes, assigned_at, assigned_by, active, removed_at";

#[derive(FromRow)]
struct AssignmentRow {
    assignment_id: Uuid,
    competition_id: Uuid,
    judge_id: Uuid,
    judge_role: String,
    assignment_notes: Option<String>,
    assigned_at: DateTime<Utc>,
    assigned_by: Option<Uuid>,
    active: bool,
    removed_at: Option<DateTime<Utc>>,
    judge_name: String,
    judge_email: String,
    judge_phone: Option<String>,
    competition_name: String,
    judging_date: Option<DateTime<Utc>>,
}

impl From<AssignmentRow> for JudgeAssignmentResponse {
    fn from(row: AssignmentRow) -> Self {
        Self {
            judge: JudgeInfo {
                member_id: row.judge_id,
                name: row.judge_name,
                email: row.judge_email,
                phone: row.judge_phone,
            },
            competition: JudgeCompetitionInfo {
                competition_id: row.competition_id,
                name: row.competition_name,
                judging_date: row.judging_date,
            },
            assignment: JudgeAssignment {
                assignment_id: row.assignment_id,
                competition_id: row.competition_id,
                judge_id: row.judge_id,
                judge_role: row.judge_role,
                assignment_notes: row.assignment_notes,
                assigned_at: row.assigned_at,
                assigned_by: row.assigned_by,
                active: row.active,
                removed_at: row.removed_at,
            },
        }
    }
}

const ASSIGNMENT_JOIN: &str = r#"
    SELECT a.assignment_id, a.competition_id, a.judge_id, a.judge_role,
           a.assignment_notes, a.assigned_at, a.assigned_by, a.active, a.removed_at,
           m.name AS judge_name, m.email AS judge_email, m.phone AS judge_phone,
           c.name AS competition_name, c.judging_date
    FROM competition_judges a
    INNER JOIN members m ON m.member_id = a.judge_id
    INNER JOIN competitions c ON c.competition_id = a.competition_id
"#;

/// Repository for judge assignment database operations
pub struct JudgeAssignmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JudgeAssignmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active assignments for a competition, newest first
    pub async fn list_for_competition(
        &self,
        competition_id: Uuid,
    ) -> Result<Vec<JudgeAssignmentResponse>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "{ASSIGNMENT_JOIN} WHERE a.competition_id = $1 AND a.active \
             ORDER BY a.assigned_at DESC"
        ))
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(JudgeAssignmentResponse::from).collect())
    }

    /// The active assignment for a judge in a competition, if any. A
    /// judge may hold several; any one of them authorizes judging.
    pub async fn find_active(
        &self,
        competition_id: Uuid,
        judge_id: Uuid,
    ) -> Result<Option<JudgeAssignment>> {
        let assignment = sqlx::query_as::<_, JudgeAssignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM competition_judges \
             WHERE competition_id = $1 AND judge_id = $2 AND active \
             ORDER BY assigned_at DESC \
             LIMIT 1"
        ))
        .bind(competition_id)
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn insert(
        &self,
        competition_id: Uuid,
        req: &AssignJudgeRequest,
    ) -> Result<JudgeAssignmentResponse> {
        let assignment = sqlx::query_as::<_, JudgeAssignment>(&format!(
            "INSERT INTO competition_judges \
                 (competition_id, judge_id, judge_role, assignment_notes, assigned_by, active) \
             VALUES ($1, $2, $3, $4, $5, true) \
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(competition_id)
        .bind(req.judge_id)
        .bind(&req.judge_role)
        .bind(&req.assignment_notes)
        .bind(req.assigned_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Unknown judge or competition".to_string())
            } else {
                err
            }
        })?;

        self.find_joined(assignment.assignment_id).await
    }

    async fn find_joined(&self, assignment_id: Uuid) -> Result<JudgeAssignmentResponse> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "{ASSIGNMENT_JOIN} WHERE a.assignment_id = $1"
        ))
        .bind(assignment_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Soft delete. Judging sessions the judge already recorded are
    /// left untouched.
    pub async fn deactivate(&self, assignment_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE competition_judges SET active = false, removed_at = now() \
             WHERE assignment_id = $1 AND active",
        )
        .bind(assignment_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
