use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const JUDGE_ROLES: &[&str] = &["bjcp_judge", "club_judge", "guest_judge"];
pub const DEFAULT_JUDGE_ROLE: &str = "club_judge";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeAssignment {
    pub assignment_id: Uuid,
    pub competition_id: Uuid,
    pub judge_id: Uuid,
    pub judge_role: String,
    pub assignment_notes: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: Option<Uuid>,
    pub active: bool,
    pub removed_at: Option<DateTime<Utc>>,
}
