use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const PLACEMENTS: &[&str] = &["1", "2", "3", "HM"];

/// Published outcome for a single entry, written during the results
/// publication step.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionResult {
    pub result_id: Uuid,
    pub entry_id: Uuid,
    pub score: Option<i16>,
    pub placement: Option<String>,
    pub judge_notes: Option<String>,
}
