use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One judge's recorded scoresheet for one entry. At most one row exists
/// per (competition, entry, judge).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgingSession {
    pub session_id: Uuid,
    pub competition_id: Uuid,
    pub entry_id: Uuid,
    pub judge_id: Uuid,
    pub aroma_score: Option<i16>,
    pub appearance_score: Option<i16>,
    pub flavor_score: Option<i16>,
    pub mouthfeel_score: Option<i16>,
    pub overall_score: Option<i16>,
    /// Generated column: sum of the non-null criteria, NULL when none
    /// have been recorded.
    pub total_score: Option<i16>,
    pub judge_notes: Option<String>,
    pub private_notes: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub scoresheet_data: Option<serde_json::Value>,
    pub judged_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JudgingSession {
    /// A session counts as judged once any criterion is scored. A row
    /// pre-created with all-null scores is not yet judged.
    pub fn has_scores(&self) -> bool {
        self.aroma_score.is_some()
            || self.appearance_score.is_some()
            || self.flavor_score.is_some()
            || self.mouthfeel_score.is_some()
            || self.overall_score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_session() -> JudgingSession {
        JudgingSession {
            session_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            entry_id: Uuid::new_v4(),
            judge_id: Uuid::new_v4(),
            aroma_score: None,
            appearance_score: None,
            flavor_score: None,
            mouthfeel_score: None,
            overall_score: None,
            total_score: None,
            judge_notes: None,
            private_notes: None,
            scoresheet_data: None,
            judged_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn all_null_scores_is_not_judged() {
        assert!(!blank_session().has_scores());
    }

    #[test]
    fn any_single_score_counts_as_judged() {
        let mut session = blank_session();
        session.mouthfeel_score = Some(4);
        assert!(session.has_scores());
    }
}
