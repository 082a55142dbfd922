use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::entry::CategoryInfo;
use crate::models::{Competition, CompetitionEntry, JudgingSession};

/// Request payload for opening a judging session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub competition_id: Uuid,
    pub judge_id: Uuid,
}

/// Request payload for flight navigation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetCurrentEntryRequest {
    pub index: usize,
}

/// Request payload for recording a BJCP scoresheet. `total_score` is
/// intentionally absent: the database derives it from the criteria.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveScoresRequest {
    #[validate(range(min = 0, max = 12, message = "Aroma score must be 0-12"))]
    pub aroma_score: Option<i16>,

    #[validate(range(min = 0, max = 3, message = "Appearance score must be 0-3"))]
    pub appearance_score: Option<i16>,

    #[validate(range(min = 0, max = 20, message = "Flavor score must be 0-20"))]
    pub flavor_score: Option<i16>,

    #[validate(range(min = 0, max = 5, message = "Mouthfeel score must be 0-5"))]
    pub mouthfeel_score: Option<i16>,

    #[validate(range(min = 0, max = 10, message = "Overall score must be 0-10"))]
    pub overall_score: Option<i16>,

    #[validate(length(max = 10000))]
    pub judge_notes: Option<String>,

    #[validate(length(max = 10000))]
    pub private_notes: Option<String>,

    /// Full structured scoresheet as captured by the client.
    #[schema(value_type = Option<Object>)]
    pub scoresheet_data: Option<serde_json::Value>,
}

/// An entry in a judge's flight, with any previously recorded
/// scoresheet merged on.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: CompetitionEntry,
    pub category: Option<CategoryInfo>,
    pub judging: Option<JudgingSession>,
    pub has_been_judged: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct JudgingProgress {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

/// Snapshot of a judge's in-flight session returned by the judging
/// endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgingSessionState {
    pub competition: Competition,
    pub judge_id: Uuid,
    pub entries: Vec<ScoredEntry>,
    pub current_entry: Option<ScoredEntry>,
    pub progress: JudgingProgress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn scores(aroma: i16, appearance: i16, flavor: i16, mouthfeel: i16, overall: i16) -> SaveScoresRequest {
        SaveScoresRequest {
            aroma_score: Some(aroma),
            appearance_score: Some(appearance),
            flavor_score: Some(flavor),
            mouthfeel_score: Some(mouthfeel),
            overall_score: Some(overall),
            judge_notes: None,
            private_notes: None,
            scoresheet_data: None,
        }
    }

    #[test]
    fn full_marks_validate() {
        assert!(scores(12, 3, 20, 5, 10).validate().is_ok());
    }

    #[test]
    fn each_criterion_rejects_values_over_its_ceiling() {
        assert!(scores(13, 3, 20, 5, 10).validate().is_err());
        assert!(scores(12, 4, 20, 5, 10).validate().is_err());
        assert!(scores(12, 3, 21, 5, 10).validate().is_err());
        assert!(scores(12, 3, 20, 6, 10).validate().is_err());
        assert!(scores(12, 3, 20, 5, 11).validate().is_err());
    }

    #[test]
    fn negative_scores_are_rejected() {
        let mut req = scores(10, 2, 15, 4, 8);
        req.flavor_score = Some(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_scoresheets_are_allowed() {
        let req = SaveScoresRequest {
            aroma_score: Some(9),
            appearance_score: None,
            flavor_score: None,
            mouthfeel_score: None,
            overall_score: None,
            judge_notes: Some("Citrus-forward, clean finish".to_string()),
            private_notes: None,
            scoresheet_data: None,
        };
        assert!(req.validate().is_ok());
    }
}
