use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::competition_result::PLACEMENTS;

/// One row of a publication request: the outcome for a single entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublishResultRow {
    pub entry_id: Uuid,

    #[validate(range(min = 0, max = 50, message = "Score must be 0-50"))]
    pub score: Option<i16>,

    #[validate(custom(function = "validate_placement"))]
    pub placement: Option<String>,

    #[validate(length(max = 10000))]
    pub judge_notes: Option<String>,
}

fn validate_placement(placement: &str) -> Result<(), validator::ValidationError> {
    if PLACEMENTS.contains(&placement) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_placement"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublishResultsRequest {
    #[validate(nested)]
    pub results: Vec<PublishResultRow>,
}

/// Published result joined with its entry, as shown on the results page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultRow {
    pub entry_id: Uuid,
    pub entry_number: String,
    pub beer_name: String,
    pub member_name: String,
    pub category_display: String,
    pub score: Option<i16>,
    pub placement: Option<String>,
    pub judge_notes: Option<String>,
    /// Human-facing award label, e.g. "🥇 1st Place" or "Score: 37/50".
    pub award_display: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn row(placement: Option<&str>, score: Option<i16>) -> PublishResultRow {
        PublishResultRow {
            entry_id: Uuid::new_v4(),
            score,
            placement: placement.map(String::from),
            judge_notes: None,
        }
    }

    #[test]
    fn known_placements_validate() {
        for p in PLACEMENTS {
            assert!(row(Some(p), Some(40)).validate().is_ok());
        }
        assert!(row(None, Some(33)).validate().is_ok());
    }

    #[test]
    fn unknown_placement_is_rejected() {
        assert!(row(Some("4"), None).validate().is_err());
        assert!(row(Some("first"), None).validate().is_err());
    }

    #[test]
    fn score_over_max_total_is_rejected() {
        assert!(row(None, Some(51)).validate().is_err());
    }
}
