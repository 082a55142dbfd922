use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Competition;
use crate::models::competition::CompetitionStatus;

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub description: Option<String>,

    pub entry_deadline: DateTime<Utc>,

    pub judging_date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_fee"))]
    #[schema(value_type = Option<f64>)]
    pub entry_fee: Option<Decimal>,
}

fn validate_fee(fee: &Decimal) -> Result<(), validator::ValidationError> {
    if fee.is_sign_negative() {
        Err(validator::ValidationError::new("negative_entry_fee"))
    } else {
        Ok(())
    }
}

impl CreateCompetitionRequest {
    /// Cross-field checks that the derive cannot express.
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if let Some(judging) = self.judging_date
            && judging < self.entry_deadline
        {
            return Err("Judging date must be on or after the entry deadline");
        }
        Ok(())
    }
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub entry_deadline: Option<DateTime<Utc>>,

    pub judging_date: Option<DateTime<Utc>>,

    pub active: Option<bool>,

    pub results_published: Option<bool>,

    #[validate(custom(function = "validate_fee"))]
    #[schema(value_type = Option<f64>)]
    pub entry_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub competition_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub entry_deadline: DateTime<Utc>,
    pub judging_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub results_published: bool,
    #[schema(value_type = Option<f64>)]
    pub entry_fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub status: CompetitionStatus,
    pub days_until_deadline: i64,
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        let now = Utc::now();
        Self {
            status: comp.status(now),
            days_until_deadline: comp.days_until_deadline(now),
            competition_id: comp.competition_id,
            name: comp.name,
            description: comp.description,
            entry_deadline: comp.entry_deadline,
            judging_date: comp.judging_date,
            active: comp.active,
            results_published: comp.results_published,
            entry_fee: comp.entry_fee,
            created_at: comp.created_at,
        }
    }
}

/// Competition row enriched with entry/fee aggregates for the officer
/// dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionStatsResponse {
    #[serde(flatten)]
    pub competition: CompetitionResponse,
    pub entry_count: i64,
    pub paid_count: i64,
    /// paid_count x entry_fee; zero when no fee is configured.
    #[schema(value_type = f64)]
    pub total_fees: Decimal,
}

impl CompetitionStatsResponse {
    pub fn new(competition: Competition, entry_count: i64, paid_count: i64) -> Self {
        let total_fees = competition
            .entry_fee
            .map(|fee| fee * Decimal::from(paid_count))
            .unwrap_or_default();
        Self {
            competition: CompetitionResponse::from(competition),
            entry_count,
            paid_count,
            total_fees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn total_fees_is_paid_count_times_fee() {
        let comp = Competition {
            competition_id: Uuid::new_v4(),
            name: "Oktoberfest".to_string(),
            description: None,
            entry_deadline: Utc::now() + Duration::days(10),
            judging_date: None,
            active: true,
            results_published: false,
            entry_fee: Some(Decimal::new(750, 2)),
            created_at: Utc::now(),
        };

        let stats = CompetitionStatsResponse::new(comp, 12, 5);
        assert_eq!(stats.entry_count, 12);
        assert_eq!(stats.total_fees, Decimal::new(3750, 2));
    }

    #[test]
    fn total_fees_defaults_to_zero_without_fee() {
        let comp = Competition {
            competition_id: Uuid::new_v4(),
            name: "Free Entry Open".to_string(),
            description: None,
            entry_deadline: Utc::now() + Duration::days(1),
            judging_date: None,
            active: true,
            results_published: false,
            entry_fee: None,
            created_at: Utc::now(),
        };

        let stats = CompetitionStatsResponse::new(comp, 3, 3);
        assert_eq!(stats.total_fees, Decimal::ZERO);
    }

    #[test]
    fn judging_before_deadline_is_rejected() {
        let req = CreateCompetitionRequest {
            name: "Winter Ales".to_string(),
            description: None,
            entry_deadline: Utc::now() + Duration::days(14),
            judging_date: Some(Utc::now() + Duration::days(7)),
            entry_fee: None,
        };
        assert!(req.validate_dates().is_err());
    }
}
