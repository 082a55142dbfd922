use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub entry_deadline: DateTime<Utc>,
    pub judging_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub results_published: bool,
    pub entry_fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Competition {
    /// Entries may still be submitted, edited, or deleted.
    pub fn entries_open(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.entry_deadline
    }

    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> i64 {
        if !self.active {
            return 0;
        }
        let remaining = self.entry_deadline - now;
        let days = (remaining.num_seconds() as f64 / 86_400.0).ceil() as i64;
        days.max(0)
    }

    /// Lifecycle classification: open while entries are accepted, then
    /// judging until results land, completed once published.
    pub fn status(&self, now: DateTime<Utc>) -> CompetitionStatus {
        if self.entries_open(now) {
            CompetitionStatus::Open
        } else if self.results_published {
            CompetitionStatus::Completed
        } else if self.judging_date.is_some_and(|d| d >= now) {
            CompetitionStatus::Judging
        } else {
            CompetitionStatus::Closed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    Open,
    Judging,
    Completed,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn competition(active: bool, deadline_offset_days: i64) -> Competition {
        let now = Utc::now();
        Competition {
            competition_id: Uuid::new_v4(),
            name: "Spring Classic".to_string(),
            description: None,
            entry_deadline: now + Duration::days(deadline_offset_days),
            judging_date: None,
            active,
            results_published: false,
            entry_fee: None,
            created_at: now,
        }
    }

    #[test]
    fn entries_open_requires_active_and_future_deadline() {
        let now = Utc::now();
        assert!(competition(true, 7).entries_open(now));
        assert!(!competition(false, 7).entries_open(now));
        assert!(!competition(true, -1).entries_open(now));
    }

    #[test]
    fn past_deadline_with_active_flag_is_closed_for_entries() {
        // active=true alone is not enough once the deadline has elapsed
        let comp = competition(true, -3);
        assert!(!comp.entries_open(Utc::now()));
    }

    #[test]
    fn days_until_deadline_never_negative() {
        let now = Utc::now();
        assert_eq!(competition(true, -5).days_until_deadline(now), 0);
        assert_eq!(competition(false, 5).days_until_deadline(now), 0);
        assert_eq!(competition(true, 5).days_until_deadline(now), 5);
    }

    #[test]
    fn status_transitions() {
        let now = Utc::now();
        assert_eq!(competition(true, 7).status(now), CompetitionStatus::Open);

        let mut judging = competition(true, -1);
        judging.judging_date = Some(now + Duration::days(3));
        assert_eq!(judging.status(now), CompetitionStatus::Judging);

        let mut done = competition(true, -10);
        done.results_published = true;
        assert_eq!(done.status(now), CompetitionStatus::Completed);

        let stale = competition(true, -10);
        assert_eq!(stale.status(now), CompetitionStatus::Closed);
    }
}
