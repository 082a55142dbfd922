//! BJCP scoring math and award presentation.

use crate::dto::entry::ResultInfo;
use crate::dto::judging::{JudgingProgress, ScoredEntry};

pub const AROMA_MAX: i16 = 12;
pub const APPEARANCE_MAX: i16 = 3;
pub const FLAVOR_MAX: i16 = 20;
pub const MOUTHFEEL_MAX: i16 = 5;
pub const OVERALL_MAX: i16 = 10;

/// Maximum total across the five criteria (12+3+20+5+10).
pub const MAX_TOTAL_SCORE: i16 =
    AROMA_MAX + APPEARANCE_MAX + FLAVOR_MAX + MOUTHFEEL_MAX + OVERALL_MAX;

/// Award label for a published result. None when no result has been
/// published for the entry.
pub fn award_display(result: Option<&ResultInfo>) -> Option<String> {
    let result = result?;

    let label = match result.placement.as_deref() {
        Some("1") => "🥇 1st Place".to_string(),
        Some("2") => "🥈 2nd Place".to_string(),
        Some("3") => "🥉 3rd Place".to_string(),
        Some("HM") => "🏅 Honorable Mention".to_string(),
        _ => match result.score {
            Some(score) => format!("Score: {score}/{MAX_TOTAL_SCORE}"),
            None => "No Results".to_string(),
        },
    };

    Some(label)
}

/// Completion counters over a judge's flight. Empty flights report all
/// zeroes rather than dividing by zero.
pub fn progress(entries: &[ScoredEntry]) -> JudgingProgress {
    let total = entries.len();
    if total == 0 {
        return JudgingProgress::default();
    }

    let completed = entries.iter().filter(|e| e.has_been_judged).count();
    let percentage = ((completed as f64 / total as f64) * 100.0).round() as u32;

    JudgingProgress {
        total,
        completed,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompetitionEntry, JudgingSession};
    use chrono::Utc;
    use uuid::Uuid;

    fn result(placement: Option<&str>, score: Option<i16>) -> ResultInfo {
        ResultInfo {
            score,
            placement: placement.map(String::from),
            judge_notes: None,
        }
    }

    fn flight_entry(judged: bool) -> ScoredEntry {
        let entry_id = Uuid::new_v4();
        let judging = judged.then(|| JudgingSession {
            session_id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            entry_id,
            judge_id: Uuid::new_v4(),
            aroma_score: Some(8),
            appearance_score: None,
            flavor_score: None,
            mouthfeel_score: None,
            overall_score: None,
            total_score: Some(8),
            judge_notes: None,
            private_notes: None,
            scoresheet_data: None,
            judged_at: Utc::now(),
            updated_at: Utc::now(),
        });
        ScoredEntry {
            entry: CompetitionEntry {
                entry_id,
                competition_id: Uuid::new_v4(),
                member_id: Uuid::new_v4(),
                bjcp_category_id: Uuid::new_v4(),
                beer_name: "Test Ale".to_string(),
                beer_notes: None,
                entry_number: "00001".to_string(),
                entry_fee_paid: false,
                payment_date: None,
                submitted_at: Utc::now(),
                updated_at: None,
            },
            category: None,
            judging,
            has_been_judged: judged,
        }
    }

    #[test]
    fn placement_labels() {
        assert_eq!(
            award_display(Some(&result(Some("1"), Some(45)))).as_deref(),
            Some("🥇 1st Place")
        );
        assert_eq!(
            award_display(Some(&result(Some("2"), None))).as_deref(),
            Some("🥈 2nd Place")
        );
        assert_eq!(
            award_display(Some(&result(Some("3"), None))).as_deref(),
            Some("🥉 3rd Place")
        );
        assert_eq!(
            award_display(Some(&result(Some("HM"), None))).as_deref(),
            Some("🏅 Honorable Mention")
        );
    }

    #[test]
    fn unplaced_falls_back_to_score_out_of_fifty() {
        assert_eq!(
            award_display(Some(&result(None, Some(37)))).as_deref(),
            Some("Score: 37/50")
        );
    }

    #[test]
    fn no_score_no_placement_reads_no_results() {
        assert_eq!(
            award_display(Some(&result(None, None))).as_deref(),
            Some("No Results")
        );
    }

    #[test]
    fn missing_result_yields_none() {
        assert_eq!(award_display(None), None);
    }

    #[test]
    fn max_total_is_fifty() {
        assert_eq!(MAX_TOTAL_SCORE, 50);
    }

    #[test]
    fn empty_flight_reports_zeroes() {
        assert_eq!(
            progress(&[]),
            JudgingProgress {
                total: 0,
                completed: 0,
                percentage: 0
            }
        );
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let entries = vec![flight_entry(true), flight_entry(false), flight_entry(false)];
        let p = progress(&entries);
        assert_eq!(p.total, 3);
        assert_eq!(p.completed, 1);
        assert_eq!(p.percentage, 33);

        let entries = vec![flight_entry(true), flight_entry(true), flight_entry(false)];
        assert_eq!(progress(&entries).percentage, 67);
    }

    #[test]
    fn complete_flight_is_one_hundred_percent() {
        let entries = vec![flight_entry(true), flight_entry(true)];
        assert_eq!(progress(&entries).percentage, 100);
    }
}
