//! In-memory judging session for one (competition, judge) pairing.
//!
//! The session walks a judge through their flight: entries ordered by
//! style category then entry number, each carrying any previously
//! recorded scoresheet. All durable state lives in the
//! competition_judging_sessions rows; dropping a session loses nothing.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::judging::{JudgingProgress, JudgingSessionState, SaveScoresRequest, ScoredEntry};
use crate::error::{Result, StorageError};
use crate::models::{Competition, JudgingSession as SessionRow};
use crate::repository::competition::CompetitionRepository;
use crate::repository::entry::EntryRepository;
use crate::repository::judge::JudgeAssignmentRepository;
use crate::repository::judging::JudgingSessionRepository;
use crate::services::scoring;

pub struct JudgingSession {
    competition: Competition,
    judge_id: Uuid,
    entries: Vec<ScoredEntry>,
    current_index: Option<usize>,
}

impl JudgingSession {
    /// Open a session: verify the judge's assignment, confirm the entry
    /// window has closed, load the flight, and merge previously
    /// recorded scoresheets onto it.
    pub async fn start(pool: &PgPool, competition_id: Uuid, judge_id: Uuid) -> Result<Self> {
        if JudgeAssignmentRepository::new(pool)
            .find_active(competition_id, judge_id)
            .await?
            .is_none()
        {
            return Err(StorageError::NotAssigned);
        }

        let competition = CompetitionRepository::new(pool)
            .find_by_id(competition_id)
            .await?;
        if Utc::now() < competition.entry_deadline {
            return Err(StorageError::DeadlineNotReached);
        }

        let entries = EntryRepository::new(pool)
            .list_for_judging(competition_id)
            .await?;
        let sessions = JudgingSessionRepository::new(pool)
            .list_for_judge(competition_id, judge_id)
            .await?;

        Ok(Self::from_parts(
            competition,
            judge_id,
            merge_sessions(entries, sessions),
        ))
    }

    pub(crate) fn from_parts(
        competition: Competition,
        judge_id: Uuid,
        entries: Vec<ScoredEntry>,
    ) -> Self {
        let current_index = (!entries.is_empty()).then_some(0);
        Self {
            competition,
            judge_id,
            entries,
            current_index,
        }
    }

    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    pub fn judge_id(&self) -> Uuid {
        self.judge_id
    }

    pub fn entries(&self) -> &[ScoredEntry] {
        &self.entries
    }

    pub fn current_entry(&self) -> Option<&ScoredEntry> {
        self.current_index.and_then(|i| self.entries.get(i))
    }

    /// Pure navigation. An out-of-range index clears the current entry.
    pub fn set_current_entry(&mut self, index: usize) {
        self.current_index = (index < self.entries.len()).then_some(index);
    }

    pub fn progress(&self) -> JudgingProgress {
        scoring::progress(&self.entries)
    }

    /// Persist a scoresheet for one entry in the flight and patch the
    /// in-memory copy. The write is an atomic upsert on
    /// (competition, entry, judge); saving twice updates the same row.
    pub async fn save_results(
        &mut self,
        pool: &PgPool,
        entry_id: Uuid,
        req: &SaveScoresRequest,
    ) -> Result<SessionRow> {
        req.validate()
            .map_err(|e| StorageError::Validation(e.to_string()))?;

        if !self.entries.iter().any(|e| e.entry.entry_id == entry_id) {
            return Err(StorageError::NotFound);
        }

        let saved = JudgingSessionRepository::new(pool)
            .upsert(
                self.competition.competition_id,
                entry_id,
                self.judge_id,
                req,
            )
            .await?;

        self.apply_saved(entry_id, saved.clone());
        Ok(saved)
    }

    fn apply_saved(&mut self, entry_id: Uuid, saved: SessionRow) {
        let has_scores = saved.has_scores();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.entry.entry_id == entry_id)
        {
            entry.judging = Some(saved);
            entry.has_been_judged = has_scores;
        }
    }

    /// Serializable snapshot for the API layer.
    pub fn state(&self) -> JudgingSessionState {
        JudgingSessionState {
            competition: self.competition.clone(),
            judge_id: self.judge_id,
            entries: self.entries.clone(),
            current_entry: self.current_entry().cloned(),
            progress: self.progress(),
        }
    }
}

/// Left-merge recorded sessions onto the flight by entry id. Entries
/// without a session stay unjudged; a session row whose score fields
/// are all null does not count as judged.
fn merge_sessions(mut entries: Vec<ScoredEntry>, sessions: Vec<SessionRow>) -> Vec<ScoredEntry> {
    for entry in &mut entries {
        if let Some(session) = sessions
            .iter()
            .find(|s| s.entry_id == entry.entry.entry_id)
        {
            entry.has_been_judged = session.has_scores();
            entry.judging = Some(session.clone());
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompetitionEntry;
    use chrono::Duration;

    fn competition() -> Competition {
        Competition {
            competition_id: Uuid::new_v4(),
            name: "Fall Classic".to_string(),
            description: None,
            entry_deadline: Utc::now() - Duration::days(1),
            judging_date: Some(Utc::now() + Duration::days(6)),
            active: true,
            results_published: false,
            entry_fee: None,
            created_at: Utc::now() - Duration::days(30),
        }
    }

    fn flight_entry(competition_id: Uuid, number: &str) -> ScoredEntry {
        ScoredEntry {
            entry: CompetitionEntry {
                entry_id: Uuid::new_v4(),
                competition_id,
                member_id: Uuid::new_v4(),
                bjcp_category_id: Uuid::new_v4(),
                beer_name: format!("Beer {number}"),
                beer_notes: None,
                entry_number: number.to_string(),
                entry_fee_paid: true,
                payment_date: None,
                submitted_at: Utc::now() - Duration::days(10),
                updated_at: None,
            },
            category: None,
            judging: None,
            has_been_judged: false,
        }
    }

    fn session_row(competition_id: Uuid, entry_id: Uuid, aroma: Option<i16>) -> SessionRow {
        SessionRow {
            session_id: Uuid::new_v4(),
            competition_id,
            entry_id,
            judge_id: Uuid::new_v4(),
            aroma_score: aroma,
            appearance_score: None,
            flavor_score: None,
            mouthfeel_score: None,
            overall_score: None,
            total_score: aroma,
            judge_notes: None,
            private_notes: None,
            scoresheet_data: None,
            judged_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn merge_attaches_sessions_by_entry_id() {
        let comp = competition();
        let entries = vec![
            flight_entry(comp.competition_id, "00007"),
            flight_entry(comp.competition_id, "00042"),
        ];
        let scored_id = entries[1].entry.entry_id;
        let sessions = vec![session_row(comp.competition_id, scored_id, Some(9))];

        let merged = merge_sessions(entries, sessions);
        assert!(merged[0].judging.is_none());
        assert!(!merged[0].has_been_judged);
        assert!(merged[1].judging.is_some());
        assert!(merged[1].has_been_judged);
    }

    #[test]
    fn all_null_session_row_is_not_judged() {
        let comp = competition();
        let entries = vec![flight_entry(comp.competition_id, "00001")];
        let entry_id = entries[0].entry.entry_id;
        let sessions = vec![session_row(comp.competition_id, entry_id, None)];

        let merged = merge_sessions(entries, sessions);
        assert!(merged[0].judging.is_some());
        assert!(!merged[0].has_been_judged);
    }

    #[test]
    fn first_entry_becomes_current() {
        let comp = competition();
        let entries = vec![
            flight_entry(comp.competition_id, "00007"),
            flight_entry(comp.competition_id, "00042"),
        ];
        let session = JudgingSession::from_parts(comp, Uuid::new_v4(), entries);
        assert_eq!(
            session.current_entry().map(|e| e.entry.entry_number.as_str()),
            Some("00007")
        );
    }

    #[test]
    fn empty_flight_has_no_current_entry() {
        let session = JudgingSession::from_parts(competition(), Uuid::new_v4(), Vec::new());
        assert!(session.current_entry().is_none());
        assert_eq!(session.progress(), JudgingProgress::default());
    }

    #[test]
    fn out_of_range_navigation_clears_current() {
        let comp = competition();
        let entries = vec![flight_entry(comp.competition_id, "00007")];
        let mut session = JudgingSession::from_parts(comp, Uuid::new_v4(), entries);

        session.set_current_entry(5);
        assert!(session.current_entry().is_none());

        session.set_current_entry(0);
        assert!(session.current_entry().is_some());
    }

    #[test]
    fn patched_save_keeps_entry_judged_and_refreshes_current() {
        let comp = competition();
        let comp_id = comp.competition_id;
        let entries = vec![flight_entry(comp_id, "00007")];
        let entry_id = entries[0].entry.entry_id;
        let mut session = JudgingSession::from_parts(comp, Uuid::new_v4(), entries);

        session.apply_saved(entry_id, session_row(comp_id, entry_id, Some(10)));
        assert!(session.entries()[0].has_been_judged);
        assert_eq!(session.progress().completed, 1);

        // Second save with different scores: still one entry, still judged
        session.apply_saved(entry_id, session_row(comp_id, entry_id, Some(7)));
        assert_eq!(session.entries().len(), 1);
        assert!(session.entries()[0].has_been_judged);
        assert_eq!(
            session.entries()[0]
                .judging
                .as_ref()
                .and_then(|j| j.aroma_score),
            Some(7)
        );
        assert_eq!(
            session
                .current_entry()
                .and_then(|e| e.judging.as_ref())
                .and_then(|j| j.aroma_score),
            Some(7)
        );
    }
}
