use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::entry::{
    CategoryInfo, CompetitionInfo, EntryResponse, EntryRosterRow, ResultInfo, SubmitEntryRequest,
    UpdateEntryRequest,
};
use crate::dto::judging::ScoredEntry;
use crate::error::{Result, StorageError};
use crate::models::CompetitionEntry;

const ENTRY_COLUMNS: &str = "entry_id, competition_id, member_id, bjcp_category_id, beer_name, \
     beer_notes, entry_number, entry_fee_paid, payment_date, submitted_at, updated_at";

/// Attempts before giving up on finding a free entry number. With a
/// 100k number space per competition this only trips on a nearly-full
/// competition.
const ENTRY_NUMBER_ATTEMPTS: u32 = 10;

/// Random 5-digit zero-padded entry number, e.g. "00042".
pub fn generate_entry_number() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..=99_999);
    format!("{n:05}")
}

#[derive(FromRow)]
struct MemberEntryRow {
    entry_id: Uuid,
    competition_id: Uuid,
    member_id: Uuid,
    bjcp_category_id: Uuid,
    beer_name: String,
    beer_notes: Option<String>,
    entry_number: String,
    entry_fee_paid: bool,
    payment_date: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    competition_name: String,
    entry_deadline: DateTime<Utc>,
    judging_date: Option<DateTime<Utc>>,
    active: bool,
    results_published: bool,
    category_number: Option<String>,
    subcategory_letter: Option<String>,
    subcategory_name: Option<String>,
    category_name: Option<String>,
    result_id: Option<Uuid>,
    result_score: Option<i16>,
    placement: Option<String>,
    result_notes: Option<String>,
}

#[derive(FromRow)]
struct RosterRow {
    entry_id: Uuid,
    competition_id: Uuid,
    member_id: Uuid,
    bjcp_category_id: Uuid,
    beer_name: String,
    beer_notes: Option<String>,
    entry_number: String,
    entry_fee_paid: bool,
    payment_date: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    member_name: String,
    member_email: String,
    member_phone: Option<String>,
    category_number: Option<String>,
    subcategory_letter: Option<String>,
    subcategory_name: Option<String>,
    category_name: Option<String>,
}

#[derive(FromRow)]
struct FlightRow {
    entry_id: Uuid,
    competition_id: Uuid,
    member_id: Uuid,
    bjcp_category_id: Uuid,
    beer_name: String,
    beer_notes: Option<String>,
    entry_number: String,
    entry_fee_paid: bool,
    payment_date: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    category_number: Option<String>,
    subcategory_letter: Option<String>,
    subcategory_name: Option<String>,
    category_name: Option<String>,
}

impl MemberEntryRow {
    fn into_response(self, now: DateTime<Utc>) -> EntryResponse {
        let competition = CompetitionInfo {
            competition_id: self.competition_id,
            name: self.competition_name,
            entry_deadline: self.entry_deadline,
            judging_date: self.judging_date,
            active: self.active,
            results_published: self.results_published,
        };

        let bjcp_category = self.category_number.map(|number| CategoryInfo {
            category_id: self.bjcp_category_id,
            category_number: number,
            subcategory_letter: self.subcategory_letter,
            subcategory_name: self.subcategory_name,
            category_name: self.category_name.unwrap_or_default(),
        });

        let category_display = bjcp_category
            .as_ref()
            .map(category_short_display)
            .unwrap_or_else(|| "Unknown Category".to_string());

        let has_results = self.result_id.is_some();
        let result = self.result_id.map(|_| ResultInfo {
            score: self.result_score,
            placement: self.placement,
            judge_notes: self.result_notes,
        });

        let can_edit = competition.active && now < competition.entry_deadline;
        let days_until_deadline = if competition.active {
            let days =
                ((competition.entry_deadline - now).num_seconds() as f64 / 86_400.0).ceil() as i64;
            days.max(0)
        } else {
            0
        };

        EntryResponse {
            entry: CompetitionEntry {
                entry_id: self.entry_id,
                competition_id: self.competition_id,
                member_id: self.member_id,
                bjcp_category_id: self.bjcp_category_id,
                beer_name: self.beer_name,
                beer_notes: self.beer_notes,
                entry_number: self.entry_number,
                entry_fee_paid: self.entry_fee_paid,
                payment_date: self.payment_date,
                submitted_at: self.submitted_at,
                updated_at: self.updated_at,
            },
            competition,
            bjcp_category,
            result,
            category_display,
            can_edit,
            days_until_deadline,
            has_results,
        }
    }
}

/// "21A - American IPA"
fn category_short_display(cat: &CategoryInfo) -> String {
    let code = format!(
        "{}{}",
        cat.category_number,
        cat.subcategory_letter.as_deref().unwrap_or_default()
    );
    match cat.subcategory_name.as_deref() {
        Some(sub) => format!("{code} - {sub}"),
        None => format!("{code} - {}", cat.category_name),
    }
}

/// "21A - IPA: American IPA" (officer roster format)
fn category_roster_display(
    number: &str,
    letter: Option<&str>,
    name: &str,
    sub_name: Option<&str>,
) -> String {
    let mut display = format!("{}{} - {}", number, letter.unwrap_or_default(), name);
    if let Some(sub) = sub_name {
        display.push_str(": ");
        display.push_str(sub);
    }
    display
}

/// Repository for competition entry database operations
pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CompetitionEntry> {
        let entry = sqlx::query_as::<_, CompetitionEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM competition_entries WHERE entry_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    /// All of a member's entries joined with competition, category, and
    /// published result, newest submission first.
    pub async fn list_for_member(&self, member_id: Uuid) -> Result<Vec<EntryResponse>> {
        let rows = sqlx::query_as::<_, MemberEntryRow>(
            r#"
            SELECT e.entry_id, e.competition_id, e.member_id, e.bjcp_category_id,
                   e.beer_name, e.beer_notes, e.entry_number, e.entry_fee_paid,
                   e.payment_date, e.submitted_at, e.updated_at,
                   c.name AS competition_name, c.entry_deadline, c.judging_date,
                   c.active, c.results_published,
                   cat.category_number, cat.subcategory_letter, cat.subcategory_name,
                   cat.category_name,
                   r.result_id, r.score AS result_score, r.placement,
                   r.judge_notes AS result_notes
            FROM competition_entries e
            INNER JOIN competitions c ON c.competition_id = e.competition_id
            LEFT JOIN bjcp_categories cat ON cat.category_id = e.bjcp_category_id
            LEFT JOIN competition_results r ON r.entry_id = e.entry_id
            WHERE e.member_id = $1
            ORDER BY e.submitted_at DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_response(now)).collect())
    }

    /// Officer roster: every entry in a competition with brewer and
    /// style details joined in, entry-number order.
    pub async fn list_for_competition(&self, competition_id: Uuid) -> Result<Vec<EntryRosterRow>> {
        let rows = sqlx::query_as::<_, RosterRow>(
            r#"
            SELECT e.entry_id, e.competition_id, e.member_id, e.bjcp_category_id,
                   e.beer_name, e.beer_notes, e.entry_number, e.entry_fee_paid,
                   e.payment_date, e.submitted_at, e.updated_at,
                   m.name AS member_name, m.email AS member_email, m.phone AS member_phone,
                   cat.category_number, cat.subcategory_letter, cat.subcategory_name,
                   cat.category_name
            FROM competition_entries e
            INNER JOIN members m ON m.member_id = e.member_id
            LEFT JOIN bjcp_categories cat ON cat.category_id = e.bjcp_category_id
            WHERE e.competition_id = $1
            ORDER BY e.entry_number ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let category_display = match row.category_number.as_deref() {
                    Some(number) => category_roster_display(
                        number,
                        row.subcategory_letter.as_deref(),
                        row.category_name.as_deref().unwrap_or_default(),
                        row.subcategory_name.as_deref(),
                    ),
                    None => "Unknown Category".to_string(),
                };
                EntryRosterRow {
                    entry: CompetitionEntry {
                        entry_id: row.entry_id,
                        competition_id: row.competition_id,
                        member_id: row.member_id,
                        bjcp_category_id: row.bjcp_category_id,
                        beer_name: row.beer_name,
                        beer_notes: row.beer_notes,
                        entry_number: row.entry_number,
                        entry_fee_paid: row.entry_fee_paid,
                        payment_date: row.payment_date,
                        submitted_at: row.submitted_at,
                        updated_at: row.updated_at,
                    },
                    member_name: row.member_name,
                    member_email: row.member_email,
                    member_phone: row.member_phone,
                    category_number: row.category_number.unwrap_or_default(),
                    subcategory_letter: row.subcategory_letter,
                    subcategory_name: row.subcategory_name,
                    category_name: row.category_name.unwrap_or_default(),
                    category_display,
                }
            })
            .collect())
    }

    /// A judge's flight: all entries of the competition ordered by
    /// style category, then entry number, so every judge walks the same
    /// style-grouped sequence.
    pub async fn list_for_judging(&self, competition_id: Uuid) -> Result<Vec<ScoredEntry>> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT e.entry_id, e.competition_id, e.member_id, e.bjcp_category_id,
                   e.beer_name, e.beer_notes, e.entry_number, e.entry_fee_paid,
                   e.payment_date, e.submitted_at, e.updated_at,
                   cat.category_number, cat.subcategory_letter, cat.subcategory_name,
                   cat.category_name
            FROM competition_entries e
            LEFT JOIN bjcp_categories cat ON cat.category_id = e.bjcp_category_id
            WHERE e.competition_id = $1
            ORDER BY e.bjcp_category_id ASC, e.entry_number ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ScoredEntry {
                category: row.category_number.map(|number| CategoryInfo {
                    category_id: row.bjcp_category_id,
                    category_number: number,
                    subcategory_letter: row.subcategory_letter,
                    subcategory_name: row.subcategory_name,
                    category_name: row.category_name.unwrap_or_default(),
                }),
                entry: CompetitionEntry {
                    entry_id: row.entry_id,
                    competition_id: row.competition_id,
                    member_id: row.member_id,
                    bjcp_category_id: row.bjcp_category_id,
                    beer_name: row.beer_name,
                    beer_notes: row.beer_notes,
                    entry_number: row.entry_number,
                    entry_fee_paid: row.entry_fee_paid,
                    payment_date: row.payment_date,
                    submitted_at: row.submitted_at,
                    updated_at: row.updated_at,
                },
                judging: None,
                has_been_judged: false,
            })
            .collect())
    }

    /// Single entry with competition, category, and result joined in —
    /// the shape mutation endpoints hand back to the caller.
    pub async fn find_joined(&self, entry_id: Uuid) -> Result<EntryResponse> {
        let row = sqlx::query_as::<_, MemberEntryRow>(
            r#"
            SELECT e.entry_id, e.competition_id, e.member_id, e.bjcp_category_id,
                   e.beer_name, e.beer_notes, e.entry_number, e.entry_fee_paid,
                   e.payment_date, e.submitted_at, e.updated_at,
                   c.name AS competition_name, c.entry_deadline, c.judging_date,
                   c.active, c.results_published,
                   cat.category_number, cat.subcategory_letter, cat.subcategory_name,
                   cat.category_name,
                   r.result_id, r.score AS result_score, r.placement,
                   r.judge_notes AS result_notes
            FROM competition_entries e
            INNER JOIN competitions c ON c.competition_id = e.competition_id
            LEFT JOIN bjcp_categories cat ON cat.category_id = e.bjcp_category_id
            LEFT JOIN competition_results r ON r.entry_id = e.entry_id
            WHERE e.entry_id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into_response(Utc::now()))
    }

    /// Insert a new entry, retrying entry-number collisions within the
    /// competition a bounded number of times.
    pub async fn insert(&self, member_id: Uuid, req: &SubmitEntryRequest) -> Result<CompetitionEntry> {
        for _ in 0..ENTRY_NUMBER_ATTEMPTS {
            let entry_number = generate_entry_number();
            match self.try_insert(member_id, req, &entry_number).await {
                Err(e) if e.is_unique_violation() => continue,
                other => return other,
            }
        }

        Err(StorageError::ConstraintViolation(
            "Could not allocate a unique entry number".to_string(),
        ))
    }

    async fn try_insert(
        &self,
        member_id: Uuid,
        req: &SubmitEntryRequest,
        entry_number: &str,
    ) -> Result<CompetitionEntry> {
        let entry = sqlx::query_as::<_, CompetitionEntry>(&format!(
            "INSERT INTO competition_entries \
                 (competition_id, member_id, bjcp_category_id, beer_name, beer_notes, entry_number) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(req.competition_id)
        .bind(member_id)
        .bind(req.bjcp_category_id)
        .bind(&req.beer_name)
        .bind(&req.beer_notes)
        .bind(entry_number)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Partial update of the member-editable fields; stamps updated_at
    pub async fn update(
        &self,
        id: Uuid,
        existing: &CompetitionEntry,
        req: &UpdateEntryRequest,
    ) -> Result<CompetitionEntry> {
        let entry = sqlx::query_as::<_, CompetitionEntry>(&format!(
            "UPDATE competition_entries \
             SET beer_name = $2, beer_notes = $3, bjcp_category_id = $4, updated_at = now() \
             WHERE entry_id = $1 \
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(id)
        .bind(req.beer_name.as_ref().unwrap_or(&existing.beer_name))
        .bind(req.beer_notes.as_ref().or(existing.beer_notes.as_ref()))
        .bind(req.bjcp_category_id.unwrap_or(existing.bjcp_category_id))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    /// Officer payment toggle; payment_date tracks the paid flag
    pub async fn set_payment(&self, id: Uuid, paid: bool) -> Result<CompetitionEntry> {
        let entry = sqlx::query_as::<_, CompetitionEntry>(&format!(
            "UPDATE competition_entries \
             SET entry_fee_paid = $2, \
                 payment_date = CASE WHEN $2 THEN now() ELSE NULL END \
             WHERE entry_id = $1 \
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(id)
        .bind(paid)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competition_entries WHERE entry_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_numbers_are_five_digit_zero_padded() {
        for _ in 0..100 {
            let number = generate_entry_number();
            assert_eq!(number.len(), 5);
            assert!(number.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn roster_display_includes_subcategory_name() {
        assert_eq!(
            category_roster_display("21", Some("A"), "IPA", Some("American IPA")),
            "21A - IPA: American IPA"
        );
        assert_eq!(category_roster_display("34", None, "Specialty Beer", None), "34 - Specialty Beer");
    }
}
