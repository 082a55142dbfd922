use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::entry::ResultInfo;
use crate::dto::result::{PublishResultRow, ResultRow};
use crate::error::{Result, StorageError};
use crate::models::CompetitionResult;
use crate::services::scoring;

const RESULT_COLUMNS: &str = "result_id, entry_id, score, placement, judge_notes";

#[derive(FromRow)]
struct PublishedRow {
    entry_id: Uuid,
    entry_number: String,
    beer_name: String,
    member_name: String,
    category_number: Option<String>,
    subcategory_letter: Option<String>,
    subcategory_name: Option<String>,
    category_name: Option<String>,
    score: Option<i16>,
    placement: Option<String>,
    judge_notes: Option<String>,
}

/// Repository for published competition results
pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for_entry(&self, entry_id: Uuid) -> Result<Option<CompetitionResult>> {
        let result = sqlx::query_as::<_, CompetitionResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM competition_results WHERE entry_id = $1"
        ))
        .bind(entry_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// One published result per entry; re-publication overwrites
    pub async fn upsert(&self, row: &PublishResultRow) -> Result<CompetitionResult> {
        let result = sqlx::query_as::<_, CompetitionResult>(&format!(
            "INSERT INTO competition_results (entry_id, score, placement, judge_notes) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (entry_id) DO UPDATE SET \
                 score = EXCLUDED.score, \
                 placement = EXCLUDED.placement, \
                 judge_notes = EXCLUDED.judge_notes \
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(row.entry_id)
        .bind(row.score)
        .bind(&row.placement)
        .bind(&row.judge_notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Unknown entry".to_string())
            } else {
                err
            }
        })?;

        Ok(result)
    }

    /// Published results for a competition: placed entries first
    /// (1st, 2nd, 3rd, HM), then the rest by score descending.
    pub async fn list_for_competition(&self, competition_id: Uuid) -> Result<Vec<ResultRow>> {
        let rows = sqlx::query_as::<_, PublishedRow>(
            r#"
            SELECT e.entry_id, e.entry_number, e.beer_name,
                   m.name AS member_name,
                   cat.category_number, cat.subcategory_letter, cat.subcategory_name,
                   cat.category_name,
                   r.score, r.placement, r.judge_notes
            FROM competition_results r
            INNER JOIN competition_entries e ON e.entry_id = r.entry_id
            INNER JOIN members m ON m.member_id = e.member_id
            LEFT JOIN bjcp_categories cat ON cat.category_id = e.bjcp_category_id
            WHERE e.competition_id = $1
            ORDER BY CASE r.placement
                         WHEN '1' THEN 1
                         WHEN '2' THEN 2
                         WHEN '3' THEN 3
                         WHEN 'HM' THEN 4
                         ELSE 5
                     END ASC,
                     r.score DESC NULLS LAST,
                     e.entry_number ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let category_display = match row.category_number.as_deref() {
                    Some(number) => {
                        let code =
                            format!("{}{}", number, row.subcategory_letter.as_deref().unwrap_or_default());
                        match row.subcategory_name.as_deref() {
                            Some(sub) => format!("{code} - {sub}"),
                            None => format!(
                                "{code} - {}",
                                row.category_name.as_deref().unwrap_or_default()
                            ),
                        }
                    }
                    None => "Unknown Category".to_string(),
                };

                let info = ResultInfo {
                    score: row.score,
                    placement: row.placement.clone(),
                    judge_notes: row.judge_notes.clone(),
                };

                ResultRow {
                    entry_id: row.entry_id,
                    entry_number: row.entry_number,
                    beer_name: row.beer_name,
                    member_name: row.member_name,
                    category_display,
                    score: row.score,
                    placement: row.placement,
                    judge_notes: row.judge_notes,
                    award_display: scoring::award_display(Some(&info)),
                }
            })
            .collect())
    }
}
