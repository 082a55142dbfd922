use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::competition::{
    CompetitionStatsResponse, CreateCompetitionRequest, UpdateCompetitionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Competition;

const COMPETITION_COLUMNS: &str = "competition_id, name, description, entry_deadline, \
     judging_date, active, results_published, entry_fee, created_at";

#[derive(FromRow)]
struct CompetitionStatsRow {
    competition_id: Uuid,
    name: String,
    description: Option<String>,
    entry_deadline: DateTime<Utc>,
    judging_date: Option<DateTime<Utc>>,
    active: bool,
    results_published: bool,
    entry_fee: Option<Decimal>,
    created_at: DateTime<Utc>,
    entry_count: i64,
    paid_count: i64,
}

/// Repository for competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions, most recent deadline first
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions ORDER BY entry_deadline DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// List competitions whose entry window is still open, soonest
    /// deadline first
    pub async fn list_active(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions \
             WHERE active AND entry_deadline > now() \
             ORDER BY entry_deadline ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// List all competitions with entry and payment aggregates
    pub async fn list_with_stats(&self) -> Result<Vec<CompetitionStatsResponse>> {
        let rows = sqlx::query_as::<_, CompetitionStatsRow>(
            r#"
            SELECT c.competition_id, c.name, c.description, c.entry_deadline,
                   c.judging_date, c.active, c.results_published, c.entry_fee, c.created_at,
                   COUNT(e.entry_id) AS entry_count,
                   COUNT(e.entry_id) FILTER (WHERE e.entry_fee_paid) AS paid_count
            FROM competitions c
            LEFT JOIN competition_entries e ON e.competition_id = c.competition_id
            GROUP BY c.competition_id
            ORDER BY c.entry_deadline DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let competition = Competition {
                    competition_id: row.competition_id,
                    name: row.name,
                    description: row.description,
                    entry_deadline: row.entry_deadline,
                    judging_date: row.judging_date,
                    active: row.active,
                    results_published: row.results_published,
                    entry_fee: row.entry_fee,
                    created_at: row.created_at,
                };
                CompetitionStatsResponse::new(competition, row.entry_count, row.paid_count)
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE competition_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "INSERT INTO competitions (name, description, entry_deadline, judging_date, active, entry_fee) \
             VALUES ($1, $2, $3, $4, true, $5) \
             RETURNING {COMPETITION_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.entry_deadline)
        .bind(req.judging_date)
        .bind(req.entry_fee)
        .fetch_one(self.pool)
        .await?;

        Ok(competition)
    }

    /// Partial update: unset request fields keep their current values
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Competition,
        req: &UpdateCompetitionRequest,
    ) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "UPDATE competitions \
             SET name = $2, description = $3, entry_deadline = $4, judging_date = $5, \
                 active = $6, results_published = $7, entry_fee = $8 \
             WHERE competition_id = $1 \
             RETURNING {COMPETITION_COLUMNS}"
        ))
        .bind(id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.description.as_ref().or(existing.description.as_ref()))
        .bind(req.entry_deadline.unwrap_or(existing.entry_deadline))
        .bind(req.judging_date.or(existing.judging_date))
        .bind(req.active.unwrap_or(existing.active))
        .bind(req.results_published.unwrap_or(existing.results_published))
        .bind(req.entry_fee.or(existing.entry_fee))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    pub async fn set_results_published(&self, id: Uuid, published: bool) -> Result<()> {
        let result =
            sqlx::query("UPDATE competitions SET results_published = $2 WHERE competition_id = $1")
                .bind(id)
                .bind(published)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Hard delete; competitions with entries are protected by the
    /// entry foreign key.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE competition_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    StorageError::ConstraintViolation(
                        "Competition still has entries".to_string(),
                    )
                } else {
                    err
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
