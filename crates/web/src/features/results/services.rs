use sqlx::PgPool;
use storage::{
    dto::result::{PublishResultsRequest, ResultRow},
    error::{Result, StorageError},
    repository::competition::CompetitionRepository,
    repository::entry::EntryRepository,
    repository::result::ResultRepository,
};
use uuid::Uuid;

/// Published results for a competition, placed entries first.
pub async fn list_results(pool: &PgPool, competition_id: Uuid) -> Result<Vec<ResultRow>> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    let repo = ResultRepository::new(pool);
    repo.list_for_competition(competition_id).await
}

/// Write one result per entry and flip the competition to published.
/// Re-publication overwrites previous rows.
pub async fn publish_results(
    pool: &PgPool,
    competition_id: Uuid,
    req: &PublishResultsRequest,
) -> Result<Vec<ResultRow>> {
    let competitions = CompetitionRepository::new(pool);
    competitions.find_by_id(competition_id).await?;

    let entries = EntryRepository::new(pool);
    let results = ResultRepository::new(pool);

    for row in &req.results {
        let entry = entries.find_by_id(row.entry_id).await?;
        if entry.competition_id != competition_id {
            return Err(StorageError::Validation(format!(
                "Entry {} does not belong to this competition",
                row.entry_id
            )));
        }
        results.upsert(row).await?;
    }

    competitions
        .set_results_published(competition_id, true)
        .await?;

    results.list_for_competition(competition_id).await
}
