use sqlx::PgPool;
use storage::{
    dto::competition::{
        CompetitionStatsResponse, CreateCompetitionRequest, UpdateCompetitionRequest,
    },
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
};

/// List all competitions, newest deadline first
pub async fn list_competitions(pool: &PgPool) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.list().await
}

/// Competitions still accepting entries
pub async fn list_active_competitions(pool: &PgPool) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.list_active().await
}

/// List competitions with entry and fee aggregates
pub async fn list_competitions_with_stats(pool: &PgPool) -> Result<Vec<CompetitionStatsResponse>> {
    let repo = CompetitionRepository::new(pool);
    repo.list_with_stats().await
}

pub async fn get_competition(pool: &PgPool, id: uuid::Uuid) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.create(request).await
}

pub async fn update_competition(
    pool: &PgPool,
    id: uuid::Uuid,
    request: &UpdateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

pub async fn delete_competition(pool: &PgPool, id: uuid::Uuid) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await?;
    repo.delete(id).await
}
