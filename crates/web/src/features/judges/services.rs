use sqlx::PgPool;
use storage::{
    dto::judge::{AssignJudgeRequest, JudgeAssignmentResponse},
    error::Result,
    repository::competition::CompetitionRepository,
    repository::judge::JudgeAssignmentRepository,
};
use uuid::Uuid;

/// Active judge assignments for a competition, newest first
pub async fn list_judges(
    pool: &PgPool,
    competition_id: Uuid,
) -> Result<Vec<JudgeAssignmentResponse>> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    let repo = JudgeAssignmentRepository::new(pool);
    repo.list_for_competition(competition_id).await
}

pub async fn assign_judge(
    pool: &PgPool,
    competition_id: Uuid,
    req: &AssignJudgeRequest,
) -> Result<JudgeAssignmentResponse> {
    CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;

    let repo = JudgeAssignmentRepository::new(pool);
    repo.insert(competition_id, req).await
}

/// Soft removal; recorded judging sessions survive
pub async fn remove_judge(pool: &PgPool, assignment_id: Uuid) -> Result<()> {
    let repo = JudgeAssignmentRepository::new(pool);
    repo.deactivate(assignment_id).await
}
