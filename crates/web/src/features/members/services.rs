use sqlx::PgPool;
use storage::{error::Result, models::Member, repository::member::MemberRepository};

pub async fn list_members(pool: &PgPool) -> Result<Vec<Member>> {
    let repo = MemberRepository::new(pool);
    repo.list().await
}

/// Judge-eligible members for the assignment picker
pub async fn list_judge_eligible(pool: &PgPool) -> Result<Vec<Member>> {
    let repo = MemberRepository::new(pool);
    repo.list_judge_eligible().await
}
