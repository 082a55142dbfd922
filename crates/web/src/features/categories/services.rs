use sqlx::PgPool;
use storage::{
    dto::category::{CategoryGroup, group_categories},
    error::Result,
    models::BjcpCategory,
    repository::category::CategoryRepository,
};

/// All BJCP categories in guideline order
pub async fn list_categories(pool: &PgPool) -> Result<Vec<BjcpCategory>> {
    let repo = CategoryRepository::new(pool);
    repo.list().await
}

/// Categories grouped under their main number, for style pickers
pub async fn list_grouped_categories(pool: &PgPool) -> Result<Vec<CategoryGroup>> {
    let repo = CategoryRepository::new(pool);
    let categories = repo.list().await?;
    Ok(group_categories(&categories))
}
