use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub member_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_officer: bool,
    pub is_judge: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
