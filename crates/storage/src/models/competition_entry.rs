use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionEntry {
    pub entry_id: Uuid,
    pub competition_id: Uuid,
    pub member_id: Uuid,
    pub bjcp_category_id: Uuid,
    pub beer_name: String,
    pub beer_notes: Option<String>,
    pub entry_number: String,
    pub entry_fee_paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
