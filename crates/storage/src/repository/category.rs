use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::BjcpCategory;

const CATEGORY_COLUMNS: &str = "category_id, category_number, subcategory_letter, \
     subcategory_name, category_name, description";

/// Repository for BJCP style-guideline reference data
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories in guideline order
    pub async fn list(&self) -> Result<Vec<BjcpCategory>> {
        let categories = sqlx::query_as::<_, BjcpCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM bjcp_categories \
             ORDER BY category_number ASC, subcategory_letter ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<BjcpCategory> {
        let category = sqlx::query_as::<_, BjcpCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM bjcp_categories WHERE category_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }
}
