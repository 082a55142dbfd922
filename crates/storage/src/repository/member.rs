use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Member;

const MEMBER_COLUMNS: &str =
    "member_id, name, email, phone, is_officer, is_judge, created_at";

/// Repository for member profile reads. Member records are owned by the
/// auth subsystem; this side only reads them.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    /// Members flagged as judge-eligible, for assignment pickers
    pub async fn list_judge_eligible(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE is_judge ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(member)
    }
}
