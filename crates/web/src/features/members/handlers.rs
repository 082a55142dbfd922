use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use storage::{Database, models::Member};
use utoipa::IntoParams;

use crate::error::WebError;

use super::services;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MemberListQuery {
    /// Restrict to judge-eligible members
    #[serde(default)]
    pub judges_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/members",
    params(MemberListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member directory, name order", body = Vec<Member>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "members"
)]
pub async fn list_members(
    State(db): State<Database>,
    Query(query): Query<MemberListQuery>,
) -> Result<Json<Vec<Member>>, WebError> {
    let members = if query.judges_only {
        services::list_judge_eligible(db.pool()).await?
    } else {
        services::list_members(db.pool()).await?
    };

    Ok(Json(members))
}
