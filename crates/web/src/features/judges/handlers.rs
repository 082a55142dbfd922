use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::judge::{AssignJudgeRequest, JudgeAssignmentResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/judges",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Active judge assignments, newest first", body = Vec<JudgeAssignmentResponse>),
        (status = 404, description = "Competition not found")
    ),
    tag = "judges"
)]
pub async fn list_judges(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JudgeAssignmentResponse>>, WebError> {
    let judges = services::list_judges(db.pool(), id).await?;

    Ok(Json(judges))
}

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/judges",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = AssignJudgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Judge assigned", body = JudgeAssignmentResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Unknown judge")
    ),
    tag = "judges"
)]
pub async fn assign_judge(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignJudgeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let assignment = services::assign_judge(db.pool(), id, &req).await?;

    Ok((StatusCode::CREATED, Json(assignment)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/judges/{assignment_id}",
    params(
        ("assignment_id" = Uuid, Path, description = "Assignment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Assignment deactivated; recorded sessions are kept"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assignment not found or already removed")
    ),
    tag = "judges"
)]
pub async fn remove_judge(
    State(db): State<Database>,
    Path(assignment_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::remove_judge(db.pool(), assignment_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
