use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::result::{PublishResultsRequest, ResultRow},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Published results, placed entries first", body = Vec<ResultRow>),
        (status = 404, description = "Competition not found")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ResultRow>>, WebError> {
    let results = services::list_results(db.pool(), id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = PublishResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results written and competition marked published", body = Vec<ResultRow>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition or entry not found")
    ),
    tag = "results"
)]
pub async fn publish_results(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<PublishResultsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let results = services::publish_results(db.pool(), id, &req).await?;

    Ok(Json(results).into_response())
}
