use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::PaginatedResponse,
    dto::entry::{
        EntryResponse, EntryRosterQuery, EntryRosterRow, MyEntriesResponse, SubmitEntryRequest,
        UpdateEntryRequest, UpdatePaymentRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/members/{member_id}/entries",
    params(
        ("member_id" = Uuid, Path, description = "Authenticated member id")
    ),
    responses(
        (status = 200, description = "The member's entries with groupings and counters", body = MyEntriesResponse)
    ),
    tag = "entries"
)]
pub async fn list_my_entries(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MyEntriesResponse>, WebError> {
    let response = services::list_my_entries(db.pool(), member_id).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/members/{member_id}/entries",
    params(
        ("member_id" = Uuid, Path, description = "Authenticated member id")
    ),
    request_body = SubmitEntryRequest,
    responses(
        (status = 201, description = "Entry submitted with a fresh entry number", body = EntryResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Entry deadline has passed")
    ),
    tag = "entries"
)]
pub async fn submit_entry(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
    Json(req): Json<SubmitEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::submit_entry(db.pool(), member_id, &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry deadline has passed")
    ),
    tag = "entries"
)]
pub async fn update_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::update_entry(db.pool(), id, &req).await?;

    Ok(Json(entry).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry deadline has passed")
    ),
    tag = "entries"
)]
pub async fn delete_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_entry(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/entries/{id}/payment",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    request_body = UpdatePaymentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment status updated", body = EntryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn update_payment(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<Response, WebError> {
    let entry = services::set_payment(db.pool(), id, req.entry_fee_paid).await?;

    Ok(Json(entry).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        EntryRosterQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition roster sorted by the requested column", body = PaginatedResponse<EntryRosterRow>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "entries"
)]
pub async fn list_competition_entries(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Query(query): Query<EntryRosterQuery>,
) -> Result<Response, WebError> {
    query.pagination.validate().map_err(WebError::BadRequest)?;

    let rows =
        services::list_competition_entries(db.pool(), id, query.sort, query.direction).await?;

    let total_items = rows.len() as i64;
    let page: Vec<EntryRosterRow> = rows
        .into_iter()
        .skip(query.pagination.offset())
        .take(query.pagination.limit())
        .collect();

    let response = PaginatedResponse::new(
        page,
        query.pagination.page,
        query.pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}
