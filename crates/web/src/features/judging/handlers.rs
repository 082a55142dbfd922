use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::judging::{
    JudgingSessionState, SaveScoresRequest, SetCurrentEntryRequest, StartSessionRequest,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/judging/sessions",
    request_body = StartSessionRequest,
    responses(
        (status = 201, description = "Session opened with the judge's flight and prior scoresheets merged in", body = JudgingSessionState),
        (status = 403, description = "Judge is not assigned to this competition"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Entry deadline has not been reached yet")
    ),
    tag = "judging"
)]
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Response, WebError> {
    let session_state = services::start_session(
        state.db.pool(),
        &state.sessions,
        req.competition_id,
        req.judge_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(session_state)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/judging/sessions/{competition_id}/{judge_id}",
    params(
        ("competition_id" = Uuid, Path, description = "Competition id"),
        ("judge_id" = Uuid, Path, description = "Judge member id")
    ),
    responses(
        (status = 200, description = "Current session state and progress", body = JudgingSessionState),
        (status = 404, description = "No active session for this pairing")
    ),
    tag = "judging"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path((competition_id, judge_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let session_state = services::session_state(&state.sessions, competition_id, judge_id)
        .await
        .ok_or(WebError::NotFound)?;

    Ok(Json(session_state).into_response())
}

#[utoipa::path(
    put,
    path = "/api/judging/sessions/{competition_id}/{judge_id}/current",
    params(
        ("competition_id" = Uuid, Path, description = "Competition id"),
        ("judge_id" = Uuid, Path, description = "Judge member id")
    ),
    request_body = SetCurrentEntryRequest,
    responses(
        (status = 200, description = "Navigation applied; an out-of-range index clears the current entry", body = JudgingSessionState),
        (status = 404, description = "No active session for this pairing")
    ),
    tag = "judging"
)]
pub async fn set_current_entry(
    State(state): State<AppState>,
    Path((competition_id, judge_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetCurrentEntryRequest>,
) -> Result<Response, WebError> {
    let session_state =
        services::set_current_entry(&state.sessions, competition_id, judge_id, req.index)
            .await
            .ok_or(WebError::NotFound)?;

    Ok(Json(session_state).into_response())
}

#[utoipa::path(
    put,
    path = "/api/judging/sessions/{competition_id}/{judge_id}/entries/{entry_id}",
    params(
        ("competition_id" = Uuid, Path, description = "Competition id"),
        ("judge_id" = Uuid, Path, description = "Judge member id"),
        ("entry_id" = Uuid, Path, description = "Entry being scored")
    ),
    request_body = SaveScoresRequest,
    responses(
        (status = 200, description = "Scoresheet saved; session state with the patched entry", body = JudgingSessionState),
        (status = 400, description = "Score out of range or no active session"),
        (status = 404, description = "Entry is not part of this flight")
    ),
    tag = "judging"
)]
pub async fn save_results(
    State(state): State<AppState>,
    Path((competition_id, judge_id, entry_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(req): Json<SaveScoresRequest>,
) -> Result<Response, WebError> {
    let session_state = services::save_results(
        state.db.pool(),
        &state.sessions,
        competition_id,
        judge_id,
        entry_id,
        &req,
    )
    .await?;

    Ok(Json(session_state).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/judging/sessions/{competition_id}/{judge_id}",
    params(
        ("competition_id" = Uuid, Path, description = "Competition id"),
        ("judge_id" = Uuid, Path, description = "Judge member id")
    ),
    responses(
        (status = 204, description = "Session ended; persisted scoresheets are untouched"),
        (status = 404, description = "No active session for this pairing")
    ),
    tag = "judging"
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path((competition_id, judge_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    if !services::end_session(&state.sessions, competition_id, judge_id).await {
        return Err(WebError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
