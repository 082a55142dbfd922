use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{end_session, get_session, save_results, set_current_entry, start_session};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/judging/sessions", post(start_session))
        .route(
            "/api/judging/sessions/:competition_id/:judge_id",
            get(get_session),
        )
        .route(
            "/api/judging/sessions/:competition_id/:judge_id",
            delete(end_session),
        )
        .route(
            "/api/judging/sessions/:competition_id/:judge_id/current",
            put(set_current_entry),
        )
        .route(
            "/api/judging/sessions/:competition_id/:judge_id/entries/:entry_id",
            put(save_results),
        )
}
