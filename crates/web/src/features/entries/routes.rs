use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    delete_entry, list_competition_entries, list_my_entries, submit_entry, update_entry,
    update_payment,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/competitions/:id/entries", get(list_competition_entries))
        .route("/api/entries/:id/payment", put(update_payment))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/api/members/:member_id/entries", get(list_my_entries))
        .route("/api/members/:member_id/entries", post(submit_entry))
        .route("/api/entries/:id", put(update_entry))
        .route("/api/entries/:id", delete(delete_entry))
        .merge(protected)
}
