use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{assign_judge, list_judges, remove_judge};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/competitions/:id/judges", post(assign_judge))
        .route("/api/judges/:assignment_id", delete(remove_judge))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/api/competitions/:id/judges", get(list_judges))
        .merge(protected)
}
