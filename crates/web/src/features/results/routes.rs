use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{list_results, publish_results};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/competitions/:id/results", post(publish_results))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/api/competitions/:id/results", get(list_results))
        .merge(protected)
}
