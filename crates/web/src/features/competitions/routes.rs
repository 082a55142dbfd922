use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_competition, delete_competition, get_competition, list_active_competitions,
    list_competitions, list_competitions_with_stats, update_competition,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/competitions", post(create_competition))
        .route("/api/competitions/stats", get(list_competitions_with_stats))
        .route("/api/competitions/:id", put(update_competition))
        .route("/api/competitions/:id", delete(delete_competition))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/api/competitions", get(list_competitions))
        .route("/api/competitions/active", get(list_active_competitions))
        .route("/api/competitions/:id", get(get_competition))
        .merge(protected)
}
