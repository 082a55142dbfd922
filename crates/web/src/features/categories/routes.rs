use axum::{Router, routing::get};

use super::handlers::{list_categories, list_grouped_categories};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/grouped", get(list_grouped_categories))
}
