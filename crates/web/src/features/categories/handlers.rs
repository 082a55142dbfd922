use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::category::CategoryGroup, models::BjcpCategory};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All BJCP categories in guideline order", body = Vec<BjcpCategory>)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(db): State<Database>,
) -> Result<Json<Vec<BjcpCategory>>, WebError> {
    let categories = services::list_categories(db.pool()).await?;

    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/grouped",
    responses(
        (status = 200, description = "Categories grouped by main category number", body = Vec<CategoryGroup>)
    ),
    tag = "categories"
)]
pub async fn list_grouped_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let groups = services::list_grouped_categories(db.pool()).await?;

    Ok(Json(groups).into_response())
}
