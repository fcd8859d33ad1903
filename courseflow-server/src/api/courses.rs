//! Public course catalog.
//!
//! - `GET /` – published courses, filtered and sorted by query parameters

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use courseflow_core::catalog;
use courseflow_core::entities::course::ListPublishedCourses;
use courseflow_sdk::objects::{CourseSummary, ListCoursesQuery};
use kanau::processor::Processor;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_courses))
}

#[derive(Debug)]
enum CatalogApiError {
    Database(sqlx::Error),
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CatalogApiError::Database(e) => {
                tracing::error!(error = %e, "Catalog API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

/// `GET /`: list published courses.
async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<Vec<CourseSummary>>, CatalogApiError> {
    let records = state
        .processor()
        .process(ListPublishedCourses)
        .await
        .map_err(CatalogApiError::Database)?;
    Ok(Json(catalog::select(records, &query)))
}
