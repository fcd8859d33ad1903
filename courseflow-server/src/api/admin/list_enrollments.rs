use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use courseflow_core::entities::enrollment::ListEnrollments;
use courseflow_sdk::objects::admin::{ListEnrollmentsQuery, clamp_pagination};
use kanau::processor::Processor;

use crate::api::extractors::AdminAuth;
use crate::state::AppState;

use super::{AdminApiError, enrollment_to_admin_response};

/// `GET /enrollments`: list enrollments, newest first.
pub async fn list_enrollments(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListEnrollmentsQuery>,
) -> Result<impl IntoResponse, AdminApiError> {
    let (limit, offset) = clamp_pagination(query.limit, query.offset);

    let records = state
        .processor()
        .process(ListEnrollments {
            limit,
            offset,
            payment_status: query.payment_status.map(Into::into),
        })
        .await
        .map_err(AdminApiError::Database)?;

    let response: Vec<_> = records.iter().map(enrollment_to_admin_response).collect();
    Ok(Json(response))
}
