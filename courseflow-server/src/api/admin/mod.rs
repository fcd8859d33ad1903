//! Admin API handlers.
//!
//! These endpoints are called by the admin dashboard frontend and require
//! the `Courseflow-Admin-Authorization` header with the plaintext admin secret.
//!
//! # Endpoints
//!
//! - `GET /enrollments` – list enrollments (paginated, filterable by payment status)

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use courseflow_core::entities::enrollment::EnrollmentRecord;
use courseflow_sdk::objects::admin::AdminEnrollmentResponse;

use crate::state::AppState;

mod list_enrollments;

/// Build the Admin API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/enrollments", get(list_enrollments::list_enrollments))
}

/// Errors that can occur in Admin API handlers.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    Database(sqlx::Error),
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "Admin API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

pub(crate) fn enrollment_to_admin_response(r: &EnrollmentRecord) -> AdminEnrollmentResponse {
    AdminEnrollmentResponse {
        id: r.id,
        user_id: r.user_id,
        course_id: r.course_id,
        package: r.package.clone(),
        original_price: r.original_price,
        coupon_code: r.coupon_code.clone(),
        discount_percentage: r.discount_percentage,
        final_price: r.final_price,
        payment_status: r.payment_status.into(),
        payment_link: r.payment_link.clone(),
        created_at: r.created_at.assume_utc().unix_timestamp(),
    }
}
