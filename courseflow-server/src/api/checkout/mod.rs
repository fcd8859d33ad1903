//! Checkout API handlers.
//!
//! Called by the storefront. Operations that reach the backend on the
//! buyer's behalf need `Authorization: Bearer <access token>`; local edits
//! only need the (unguessable) session id.
//!
//! # Endpoints
//!
//! - `POST   /`               – start a checkout for a course package
//! - `GET    /{id}`           – current session view
//! - `PATCH  /{id}/identity`  – edit identity fields
//! - `POST   /{id}/identity`  – validate and persist identity
//! - `POST   /{id}/coupon`    – apply a coupon
//! - `DELETE /{id}/coupon`    – remove the applied coupon
//! - `POST   /{id}/order`     – place the order, returns the payment link

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use courseflow_core::checkout::CheckoutError;
use courseflow_sdk::objects::ValidationErrorResponse;
use serde::Serialize;

use crate::state::AppState;

mod coupon;
mod identity;
mod order;
mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(session::start_checkout))
        .route("/{session_id}", get(session::get_checkout))
        .route(
            "/{session_id}/identity",
            post(identity::submit_identity).patch(identity::edit_identity),
        )
        .route(
            "/{session_id}/coupon",
            post(coupon::apply_coupon).delete(coupon::remove_coupon),
        )
        .route("/{session_id}/order", post(order::place_order))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// A failed checkout operation, rendered as JSON.
#[derive(Debug)]
pub(crate) struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

fn status_of(err: &CheckoutError) -> StatusCode {
    match err {
        CheckoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::EmptyCouponCode => StatusCode::BAD_REQUEST,
        CheckoutError::LoginRequired => StatusCode::UNAUTHORIZED,
        CheckoutError::NotSessionOwner => StatusCode::FORBIDDEN,
        CheckoutError::CourseNotFound | CheckoutError::SessionNotFound => StatusCode::NOT_FOUND,
        CheckoutError::WrongStep { .. }
        | CheckoutError::AlreadyCompleted
        | CheckoutError::InFlight => StatusCode::CONFLICT,
        CheckoutError::PaymentLinkUnavailable(_)
        | CheckoutError::InvalidPaymentLink(_)
        | CheckoutError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Checkout API backend failure");
        }
        let message = self.0.to_string();
        match self.0 {
            CheckoutError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { message, errors })).into_response()
            }
            _ => (status, Json(ErrorBody { message })).into_response(),
        }
    }
}
