use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use courseflow_core::checkout::CheckoutSession;
use courseflow_sdk::objects::{CheckoutView, StartCheckoutRequest};
use uuid::Uuid;

use super::CheckoutApiError;
use crate::api::extractors::AccessToken;
use crate::state::AppState;

/// `POST /`: start a checkout.
///
/// The price comes from the course package, never from the request.
pub(super) async fn start_checkout(
    State(state): State<AppState>,
    token: AccessToken,
    Json(body): Json<StartCheckoutRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let session = CheckoutSession::start(
        &state.processor(),
        token.as_deref(),
        body.course_id,
        &body.package,
    )
    .await?;
    let view = session.view();
    state.sessions.insert(session).await;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /{session_id}`: current session view.
pub(super) async fn get_checkout(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CheckoutView>, CheckoutApiError> {
    let session = state.sessions.acquire(session_id).await?;
    Ok(Json(session.view()))
}
