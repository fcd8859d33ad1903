use axum::{
    Json,
    extract::{Path, State},
};
use courseflow_sdk::objects::{ApplyCouponRequest, ApplyCouponResponse, CheckoutView};
use uuid::Uuid;

use super::CheckoutApiError;
use crate::api::extractors::AccessToken;
use crate::state::AppState;

/// `POST /{session_id}/coupon`: price a coupon and apply the verdict.
///
/// A rejected coupon is still a 200; see `outcome.success`.
pub(super) async fn apply_coupon(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<Uuid>,
    Json(body): Json<ApplyCouponRequest>,
) -> Result<Json<ApplyCouponResponse>, CheckoutApiError> {
    let mut session = state.sessions.acquire(session_id).await?;
    let outcome = session
        .apply_coupon(&state.processor(), token.as_deref(), &body.code)
        .await?;
    Ok(Json(ApplyCouponResponse {
        outcome,
        checkout: session.view(),
    }))
}

/// `DELETE /{session_id}/coupon`
pub(super) async fn remove_coupon(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CheckoutView>, CheckoutApiError> {
    let mut session = state.sessions.acquire(session_id).await?;
    session.remove_coupon()?;
    Ok(Json(session.view()))
}
