use axum::{
    Json,
    extract::{Path, State},
};
use courseflow_sdk::objects::PaymentRedirect;
use uuid::Uuid;

use super::CheckoutApiError;
use crate::api::extractors::AccessToken;
use crate::state::AppState;

/// `POST /{session_id}/order`: place the order.
///
/// The returned URL is meant to be opened in a new browsing context. A 200
/// here does not mean the payment went through.
pub(super) async fn place_order(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PaymentRedirect>, CheckoutApiError> {
    let mut session = state.sessions.acquire(session_id).await?;
    let redirect = session
        .place_order(&state.processor(), token.as_deref())
        .await?;
    Ok(Json(redirect))
}
