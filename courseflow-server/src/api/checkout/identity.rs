use axum::{
    Json,
    extract::{Path, State},
};
use courseflow_sdk::objects::{CheckoutView, EditIdentityRequest};
use uuid::Uuid;

use super::CheckoutApiError;
use crate::api::extractors::AccessToken;
use crate::state::AppState;

/// `PATCH /{session_id}/identity`: replace the given fields.
///
/// Nothing is validated until the record is submitted.
pub(super) async fn edit_identity(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(EditIdentityRequest(fields)): Json<EditIdentityRequest>,
) -> Result<Json<CheckoutView>, CheckoutApiError> {
    let mut session = state.sessions.acquire(session_id).await?;
    for (field, value) in fields {
        session.update_field(field, value)?;
    }
    Ok(Json(session.view()))
}

/// `POST /{session_id}/identity`: validate and persist the record.
pub(super) async fn submit_identity(
    State(state): State<AppState>,
    token: AccessToken,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CheckoutView>, CheckoutApiError> {
    let mut session = state.sessions.acquire(session_id).await?;
    session
        .submit_identity(&state.processor(), token.as_deref())
        .await?;
    Ok(Json(session.view()))
}
