//! HTTP API, mounted under `/api/v1`.
//!
//! - `/courses`  – public catalog
//! - `/checkout` – checkout sessions (bearer token where a signed-in user is needed)
//! - `/admin`    – admin dashboard (admin secret header)

use axum::Router;

use crate::state::AppState;

mod admin;
mod checkout;
mod courses;
pub(crate) mod extractors;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/courses", courses::router())
        .nest("/checkout", checkout::router())
        .nest("/admin", admin::router())
}
