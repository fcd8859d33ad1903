//! Admin API client (admin dashboard → Courseflow server).
//!
//! All requests carry the plaintext admin secret in the
//! `Courseflow-Admin-Authorization` header.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::admin::{ADMIN_AUTH_HEADER, AdminEnrollmentResponse, ListEnrollmentsQuery};

/// Typed HTTP client for the Courseflow **Admin API**.
///
/// The secret is verified server-side against an argon2-hashed value.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    admin_secret: String,
}

impl AdminClient {
    /// Create a new `AdminClient`.
    ///
    /// * `base_url` – root URL of the Courseflow server.
    /// * `admin_secret` – the plaintext admin secret.
    pub fn new(base_url: Url, admin_secret: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            admin_secret: admin_secret.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/v1/admin/enrollments` – list enrollments with optional
    /// filters.
    pub async fn list_enrollments(
        &self,
        query: &ListEnrollmentsQuery,
    ) -> Result<Vec<AdminEnrollmentResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/admin/enrollments")?;

        let resp = self
            .http
            .get(url)
            .header(ADMIN_AUTH_HEADER, &self.admin_secret)
            .query(query)
            .send()
            .await?;

        parse_response(resp).await
    }
}
