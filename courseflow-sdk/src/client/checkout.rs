//! Checkout API client (storefront → Courseflow server).
//!
//! Requests that reach the backend on the user's behalf carry the user's
//! access token as `Authorization: Bearer …`.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::objects::catalog::{CourseSummary, ListCoursesQuery};
use crate::objects::checkout::{
    CheckoutView, EditIdentityRequest, PaymentRedirect, StartCheckoutRequest,
};
use crate::objects::coupon::{ApplyCouponRequest, ApplyCouponResponse};
use crate::objects::identity::IdentityRecord;

/// Typed HTTP client for the Courseflow **Checkout API**.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl CheckoutClient {
    /// Create a new `CheckoutClient`.
    ///
    /// * `base_url` – root URL of the Courseflow server.
    /// * `access_token` – the signed-in user's token, if any.
    pub fn new(base_url: Url, access_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            access_token,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// `GET /api/v1/courses` – list published courses.
    pub async fn list_courses(
        &self,
        query: &ListCoursesQuery,
    ) -> Result<Vec<CourseSummary>, ClientError> {
        let url = self.base_url.join("/api/v1/courses")?;
        let resp = self.http.get(url).query(query).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/checkout` – start a checkout for a course package.
    pub async fn start(
        &self,
        course_id: Uuid,
        package: impl Into<String>,
    ) -> Result<CheckoutView, ClientError> {
        let url = self.base_url.join("/api/v1/checkout")?;
        let body = StartCheckoutRequest {
            course_id,
            package: package.into(),
        };
        let resp = self
            .authorize(self.http.post(url))
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/checkout/{id}` – fetch the current session view.
    pub async fn get(&self, session_id: Uuid) -> Result<CheckoutView, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `PATCH /api/v1/checkout/{id}/identity` – edit some identity fields.
    pub async fn edit_identity(
        &self,
        session_id: Uuid,
        edit: &EditIdentityRequest,
    ) -> Result<CheckoutView, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}/identity"))?;
        let resp = self.http.patch(url).json(edit).send().await?;
        parse_response(resp).await
    }

    /// Replace the whole identity record, then submit it
    /// (`PATCH` followed by `POST /api/v1/checkout/{id}/identity`).
    ///
    /// A record that fails validation comes back as
    /// [`ClientError::Api`] with status 422 and a
    /// [`ValidationErrorResponse`](crate::objects::checkout::ValidationErrorResponse) body.
    pub async fn submit_identity(
        &self,
        session_id: Uuid,
        record: &IdentityRecord,
    ) -> Result<CheckoutView, ClientError> {
        self.edit_identity(session_id, &EditIdentityRequest::from(record))
            .await?;
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}/identity"))?;
        let resp = self.authorize(self.http.post(url)).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/checkout/{id}/coupon` – apply a coupon code.
    pub async fn apply_coupon(
        &self,
        session_id: Uuid,
        code: impl Into<String>,
    ) -> Result<ApplyCouponResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}/coupon"))?;
        let body = ApplyCouponRequest { code: code.into() };
        let resp = self
            .authorize(self.http.post(url))
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /api/v1/checkout/{id}/coupon` – remove the applied coupon.
    pub async fn remove_coupon(&self, session_id: Uuid) -> Result<CheckoutView, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}/coupon"))?;
        let resp = self.http.delete(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/checkout/{id}/order` – place the order and obtain the
    /// payment link to open.
    pub async fn place_order(&self, session_id: Uuid) -> Result<PaymentRedirect, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/checkout/{session_id}/order"))?;
        let resp = self.authorize(self.http.post(url)).send().await?;
        parse_response(resp).await
    }
}
