//! The checkout flow.
//!
//! A [`CheckoutSession`] walks one buyer through
//! `CollectingIdentity → AwaitingCouponDecision → Completed`:
//!
//! 1. identity fields are edited locally, then validated and persisted
//!    ([`validation`]),
//! 2. coupons are priced by the backend and applied or removed ([`coupon`]),
//! 3. the order is built and a payment link handed back ([`order`]).
//!
//! The displayed totals are derived on demand by [`pricing`]. Every remote
//! call goes through a [`CheckoutBackend`] and runs strictly one after
//! another; a failure leaves the step unchanged and becomes the session's
//! visible error. Re-entrancy is prevented by [`SessionStore`], which
//! refuses to hand out a session that is already in use.

pub mod coupon;
pub mod order;
pub mod pricing;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod memory;

pub use coupon::AppliedCoupon;
pub use store::SessionStore;

use std::time::Instant;

use courseflow_sdk::objects::{
    CheckoutStep, CheckoutView, CourseOfferView, FieldErrors, IdentityField, IdentityRecord,
    PriceBreakdown,
};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::backend::{BackendError, CheckoutBackend};
use crate::entities::course::{CourseOffer, GetCourseOffer};
use crate::entities::identity::UpsertIdentityRecord;
use crate::entities::user::{AuthenticatedUser, LookupUser};

/// Errors returned by checkout operations.
///
/// The display text is the user-facing message.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please log in to continue")]
    LoginRequired,

    #[error("This checkout belongs to a different account")]
    NotSessionOwner,

    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),

    #[error("Please enter a coupon code")]
    EmptyCouponCode,

    #[error("Course package not found")]
    CourseNotFound,

    #[error("Checkout session not found")]
    SessionNotFound,

    #[error("Cannot {action} while checkout is {step}")]
    WrongStep {
        action: &'static str,
        step: CheckoutStep,
    },

    #[error("This checkout has already been completed")]
    AlreadyCompleted,

    #[error("Another request for this checkout is still in progress")]
    InFlight,

    #[error("No payment link is available for a {0}% discount")]
    PaymentLinkUnavailable(Decimal),

    #[error("Payment link is not a valid URL: {0}")]
    InvalidPaymentLink(#[from] url::ParseError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// One buyer's progress through checkout.
#[derive(Debug)]
pub struct CheckoutSession {
    id: Uuid,
    owner: Uuid,
    offer: CourseOffer,
    step: CheckoutStep,
    identity: IdentityRecord,
    field_errors: FieldErrors,
    coupon: Option<AppliedCoupon>,
    last_error: Option<String>,
    enrollment_id: Option<Uuid>,
    payment_url: Option<Url>,
    last_touched: Instant,
}

impl CheckoutSession {
    /// Start a checkout for one package of a course.
    ///
    /// The caller must be signed in; the package price becomes the
    /// original price for the whole session.
    #[tracing::instrument(skip_all, err, fields(course_id = %course_id, package = package))]
    pub async fn start<B: CheckoutBackend>(
        backend: &B,
        access_token: Option<&str>,
        course_id: Uuid,
        package: &str,
    ) -> Result<Self, CheckoutError> {
        let user = authenticate(backend, access_token).await?;
        let offer = backend
            .process(GetCourseOffer {
                course_id,
                package: package.to_owned(),
            })
            .await?
            .ok_or(CheckoutError::CourseNotFound)?;

        let session = Self {
            id: Uuid::new_v4(),
            owner: user.id,
            offer,
            step: CheckoutStep::CollectingIdentity,
            identity: IdentityRecord {
                email: user.email,
                ..Default::default()
            },
            field_errors: FieldErrors::new(),
            coupon: None,
            last_error: None,
            enrollment_id: None,
            payment_url: None,
            last_touched: Instant::now(),
        };
        info!(session_id = %session.id, user_id = %session.owner, "Checkout started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn identity(&self) -> &IdentityRecord {
        &self.identity
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn applied_coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn enrollment_id(&self) -> Option<Uuid> {
        self.enrollment_id
    }

    pub fn original_price(&self) -> Decimal {
        self.offer.price
    }

    /// Time since the session was started or last acquired.
    pub fn idle_for(&self) -> std::time::Duration {
        self.last_touched.elapsed()
    }

    pub(crate) fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    /// The current order summary, derived from the live price state.
    pub fn price_summary(&self) -> PriceBreakdown {
        pricing::present(self.offer.price, self.coupon.as_ref())
    }

    /// Replace one identity field.
    ///
    /// Clears that field's previous error without re-validating anything
    /// else. The tax ID is uppercased as it is entered.
    pub fn update_field(
        &mut self,
        field: IdentityField,
        value: String,
    ) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::CollectingIdentity, "edit identity details")?;
        *self.identity.get_mut(field) = validation::normalize_input(field, value);
        self.field_errors.remove(&field);
        Ok(())
    }

    /// Validate the identity record and, if it passes, persist it and move
    /// on to the coupon step.
    ///
    /// An invalid record is rejected before any remote call is made.
    #[tracing::instrument(skip_all, err, fields(session_id = %self.id))]
    pub async fn submit_identity<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
    ) -> Result<(), CheckoutError> {
        let result = self.submit_identity_inner(backend, access_token).await;
        self.settle(result)
    }

    async fn submit_identity_inner<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
    ) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::CollectingIdentity, "submit identity details")?;

        let errors = validation::validate_identity(&self.identity);
        if !errors.is_empty() {
            self.field_errors = errors.clone();
            return Err(CheckoutError::Validation(errors));
        }
        self.field_errors.clear();

        let user = self.authorize(backend, access_token).await?;
        backend
            .process(UpsertIdentityRecord {
                user_id: user.id,
                record: self.identity.clone(),
            })
            .await?;

        self.step = CheckoutStep::AwaitingCouponDecision;
        info!(session_id = %self.id, "Identity details saved");
        Ok(())
    }

    /// Snapshot for API responses.
    pub fn view(&self) -> CheckoutView {
        CheckoutView {
            session_id: self.id,
            step: self.step,
            course: CourseOfferView {
                course_id: self.offer.course_id,
                title: self.offer.title.clone(),
                package: self.offer.package.clone(),
                price: self.offer.price,
            },
            identity: self.identity.redacted(),
            field_errors: self.field_errors.clone(),
            applied_coupon: self.coupon.as_ref().map(|c| c.code.to_string()),
            price: self.price_summary(),
            error: self.last_error.clone(),
            enrollment_id: self.enrollment_id,
            payment_url: self.payment_url.as_ref().map(Url::to_string),
        }
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == expected {
            return Ok(());
        }
        if self.step == CheckoutStep::Completed {
            return Err(CheckoutError::AlreadyCompleted);
        }
        Err(CheckoutError::WrongStep {
            action,
            step: self.step,
        })
    }

    /// Resolve the caller and make sure they own this session.
    async fn authorize<B: CheckoutBackend>(
        &self,
        backend: &B,
        access_token: Option<&str>,
    ) -> Result<AuthenticatedUser, CheckoutError> {
        let user = authenticate(backend, access_token).await?;
        if user.id != self.owner {
            warn!(session_id = %self.id, user_id = %user.id, "Checkout accessed by non-owner");
            return Err(CheckoutError::NotSessionOwner);
        }
        Ok(user)
    }

    /// Record the outcome of an action as the session's visible error.
    fn settle<T>(&mut self, result: Result<T, CheckoutError>) -> Result<T, CheckoutError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}

/// Resolve the signed-in user, or fail with [`CheckoutError::LoginRequired`].
///
/// A missing token fails without contacting the backend.
async fn authenticate<B: CheckoutBackend>(
    backend: &B,
    access_token: Option<&str>,
) -> Result<AuthenticatedUser, CheckoutError> {
    let Some(token) = access_token.filter(|t| !t.trim().is_empty()) else {
        return Err(CheckoutError::LoginRequired);
    };
    backend
        .process(LookupUser {
            access_token: token.to_owned(),
        })
        .await?
        .ok_or(CheckoutError::LoginRequired)
}
