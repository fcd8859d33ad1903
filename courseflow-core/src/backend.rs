//! The single collaborator boundary between the checkout flow and the
//! hosted backend.
//!
//! Every remote call the flow makes is a command struct from
//! [`crate::entities`]. A backend is anything that can process all of them;
//! [`DatabaseProcessor`](crate::framework::DatabaseProcessor) is the
//! production implementation.

use kanau::processor::Processor;
use uuid::Uuid;

use crate::entities::coupon::ApplyCoupon;
use crate::entities::course::{CourseOffer, GetCourseOffer};
use crate::entities::enrollment::{AttachPaymentLink, InsertEnrollment};
use crate::entities::identity::UpsertIdentityRecord;
use crate::entities::payment_link::GetPaymentLink;
use crate::entities::transaction::InsertTransaction;
use crate::entities::user::{AuthenticatedUser, LookupUser};
use courseflow_sdk::objects::CouponOutcome;

/// Failure of a remote call. The display text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Remote(String),
}

/// Everything the checkout flow needs from the backend.
///
/// Implemented automatically for any type that processes every command.
pub trait CheckoutBackend:
    Processor<LookupUser, Output = Option<AuthenticatedUser>, Error = BackendError>
    + Processor<GetCourseOffer, Output = Option<CourseOffer>, Error = BackendError>
    + Processor<UpsertIdentityRecord, Output = (), Error = BackendError>
    + Processor<ApplyCoupon, Output = CouponOutcome, Error = BackendError>
    + Processor<GetPaymentLink, Output = Option<String>, Error = BackendError>
    + Processor<InsertEnrollment, Output = Uuid, Error = BackendError>
    + Processor<AttachPaymentLink, Output = (), Error = BackendError>
    + Processor<InsertTransaction, Output = Uuid, Error = BackendError>
    + Send
    + Sync
{
}

impl<T> CheckoutBackend for T where
    T: Processor<LookupUser, Output = Option<AuthenticatedUser>, Error = BackendError>
        + Processor<GetCourseOffer, Output = Option<CourseOffer>, Error = BackendError>
        + Processor<UpsertIdentityRecord, Output = (), Error = BackendError>
        + Processor<ApplyCoupon, Output = CouponOutcome, Error = BackendError>
        + Processor<GetPaymentLink, Output = Option<String>, Error = BackendError>
        + Processor<InsertEnrollment, Output = Uuid, Error = BackendError>
        + Processor<AttachPaymentLink, Output = (), Error = BackendError>
        + Processor<InsertTransaction, Output = Uuid, Error = BackendError>
        + Send
        + Sync
{
}
