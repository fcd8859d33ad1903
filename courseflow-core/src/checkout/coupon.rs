//! Applying and removing coupons on a checkout.
//!
//! The pricing function is the only authority on discounts. A rejection or
//! a failed call always leaves the session without a coupon, so a stale
//! discount is never carried forward.

use courseflow_sdk::objects::{CheckoutStep, CouponOutcome};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::info;

use super::{CheckoutError, CheckoutSession};
use crate::backend::CheckoutBackend;
use crate::entities::coupon::{ApplyCoupon, CouponCode};

/// A coupon the pricing function accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCoupon {
    pub code: CouponCode,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
}

impl AppliedCoupon {
    fn from_outcome(code: CouponCode, outcome: &CouponOutcome) -> Self {
        Self {
            code,
            discount_percentage: outcome.discount_percentage,
            discount_amount: outcome.discount_amount,
            final_price: outcome.final_price,
        }
    }
}

impl CheckoutSession {
    /// Ask the pricing function about `raw_code` and apply its verdict.
    ///
    /// A rejected coupon is not an error: the outcome is returned with
    /// `success == false` and its message becomes the session's visible
    /// error. Blank input fails before any remote call.
    #[tracing::instrument(skip_all, err, fields(session_id = %self.id))]
    pub async fn apply_coupon<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
        raw_code: &str,
    ) -> Result<CouponOutcome, CheckoutError> {
        let result = self.apply_coupon_inner(backend, access_token, raw_code).await;
        let result = self.settle(result);
        if let Ok(outcome) = &result {
            if !outcome.success {
                self.last_error = Some(outcome.message.clone());
            }
        }
        result
    }

    async fn apply_coupon_inner<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
        raw_code: &str,
    ) -> Result<CouponOutcome, CheckoutError> {
        self.expect_step(CheckoutStep::AwaitingCouponDecision, "apply a coupon")?;
        let code = CouponCode::parse(raw_code).ok_or(CheckoutError::EmptyCouponCode)?;
        let user = self.authorize(backend, access_token).await?;

        let outcome = backend
            .process(ApplyCoupon {
                code: code.clone(),
                user_id: user.id,
                original_price: self.offer.price,
            })
            .await;

        match outcome {
            Ok(outcome) if outcome.success => {
                info!(
                    session_id = %self.id,
                    code = %code,
                    discount_percentage = %outcome.discount_percentage,
                    "Coupon applied"
                );
                self.coupon = Some(AppliedCoupon::from_outcome(code, &outcome));
                Ok(outcome)
            }
            Ok(outcome) => {
                info!(session_id = %self.id, code = %code, reason = %outcome.message, "Coupon rejected");
                self.coupon = None;
                Ok(outcome)
            }
            Err(e) => {
                self.coupon = None;
                Err(e.into())
            }
        }
    }

    /// Drop the applied coupon, if any. Purely local.
    pub fn remove_coupon(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::AwaitingCouponDecision, "remove a coupon")?;
        self.coupon = None;
        self.last_error = None;
        Ok(())
    }
}
