//! Turning a priced checkout into an enrollment and a payment link.

use courseflow_sdk::objects::{CheckoutStep, PaymentRedirect};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::info;
use url::Url;

use super::{CheckoutError, CheckoutSession};
use crate::backend::CheckoutBackend;
use crate::entities::enrollment::{AttachPaymentLink, InsertEnrollment};
use crate::entities::payment_link::GetPaymentLink;
use crate::entities::transaction::InsertTransaction;
use crate::entities::{PaymentStatus, TransactionStatus};

impl CheckoutSession {
    /// Place the order.
    ///
    /// Runs the enrollment insert, payment link lookup, link attachment and
    /// transaction insert in that order. The first failure aborts the rest;
    /// rows already written are left in place.
    ///
    /// On success the session is `Completed` and the returned URL is where
    /// the buyer pays. Nothing here confirms that payment happened.
    #[tracing::instrument(skip_all, err, fields(session_id = %self.id))]
    pub async fn place_order<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
    ) -> Result<PaymentRedirect, CheckoutError> {
        let result = self.place_order_inner(backend, access_token).await;
        self.settle(result)
    }

    async fn place_order_inner<B: CheckoutBackend>(
        &mut self,
        backend: &B,
        access_token: Option<&str>,
    ) -> Result<PaymentRedirect, CheckoutError> {
        self.expect_step(CheckoutStep::AwaitingCouponDecision, "place an order")?;
        let user = self.authorize(backend, access_token).await?;

        let summary = self.price_summary();
        let (coupon_code, discount_percentage) = match &self.coupon {
            Some(applied) => (Some(applied.code.to_string()), applied.discount_percentage),
            None => (None, Decimal::ZERO),
        };

        let enrollment_id = backend
            .process(InsertEnrollment {
                user_id: user.id,
                course_id: self.offer.course_id,
                package: self.offer.package.clone(),
                original_price: summary.original_price,
                coupon_code,
                discount_percentage,
                final_price: summary.final_price,
                payment_status: PaymentStatus::Pending,
            })
            .await?;
        self.enrollment_id = Some(enrollment_id);

        let link = backend
            .process(GetPaymentLink {
                discount_percentage,
            })
            .await?
            .ok_or(CheckoutError::PaymentLinkUnavailable(discount_percentage))?;
        let payment_url = Url::parse(link.trim())?;

        backend
            .process(AttachPaymentLink {
                enrollment_id,
                payment_link: payment_url.to_string(),
            })
            .await?;

        backend
            .process(InsertTransaction {
                enrollment_id,
                user_id: user.id,
                amount: summary.final_price,
                status: TransactionStatus::Initiated,
            })
            .await?;

        self.step = CheckoutStep::Completed;
        self.payment_url = Some(payment_url.clone());
        info!(
            session_id = %self.id,
            enrollment_id = %enrollment_id,
            final_price = %summary.final_price,
            "Order placed, payment link issued"
        );
        Ok(PaymentRedirect {
            enrollment_id,
            payment_url: payment_url.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::{ALICE_TOKEN, BOB_TOKEN, MemoryBackend, identity_submitted};
    use super::*;
    use crate::checkout::SessionStore;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_order_with_coupon_writes_everything_in_order() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;
        session
            .apply_coupon(&backend, Some(ALICE_TOKEN), "WELCOME20")
            .await
            .unwrap();
        backend.clear_calls();

        let redirect = session
            .place_order(&backend, Some(ALICE_TOKEN))
            .await
            .unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "lookup_user",
                "insert_enrollment",
                "get_payment_link",
                "attach_payment_link",
                "insert_transaction",
            ]
        );
        assert_eq!(redirect.payment_url, "https://pay.example.in/welcome-20");
        assert_eq!(session.step(), CheckoutStep::Completed);
        assert_eq!(session.enrollment_id(), Some(redirect.enrollment_id));

        let state = backend.state();
        assert_eq!(state.enrollments.len(), 1);
        let enrollment = &state.enrollments[0];
        assert_eq!(enrollment.id, redirect.enrollment_id);
        assert_eq!(enrollment.insert.coupon_code.as_deref(), Some("WELCOME20"));
        assert_eq!(enrollment.insert.discount_percentage, Decimal::from(20));
        assert_eq!(enrollment.insert.original_price, Decimal::from(9999));
        assert_eq!(enrollment.insert.final_price, Decimal::from(7999));
        assert_eq!(enrollment.insert.payment_status, PaymentStatus::Pending);
        assert_eq!(
            enrollment.payment_link.as_deref(),
            Some("https://pay.example.in/welcome-20")
        );
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].amount, Decimal::from(7999));
        assert_eq!(state.transactions[0].status, TransactionStatus::Initiated);
        assert_eq!(state.transactions[0].enrollment_id, redirect.enrollment_id);
    }

    #[tokio::test]
    async fn test_order_without_coupon_uses_zero_tier() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;

        let redirect = session
            .place_order(&backend, Some(ALICE_TOKEN))
            .await
            .unwrap();

        assert_eq!(redirect.payment_url, "https://pay.example.in/full-price");
        let state = backend.state();
        assert_eq!(state.enrollments[0].insert.coupon_code, None);
        assert_eq!(state.enrollments[0].insert.discount_percentage, Decimal::ZERO);
        assert_eq!(state.transactions[0].amount, Decimal::from(9999));
    }

    #[tokio::test]
    async fn test_missing_payment_link_aborts_after_enrollment() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;
        session
            .apply_coupon(&backend, Some(ALICE_TOKEN), "FESTIVE50")
            .await
            .unwrap();
        backend.clear_calls();

        let result = session.place_order(&backend, Some(ALICE_TOKEN)).await;

        assert!(matches!(
            result,
            Err(CheckoutError::PaymentLinkUnavailable(pct)) if pct == Decimal::from(50)
        ));
        assert_eq!(
            backend.calls(),
            vec!["lookup_user", "insert_enrollment", "get_payment_link"]
        );
        assert_eq!(session.step(), CheckoutStep::AwaitingCouponDecision);
        assert!(session.last_error().is_some());
        let state = backend.state();
        // no rollback
        assert_eq!(state.enrollments.len(), 1);
        assert_eq!(state.enrollments[0].payment_link, None);
        assert!(state.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_payment_link_is_a_failure() {
        let backend = MemoryBackend::seeded();
        backend
            .state()
            .payment_links
            .insert(Decimal::ZERO, "not a url".to_owned());
        let mut session = identity_submitted(&backend).await;

        let result = session.place_order(&backend, Some(ALICE_TOKEN)).await;

        assert!(matches!(result, Err(CheckoutError::InvalidPaymentLink(_))));
        assert!(!backend.calls().contains(&"attach_payment_link"));
        assert_eq!(session.step(), CheckoutStep::AwaitingCouponDecision);
    }

    #[tokio::test]
    async fn test_transaction_failure_surfaces_backend_message() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;
        backend.fail_next("insert_transaction");

        let result = session.place_order(&backend, Some(ALICE_TOKEN)).await;

        assert!(matches!(result, Err(CheckoutError::Backend(_))));
        assert_eq!(session.last_error(), Some("insert_transaction failed"));
        assert_eq!(session.step(), CheckoutStep::AwaitingCouponDecision);
        let state = backend.state();
        assert!(state.enrollments[0].payment_link.is_some());
        assert!(state.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_order_requires_owner_and_login() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;

        let result = session.place_order(&backend, None).await;
        assert!(matches!(result, Err(CheckoutError::LoginRequired)));
        let result = session.place_order(&backend, Some(BOB_TOKEN)).await;
        assert!(matches!(result, Err(CheckoutError::NotSessionOwner)));
        assert!(backend.state().enrollments.is_empty());
    }

    #[tokio::test]
    async fn test_completed_checkout_cannot_order_again() {
        let backend = MemoryBackend::seeded();
        let mut session = identity_submitted(&backend).await;
        session
            .place_order(&backend, Some(ALICE_TOKEN))
            .await
            .unwrap();

        let result = session.place_order(&backend, Some(ALICE_TOKEN)).await;
        assert!(matches!(result, Err(CheckoutError::AlreadyCompleted)));
        let result = session
            .apply_coupon(&backend, Some(ALICE_TOKEN), "WELCOME20")
            .await;
        assert!(matches!(result, Err(CheckoutError::AlreadyCompleted)));
        assert_eq!(backend.state().enrollments.len(), 1);
        assert!(session.view().payment_url.is_some());
    }

    #[tokio::test]
    async fn test_double_submit_creates_one_enrollment() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let backend =
            MemoryBackend::seeded().with_enrollment_gate(entered.clone(), release.clone());
        let store = SessionStore::default();
        let id = store.insert(identity_submitted(&backend).await).await;

        let first = async {
            let mut session = store.acquire(id).await.unwrap();
            session.place_order(&backend, Some(ALICE_TOKEN)).await
        };
        let second = async {
            entered.notified().await;
            let blocked = store.acquire(id).await.map(|_| ());
            release.notify_one();
            blocked
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert!(matches!(second, Err(CheckoutError::InFlight)));
        assert_eq!(backend.state().enrollments.len(), 1);
        assert_eq!(backend.state().transactions.len(), 1);
    }
}
