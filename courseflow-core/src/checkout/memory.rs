//! In-memory backend for exercising the checkout flow in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use courseflow_sdk::objects::{CouponOutcome, IdentityField, IdentityRecord};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tokio::sync::Notify;
use uuid::{Uuid, uuid};

use super::CheckoutSession;
use crate::backend::BackendError;
use crate::entities::coupon::ApplyCoupon;
use crate::entities::course::{CourseOffer, GetCourseOffer};
use crate::entities::enrollment::{AttachPaymentLink, InsertEnrollment};
use crate::entities::identity::UpsertIdentityRecord;
use crate::entities::payment_link::GetPaymentLink;
use crate::entities::transaction::InsertTransaction;
use crate::entities::user::{AuthenticatedUser, LookupUser};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";
pub const ALICE_ID: Uuid = uuid!("00000000-0000-4000-8000-00000000a11c");
pub const COURSE_ID: Uuid = uuid!("00000000-0000-4000-8000-00000000c0de");

#[derive(Debug)]
pub struct MemoryEnrollment {
    pub id: Uuid,
    pub insert: InsertEnrollment,
    pub payment_link: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryState {
    pub users: HashMap<String, AuthenticatedUser>,
    pub offers: Vec<CourseOffer>,
    /// code → (discount percentage, still valid)
    pub coupons: HashMap<String, (Decimal, bool)>,
    pub payment_links: HashMap<Decimal, String>,
    pub identities: HashMap<Uuid, IdentityRecord>,
    pub enrollments: Vec<MemoryEnrollment>,
    pub transactions: Vec<InsertTransaction>,
    pub calls: Vec<&'static str>,
    pub fail_next: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    enrollment_gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl MemoryBackend {
    /// Two users, one course with two packages, a few coupons and links
    /// for the 0% and 20% tiers.
    pub fn seeded() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state();
            for (token, id, email) in [
                (ALICE_TOKEN, ALICE_ID, "alice@example.in"),
                (
                    BOB_TOKEN,
                    uuid!("00000000-0000-4000-8000-000000000b0b"),
                    "bob@example.in",
                ),
            ] {
                state.users.insert(
                    token.to_owned(),
                    AuthenticatedUser {
                        id,
                        email: email.to_owned(),
                    },
                );
            }
            for (package, price) in [("standard", 9999), ("premium", 14999)] {
                state.offers.push(CourseOffer {
                    course_id: COURSE_ID,
                    title: "Rust for Backend Engineers".to_owned(),
                    package: package.to_owned(),
                    price: Decimal::from(price),
                });
            }
            state.coupons.insert("WELCOME20".to_owned(), (Decimal::from(20), true));
            state.coupons.insert("FESTIVE50".to_owned(), (Decimal::from(50), true));
            state.coupons.insert("OLD10".to_owned(), (Decimal::from(10), false));
            state.payment_links.insert(
                Decimal::ZERO,
                "https://pay.example.in/full-price".to_owned(),
            );
            state.payment_links.insert(
                Decimal::from(20),
                "https://pay.example.in/welcome-20".to_owned(),
            );
        }
        backend
    }

    /// Fail the named operation once.
    pub fn failing_on(self, op: &'static str) -> Self {
        self.fail_next(op);
        self
    }

    pub fn fail_next(&self, op: &'static str) {
        self.state().fail_next = Some(op);
    }

    /// Make `InsertEnrollment` signal `entered` and wait for `release`.
    pub fn with_enrollment_gate(mut self, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.enrollment_gate = Some((entered, release));
        self
    }

    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn record(&self, op: &'static str) -> Result<(), BackendError> {
        let mut state = self.state();
        state.calls.push(op);
        if state.fail_next == Some(op) {
            state.fail_next = None;
            return Err(BackendError::Remote(format!("{op} failed")));
        }
        Ok(())
    }
}

/// A checkout started by Alice for the standard package.
pub async fn started(backend: &MemoryBackend) -> CheckoutSession {
    CheckoutSession::start(backend, Some(ALICE_TOKEN), COURSE_ID, "standard")
        .await
        .unwrap()
}

/// A checkout that has passed the identity step.
pub async fn identity_submitted(backend: &MemoryBackend) -> CheckoutSession {
    let mut session = started(backend).await;
    for (field, value) in filled_identity() {
        session.update_field(field, value).unwrap();
    }
    session
        .submit_identity(backend, Some(ALICE_TOKEN))
        .await
        .unwrap();
    session
}

pub fn filled_identity() -> Vec<(IdentityField, String)> {
    [
        (IdentityField::FullName, "Alice Iyer"),
        (IdentityField::Phone, "9876543210"),
        (IdentityField::DateOfBirth, "1992-07-04"),
        (IdentityField::Gender, "female"),
        (IdentityField::AddressLine1, "4 Residency Road"),
        (IdentityField::City, "Bengaluru"),
        (IdentityField::State, "Karnataka"),
        (IdentityField::PostalCode, "560025"),
        (IdentityField::TaxId, "abcpi1234k"),
        (IdentityField::Occupation, "Engineer"),
        (IdentityField::IncomeBracket, "10-25L"),
    ]
    .into_iter()
    .map(|(field, value)| (field, value.to_owned()))
    .collect()
}

impl Processor<LookupUser> for MemoryBackend {
    type Output = Option<AuthenticatedUser>;
    type Error = BackendError;
    async fn process(&self, query: LookupUser) -> Result<Option<AuthenticatedUser>, BackendError> {
        self.record("lookup_user")?;
        Ok(self.state().users.get(&query.access_token).cloned())
    }
}

impl Processor<GetCourseOffer> for MemoryBackend {
    type Output = Option<CourseOffer>;
    type Error = BackendError;
    async fn process(&self, query: GetCourseOffer) -> Result<Option<CourseOffer>, BackendError> {
        self.record("get_course_offer")?;
        Ok(self
            .state()
            .offers
            .iter()
            .find(|o| o.course_id == query.course_id && o.package == query.package)
            .cloned())
    }
}

impl Processor<UpsertIdentityRecord> for MemoryBackend {
    type Output = ();
    type Error = BackendError;
    async fn process(&self, cmd: UpsertIdentityRecord) -> Result<(), BackendError> {
        self.record("upsert_identity")?;
        self.state().identities.insert(cmd.user_id, cmd.record);
        Ok(())
    }
}

impl Processor<ApplyCoupon> for MemoryBackend {
    type Output = CouponOutcome;
    type Error = BackendError;
    async fn process(&self, cmd: ApplyCoupon) -> Result<CouponOutcome, BackendError> {
        self.record("apply_coupon")?;
        let rejected = |message: &str| CouponOutcome {
            success: false,
            discount_percentage: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_price: cmd.original_price,
            original_price: cmd.original_price,
            message: message.to_owned(),
        };
        let outcome = match self.state().coupons.get(cmd.code.as_str()) {
            None => rejected("Invalid coupon code"),
            Some((_, false)) => rejected("This coupon has expired"),
            Some((pct, true)) => {
                let discount = (cmd.original_price * *pct / Decimal::ONE_HUNDRED).round();
                CouponOutcome {
                    success: true,
                    discount_percentage: *pct,
                    discount_amount: discount,
                    final_price: cmd.original_price - discount,
                    original_price: cmd.original_price,
                    message: "Coupon applied successfully".to_owned(),
                }
            }
        };
        Ok(outcome)
    }
}

impl Processor<GetPaymentLink> for MemoryBackend {
    type Output = Option<String>;
    type Error = BackendError;
    async fn process(&self, query: GetPaymentLink) -> Result<Option<String>, BackendError> {
        self.record("get_payment_link")?;
        Ok(self
            .state()
            .payment_links
            .get(&query.discount_percentage)
            .cloned())
    }
}

impl Processor<InsertEnrollment> for MemoryBackend {
    type Output = Uuid;
    type Error = BackendError;
    async fn process(&self, cmd: InsertEnrollment) -> Result<Uuid, BackendError> {
        self.record("insert_enrollment")?;
        if let Some((entered, release)) = &self.enrollment_gate {
            entered.notify_one();
            release.notified().await;
        }
        let id = Uuid::new_v4();
        self.state().enrollments.push(MemoryEnrollment {
            id,
            insert: cmd,
            payment_link: None,
        });
        Ok(id)
    }
}

impl Processor<AttachPaymentLink> for MemoryBackend {
    type Output = ();
    type Error = BackendError;
    async fn process(&self, cmd: AttachPaymentLink) -> Result<(), BackendError> {
        self.record("attach_payment_link")?;
        let mut state = self.state();
        let enrollment = state
            .enrollments
            .iter_mut()
            .find(|e| e.id == cmd.enrollment_id)
            .ok_or(BackendError::NotFound("enrollment"))?;
        enrollment.payment_link = Some(cmd.payment_link);
        Ok(())
    }
}

impl Processor<InsertTransaction> for MemoryBackend {
    type Output = Uuid;
    type Error = BackendError;
    async fn process(&self, cmd: InsertTransaction) -> Result<Uuid, BackendError> {
        self.record("insert_transaction")?;
        self.state().transactions.push(cmd);
        Ok(Uuid::new_v4())
    }
}
