//! Checkout API request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::identity::{FieldErrors, IdentityField, IdentityRecord};

/// Position of a checkout session in the flow.
///
/// `CollectingIdentity → AwaitingCouponDecision → Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    CollectingIdentity,
    AwaitingCouponDecision,
    Completed,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutStep::CollectingIdentity => write!(f, "collecting_identity"),
            CheckoutStep::AwaitingCouponDecision => write!(f, "awaiting_coupon_decision"),
            CheckoutStep::Completed => write!(f, "completed"),
        }
    }
}

/// Request body for starting a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCheckoutRequest {
    pub course_id: Uuid,
    pub package: String,
}

/// Partial identity edit: only the listed fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditIdentityRequest(pub BTreeMap<IdentityField, String>);

impl From<&IdentityRecord> for EditIdentityRequest {
    fn from(record: &IdentityRecord) -> Self {
        Self(
            IdentityField::ALL
                .into_iter()
                .map(|field| (field, record.get(field).to_owned()))
                .collect(),
        )
    }
}

/// The course package being bought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOfferView {
    pub course_id: Uuid,
    pub title: String,
    pub package: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLineKind {
    Original,
    Discount,
    Total,
}

/// One displayed row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub kind: PriceLineKind,
    pub label: String,
    pub amount: Decimal,
    /// `amount` formatted for display, e.g. `₹7,999` or `-₹2,000`.
    pub display: String,
}

/// Derived order summary: original, optional discount, final total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub lines: Vec<PriceLine>,
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
}

/// Snapshot of a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutView {
    pub session_id: Uuid,
    pub step: CheckoutStep,
    pub course: CourseOfferView,
    pub identity: IdentityRecord,
    pub field_errors: FieldErrors,
    pub applied_coupon: Option<String>,
    pub price: PriceBreakdown,
    /// The last user-facing error, if the previous action failed.
    pub error: Option<String>,
    pub enrollment_id: Option<Uuid>,
    pub payment_url: Option<String>,
}

/// Returned once the order is placed: open `payment_url` in a new
/// browsing context. The payment itself is not confirmed by this flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRedirect {
    pub enrollment_id: Uuid,
    pub payment_url: String,
}

/// Body of a 422 response for an identity record that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: FieldErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_request_is_a_plain_object() {
        let mut fields = BTreeMap::new();
        fields.insert(IdentityField::Phone, "9123456789".to_string());
        let json = serde_json::to_string(&EditIdentityRequest(fields)).unwrap();
        assert_eq!(json, r#"{"phone":"9123456789"}"#);
    }

    #[test]
    fn test_edit_request_from_record_covers_every_field() {
        let record = IdentityRecord {
            city: "Pune".into(),
            ..Default::default()
        };
        let edit = EditIdentityRequest::from(&record);
        assert_eq!(edit.0.len(), IdentityField::ALL.len());
        assert_eq!(edit.0[&IdentityField::City], "Pune");
    }

    #[test]
    fn test_step_display_matches_serde() {
        let step = CheckoutStep::AwaitingCouponDecision;
        assert_eq!(
            serde_json::to_string(&step).unwrap(),
            format!("\"{step}\"")
        );
    }
}
