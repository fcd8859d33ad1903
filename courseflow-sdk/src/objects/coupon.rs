//! Coupon request/response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checkout::CheckoutView;

/// Verdict of the remote pricing function for a coupon code.
///
/// A rejected coupon is a normal outcome (`success == false`) carrying a
/// user-facing `message`; the numeric fields may be absent in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponOutcome {
    pub success: bool,
    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub final_price: Decimal,
    #[serde(default)]
    pub original_price: Decimal,
    #[serde(default)]
    pub message: String,
}

/// Request body for applying a coupon to a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

/// Response after a coupon application, accepted or rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyCouponResponse {
    pub outcome: CouponOutcome,
    pub checkout: CheckoutView,
}
