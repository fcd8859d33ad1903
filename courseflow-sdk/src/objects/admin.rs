//! Admin API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enrollment::PaymentStatus;

/// Header name for admin API authentication (plaintext secret).
pub const ADMIN_AUTH_HEADER: &str = "Courseflow-Admin-Authorization";

/// Enrollment row as shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEnrollmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub package: String,
    pub original_price: rust_decimal::Decimal,
    pub coupon_code: Option<String>,
    pub discount_percentage: rust_decimal::Decimal,
    pub final_price: rust_decimal::Decimal,
    pub payment_status: PaymentStatus,
    pub payment_link: Option<String>,
    pub created_at: i64,
}

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 200;
const MAX_OFFSET: i64 = 100_000;

/// Query parameters for listing enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnrollmentsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub payment_status: Option<PaymentStatus>,
}

impl Default for ListEnrollmentsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            payment_status: None,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Clamp limit and offset to safe maximums.
pub fn clamp_pagination(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_LIMIT), offset.clamp(0, MAX_OFFSET))
}
