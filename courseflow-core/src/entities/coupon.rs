use crate::backend::BackendError;
use crate::framework::DatabaseProcessor;
use compact_str::CompactString;
use courseflow_sdk::objects::CouponOutcome;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A coupon code as sent to the pricing function: trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CouponCode(CompactString);

impl CouponCode {
    /// Normalize user input. Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(CompactString::from(trimmed.to_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
/// Remote procedure `apply_coupon(code, user_id, original_price)`.
///
/// The function owns every pricing rule (validity, expiry, per-user
/// limits, rounding); the caller only relays its verdict.
pub struct ApplyCoupon {
    pub code: CouponCode,
    pub user_id: Uuid,
    pub original_price: Decimal,
}

impl Processor<ApplyCoupon> for DatabaseProcessor {
    type Output = CouponOutcome;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:ApplyCoupon")]
    async fn process(&self, cmd: ApplyCoupon) -> Result<CouponOutcome, BackendError> {
        let sqlx::types::Json(outcome) =
            sqlx::query_scalar::<_, sqlx::types::Json<CouponOutcome>>(
                "SELECT apply_coupon($1, $2, $3)",
            )
            .bind(cmd.code.as_str())
            .bind(cmd.user_id)
            .bind(cmd.original_price)
            .fetch_one(&self.pool)
            .await?;
        Ok(outcome)
    }
}
