//! Order summary derivation and currency formatting.

use courseflow_sdk::objects::{PriceBreakdown, PriceLine, PriceLineKind};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::coupon::AppliedCoupon;

/// Derive the displayed order summary from the current price state.
///
/// Without a coupon the total is the original price. With one, the
/// discount and total are the pricing function's own figures. The
/// discount line is shown only when the discount is positive.
pub fn present(original_price: Decimal, coupon: Option<&AppliedCoupon>) -> PriceBreakdown {
    let (discount_amount, final_price) = match coupon {
        Some(applied) => (applied.discount_amount, applied.final_price),
        None => (Decimal::ZERO, original_price),
    };

    let mut lines = Vec::with_capacity(3);
    lines.push(PriceLine {
        kind: PriceLineKind::Original,
        label: "Course price".to_owned(),
        amount: original_price,
        display: format_inr(original_price),
    });
    if discount_amount > Decimal::ZERO {
        let label = match coupon {
            Some(applied) => format!("Coupon discount ({})", applied.code),
            None => "Discount".to_owned(),
        };
        lines.push(PriceLine {
            kind: PriceLineKind::Discount,
            label,
            amount: discount_amount,
            display: format!("-{}", format_inr(discount_amount)),
        });
    }
    lines.push(PriceLine {
        kind: PriceLineKind::Total,
        label: "Total".to_owned(),
        amount: final_price,
        display: format_inr(final_price),
    });

    PriceBreakdown {
        lines,
        original_price,
        discount_amount,
        final_price,
    }
}

/// Format an amount in rupees with Indian digit grouping.
///
/// `9999` → `₹9,999`, `123456.5` → `₹1,23,456.50`. Paise are shown only
/// when non-zero.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let rupees = abs.trunc();
    let paise = ((abs - rupees) * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u32()
        .unwrap_or(0);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&group_indian(&rupees.to_string()));
    if paise != 0 {
        out.push_str(&format!(".{paise:02}"));
    }
    out
}

/// Insert separators: last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
