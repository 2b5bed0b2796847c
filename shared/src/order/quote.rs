//! Quote calculation: line totals and surcharge application
//!
//! Inputs come from live text fields during typing, so the calculation is
//! defensive: a degenerate line (zero/negative quantity, negative price,
//! non-finite value) contributes 0 instead of erroring. Surcharges are
//! additive on the same base, never compounded on each other.

use super::types::{OrderLine, PricingContext, Quote};
use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;

/// Amount contributed by a single line, after the exchange-rate multiplier.
///
/// The rate is applied per line before summing, not on the order total.
pub fn line_amount(line: &OrderLine, ctx: &PricingContext) -> Decimal {
    if !line.quantity.is_finite() || line.quantity <= 0.0 {
        return Decimal::ZERO;
    }
    if !line.unit_price.is_finite() || line.unit_price < 0.0 {
        return Decimal::ZERO;
    }

    let mut amount = to_decimal(line.quantity) * to_decimal(line.unit_price);
    if let Some(rate) = ctx.effective_exchange_rate() {
        amount *= to_decimal(rate);
    }
    amount
}

/// Compute the quote for a set of lines under the given pricing context.
///
/// `final_amount = base + base·tax% + base·levies%`; a disabled toggle simply
/// drops its term. Pure function: the exchange rate is caller-supplied, never
/// fetched here.
pub fn compute_quote(lines: &[OrderLine], ctx: &PricingContext) -> Quote {
    let base: Decimal = lines.iter().map(|line| line_amount(line, ctx)).sum();

    let tax = ctx
        .effective_tax_percent()
        .map(|p| base * to_decimal(p) / Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO);

    let levies = ctx
        .effective_levies_percent()
        .map(|p| base * to_decimal(p) / Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO);

    Quote {
        base_amount: to_f64(base),
        final_amount: to_f64(base + tax + levies),
    }
}
