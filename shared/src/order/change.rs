//! Change calculation for cash tenders

use super::types::PaymentMethod;
use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Tender amounts for a receipt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CashTender {
    pub amount_tendered: f64,
    pub change_due: f64,
}

/// Change due when the tendered amount exceeds the final total.
///
/// Never negative: an insufficient tender yields zero change (the shortfall
/// is handled as a validation concern by the caller).
pub fn compute_change(amount_tendered: f64, final_total: f64) -> f64 {
    let tendered = to_decimal(amount_tendered).max(Decimal::ZERO);
    let total = to_decimal(final_total).max(Decimal::ZERO);
    to_f64((tendered - total).max(Decimal::ZERO))
}

/// Resolve the tender for a payment method.
///
/// Change is only meaningful for cash; any other method forces both tendered
/// amount and change to zero, matching how the entry fields are reset when
/// the method is switched away from cash.
pub fn cash_tender(method: PaymentMethod, amount_tendered: f64, final_total: f64) -> CashTender {
    if method.is_cash() {
        CashTender {
            amount_tendered,
            change_due: compute_change(amount_tendered, final_total),
        }
    } else {
        CashTender {
            amount_tendered: 0.0,
            change_due: 0.0,
        }
    }
}
