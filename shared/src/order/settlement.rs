//! Payment settlement: remaining debt and payment status classification
//!
//! The settlement feeds the amount that is submitted to the remote system, so
//! an overpayment is rejected with a typed error rather than clamped.
//! Clamping is reserved for display-only aggregates (see `ledger`).

use crate::money::{MONEY_TOLERANCE, to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a settlement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Fully paid (remaining debt is zero, total due positive)
    Paid,
    /// Partially paid (some debt remains)
    Partial,
    /// Nothing paid yet (remaining debt equals total due)
    Owing,
    /// Total due is zero, nothing to settle
    NotApplicable,
}

/// Result of settling a payment against a total due
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub total_due: f64,
    /// Amount already paid according to the remote state
    pub already_paid: f64,
    /// Payment applied by this action (after the full-payment override)
    pub new_payment: f64,
    /// Outstanding debt after this payment, clamped to zero
    pub remaining_debt: f64,
    pub status: PaymentStatus,
}

/// Settlement validation errors, raised before any network call
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("payment amount must be a non-negative number, got {0}")]
    InvalidPayment(f64),

    #[error("payment {attempted:.2} exceeds outstanding balance {outstanding:.2}")]
    Overpayment { attempted: f64, outstanding: f64 },
}

/// Settle a new payment against a total due.
///
/// When `full_payment` is set, the entered amount is ignored and replaced by
/// exactly the outstanding balance (mirrors the "pago completo" checkbox
/// overwriting the input field). Otherwise the payment is validated: it must
/// be non-negative, finite, and must not exceed the outstanding balance.
pub fn compute_settlement(
    total_due: f64,
    already_paid: f64,
    new_payment: f64,
    full_payment: bool,
) -> Result<Settlement, SettlementError> {
    // total_due and already_paid come from fetched remote state; degrade
    // quietly. Negative totals are treated as nothing due.
    let due = to_decimal(total_due).max(Decimal::ZERO);
    let paid = to_decimal(already_paid).max(Decimal::ZERO);
    let outstanding = (due - paid).max(Decimal::ZERO);

    let payment = if full_payment {
        outstanding
    } else {
        if !new_payment.is_finite() || new_payment < 0.0 {
            return Err(SettlementError::InvalidPayment(new_payment));
        }
        let payment = to_decimal(new_payment);
        if payment > outstanding + MONEY_TOLERANCE {
            return Err(SettlementError::Overpayment {
                attempted: new_payment,
                outstanding: to_f64(outstanding),
            });
        }
        payment
    };

    let remaining = (due - (paid + payment)).max(Decimal::ZERO);

    let status = if due <= MONEY_TOLERANCE {
        PaymentStatus::NotApplicable
    } else if remaining <= MONEY_TOLERANCE {
        PaymentStatus::Paid
    } else if (due - remaining).abs() <= MONEY_TOLERANCE {
        PaymentStatus::Owing
    } else {
        PaymentStatus::Partial
    };

    Ok(Settlement {
        total_due: to_f64(due),
        already_paid: to_f64(paid),
        new_payment: to_f64(payment),
        remaining_debt: to_f64(remaining),
        status,
    })
}
