//! Core purchase order types

use serde::{Deserialize, Serialize};

/// A single product row on a purchase order or receipt.
///
/// Quantities and prices come straight from form fields, so they are plain
/// `f64` here; the calculators validate and convert to `Decimal` internally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product ID
    pub product_id: String,
    /// Quantity ordered
    pub quantity: f64,
    /// Unit price
    pub unit_price: f64,
}

impl OrderLine {
    pub fn new(product_id: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }
}

/// Pricing toggles applied on top of the base amount.
///
/// Each field is independently toggleable: `None` means the toggle is off and
/// the value is neither applied locally nor sent to the remote system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingContext {
    /// Exchange-rate multiplier, applied per line before summing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    /// Tax percentage (e.g. 21 for 21% IVA)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
    /// Gross-receipts levy percentage (IIBB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levies_percent: Option<f64>,
}

impl PricingContext {
    /// Effective exchange rate: enabled only when finite and positive.
    /// An in-progress value ("0", "0.") behaves as if the toggle were off.
    pub fn effective_exchange_rate(&self) -> Option<f64> {
        self.exchange_rate.filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Effective tax percentage: enabled only when finite and non-negative.
    pub fn effective_tax_percent(&self) -> Option<f64> {
        self.tax_percent.filter(|p| p.is_finite() && *p >= 0.0)
    }

    /// Effective levies percentage: enabled only when finite and non-negative.
    pub fn effective_levies_percent(&self) -> Option<f64> {
        self.levies_percent.filter(|p| p.is_finite() && *p >= 0.0)
    }
}

/// Computed quote for a set of order lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Sum of line totals before surcharges
    pub base_amount: f64,
    /// Base amount with tax and levies applied
    pub final_amount: f64,
}

/// Payment method for an order or receipt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    /// Cash ("Efectivo"), the only method where change applies
    #[default]
    #[serde(rename = "Efectivo")]
    Cash,
    /// Card ("Tarjeta")
    #[serde(rename = "Tarjeta")]
    Card,
    /// Bank transfer ("Transferencia")
    #[serde(rename = "Transferencia")]
    Transfer,
    /// Current account / on credit ("Cuenta corriente")
    #[serde(rename = "Cuenta corriente")]
    CurrentAccount,
}

impl PaymentMethod {
    /// Wire label used by the remote API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta",
            Self::Transfer => "Transferencia",
            Self::CurrentAccount => "Cuenta corriente",
        }
    }

    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
