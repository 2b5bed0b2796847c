//! Purchase order domain module
//!
//! This module provides the calculation and classification logic for the
//! purchase workflow:
//! - Quote: line totals and surcharge application
//! - Settlement: partial payment / outstanding debt classification
//! - Change: cash tender handling
//! - Ledger: per-supplier and per-product debt rollups
//! - Status: the advisory lifecycle labels cached client-side

pub mod change;
pub mod ledger;
pub mod quote;
pub mod settlement;
pub mod status;
pub mod types;

// Re-exports
pub use change::{CashTender, cash_tender, compute_change};
pub use ledger::{DebtLine, DebtRollup, OrderDebt, aggregate, top_debtors};
pub use quote::{compute_quote, line_amount};
pub use settlement::{PaymentStatus, Settlement, SettlementError, compute_settlement};
pub use status::StatusLabel;
pub use types::{OrderLine, PaymentMethod, PricingContext, Quote};
