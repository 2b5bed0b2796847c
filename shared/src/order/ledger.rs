//! Debt rollups for reporting views
//!
//! Aggregates fetched orders into per-supplier and per-product outstanding
//! debt. A pure fold over its inputs, recomputed from scratch on each call;
//! the datasets here are pagesful of orders, not millions.

use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line's share of an order, used for apportioning debt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtLine {
    /// Product key (id or display name, whatever the report groups by)
    pub product_key: String,
    /// Line total before surcharges
    pub line_total: f64,
}

/// An order with its outstanding debt, as fetched for reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDebt {
    pub order_id: String,
    pub supplier_name: String,
    pub lines: Vec<DebtLine>,
    pub remaining_debt: f64,
}

/// Aggregated outstanding debt, keyed by supplier and by product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DebtRollup {
    pub by_supplier: HashMap<String, f64>,
    pub by_product: HashMap<String, f64>,
}

/// Roll up outstanding debt across orders.
///
/// Each order's debt is apportioned to its lines proportionally to the line's
/// share of the order base total: `line_debt = remaining × line_total / base`.
/// An order with a zero base total apportions nothing per product (its debt
/// still counts against the supplier). Display-only, so negative inputs are
/// clamped rather than rejected.
pub fn aggregate(orders: &[OrderDebt]) -> DebtRollup {
    let mut by_supplier: HashMap<String, Decimal> = HashMap::new();
    let mut by_product: HashMap<String, Decimal> = HashMap::new();

    for order in orders {
        let remaining = to_decimal(order.remaining_debt).max(Decimal::ZERO);

        *by_supplier
            .entry(order.supplier_name.clone())
            .or_insert(Decimal::ZERO) += remaining;

        let base: Decimal = order
            .lines
            .iter()
            .map(|l| to_decimal(l.line_total).max(Decimal::ZERO))
            .sum();
        if base.is_zero() {
            continue;
        }

        for line in &order.lines {
            let share = to_decimal(line.line_total).max(Decimal::ZERO) / base;
            *by_product
                .entry(line.product_key.clone())
                .or_insert(Decimal::ZERO) += remaining * share;
        }
    }

    DebtRollup {
        by_supplier: by_supplier.into_iter().map(|(k, v)| (k, to_f64(v))).collect(),
        by_product: by_product.into_iter().map(|(k, v)| (k, to_f64(v))).collect(),
    }
}

/// Top-N debtors, descending by debt. Presentation helper layered on top of
/// the rollup maps; name breaks ties for a stable order.
pub fn top_debtors(map: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(n);
    entries
}
