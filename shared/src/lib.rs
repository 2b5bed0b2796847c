//! Shared domain types and calculators for the Compras purchase workflow
//!
//! Pure business logic: quote/total arithmetic, payment settlement, change
//! calculation, debt rollups and the advisory order status labels. No I/O;
//! everything here is synchronous and testable without a network.

pub mod money;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
