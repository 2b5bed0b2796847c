//! Reconciliation error types

use compras_client::ClientError;
use shared::order::SettlementError;
use thiserror::Error;

/// Errors surfaced by a reconciliation action
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Settlement validation failed (also blocks the network call)
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Remote call failed; the transition was aborted
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Advisory status store failed
    #[error(transparent)]
    Store(#[from] crate::status_store::StoreError),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
