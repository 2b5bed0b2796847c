//! Purchase order lifecycle reconciliation
//!
//! Orchestrates the create → approve → receive sequence against the remote
//! API, computing the financial payload for each call and maintaining the
//! durable advisory status label per order. Remote calls run strictly
//! sequentially: each step consumes identifiers and amounts produced by the
//! previous one.

pub mod error;
pub mod reconciler;
pub mod status_store;

pub use error::{ReconcileError, ReconcileResult};
pub use reconciler::{
    ApprovalTerms, ApproveOutcome, DraftLine, OrderDraft, PaymentTerms, ReceiveOutcome,
    ReceivedLine, Reconciler, SubmitOutcome,
};
pub use status_store::{StatusStore, StoreError};
