//! Order lifecycle reconciliation
//!
//! # Action flow
//!
//! ```text
//! submit(draft)
//!     ├─ 1. Validate draft (no network call on failure)
//!     ├─ 2. POST crear → order id
//!     ├─ 3. Record "Solicitado" label (best effort)
//!     └─ 4. Optional auto-approve:
//!            ├─ quote + settlement from the created lines
//!            ├─ PUT aprobar
//!            ├─ on failure: PUT rechazar (compensation, best effort),
//!            │             re-surface the original approve error
//!            └─ on success: label = "Con deuda" | "Aprobado"
//! ```
//!
//! All remote calls run strictly sequentially; approve needs the id from
//! create, receive needs the approved amounts. No call is retried here;
//! retries are user-initiated.

use crate::error::{ReconcileError, ReconcileResult};
use crate::status_store::StatusStore;
use compras_client::api::orders::{
    ApproveOrderLine, ApproveOrderRequest, CreateOrderLine, CreateOrderRequest, PurchaseOrderApi,
    ReceiveOrderLine, ReceiveOrderRequest, RejectOrderRequest,
};
use shared::order::{
    OrderLine, PaymentMethod, PricingContext, Quote, Settlement, StatusLabel, compute_quote,
    compute_settlement,
};

/// Reason sent with the compensating reject after a failed auto-approve
const AUTO_APPROVE_REJECT_REASON: &str = "Aprobación automática fallida";

// ============================================================================
// Inputs
// ============================================================================

/// A draft order line as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub product_id: i64,
    pub quantity: f64,
    pub unit_price: f64,
    pub unit_of_measure: String,
}

/// A purchase order about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub supplier_id: i64,
    pub payment_method: PaymentMethod,
    /// Amount already paid to the supplier before this order
    pub amount_paid: f64,
    pub lines: Vec<DraftLine>,
}

/// Payment fields for an approve/receive action
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentTerms {
    /// Amount already paid, from the fetched remote state
    pub already_paid: f64,
    /// Payment entered for this action
    pub new_payment: f64,
    /// "Pago completo": force the payment to exactly the outstanding balance
    pub full_payment: bool,
}

/// Everything an approve call needs beyond the order lines
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalTerms {
    pub supplier_id: i64,
    pub account_code: String,
    pub pricing: PricingContext,
    pub payment: PaymentTerms,
}

/// Reception entry for one line. `None` (or a non-positive quantity) falls
/// back to the solicited value, so reception entry is not blocked by a
/// blank field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivedLine {
    pub product_id: i64,
    pub quantity: Option<f64>,
    pub unit_cost: Option<f64>,
    pub note: Option<String>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of submitting a new order
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub order_id: i64,
    /// Advisory label after the action
    pub label: StatusLabel,
    /// Present when the order was auto-approved in the same action
    pub approval: Option<ApproveOutcome>,
}

/// Result of an approve action
#[derive(Debug, Clone, PartialEq)]
pub struct ApproveOutcome {
    pub quote: Quote,
    pub settlement: Settlement,
    pub label: StatusLabel,
}

/// Result of a receive action
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiveOutcome {
    /// Quote recomputed from the received quantities and costs
    pub received: Quote,
    pub settlement: Settlement,
    pub label: StatusLabel,
}

// ============================================================================
// Reconciler
// ============================================================================

/// Orchestrates purchase order lifecycle actions against the remote API
pub struct Reconciler<A> {
    api: A,
    store: StatusStore,
}

impl<A: PurchaseOrderApi> Reconciler<A> {
    pub fn new(api: A, store: StatusStore) -> Self {
        Self { api, store }
    }

    /// The underlying advisory label store
    pub fn status_store(&self) -> &StatusStore {
        &self.store
    }

    /// Advisory label for an order, if one was recorded
    pub fn load_status(&self, order_id: i64) -> ReconcileResult<Option<StatusLabel>> {
        Ok(self.store.get(order_id)?)
    }

    /// Record the awaiting-reception label for an approved order
    pub fn mark_reception_pending(&self, order_id: i64) -> ReconcileResult<()> {
        self.store.record(order_id, StatusLabel::ReceptionPending)?;
        Ok(())
    }

    /// Submit a new purchase order, optionally auto-approving it in the same
    /// action when the caller's role allows it.
    pub async fn submit(
        &self,
        draft: &OrderDraft,
        auto_approve: Option<&ApprovalTerms>,
    ) -> ReconcileResult<SubmitOutcome> {
        validate_draft(draft)?;

        let request = CreateOrderRequest {
            supplier_id: draft.supplier_id,
            payment_method: draft.payment_method,
            amount_paid: draft.amount_paid,
            lines: to_wire_lines(&draft.lines),
        };

        let created = self.api.create_order(&request).await?;
        tracing::info!(order_id = created.id, status = %created.status, "Purchase order created");
        self.record_label(created.id, StatusLabel::Requested);

        let Some(terms) = auto_approve else {
            return Ok(SubmitOutcome {
                order_id: created.id,
                label: StatusLabel::Requested,
                approval: None,
            });
        };

        match self.do_approve(created.id, &draft.lines, terms).await {
            Ok(approval) => Ok(SubmitOutcome {
                order_id: created.id,
                label: approval.label,
                approval: Some(approval),
            }),
            Err(approve_err) => {
                // Compensate best-effort; its own failure is logged, not
                // surfaced, so the primary error stays visible.
                let reject = RejectOrderRequest {
                    reason: AUTO_APPROVE_REJECT_REASON.to_string(),
                };
                match self.api.reject_order(created.id, &reject).await {
                    Ok(()) => self.record_label(created.id, StatusLabel::Rejected),
                    Err(reject_err) => {
                        tracing::error!(
                            order_id = created.id,
                            error = %reject_err,
                            "Compensating reject failed; order left as Solicitado on the remote"
                        );
                    }
                }
                Err(approve_err)
            }
        }
    }

    /// Approve an existing order with final quantities, prices and payment
    pub async fn approve(
        &self,
        order_id: i64,
        lines: &[DraftLine],
        terms: &ApprovalTerms,
    ) -> ReconcileResult<ApproveOutcome> {
        validate_lines(lines)?;
        self.do_approve(order_id, lines, terms).await
    }

    async fn do_approve(
        &self,
        order_id: i64,
        lines: &[DraftLine],
        terms: &ApprovalTerms,
    ) -> ReconcileResult<ApproveOutcome> {
        let quote = compute_quote(&to_domain_lines(lines), &terms.pricing);
        let settlement = compute_settlement(
            quote.final_amount,
            terms.payment.already_paid,
            terms.payment.new_payment,
            terms.payment.full_payment,
        )?;

        let request = ApproveOrderRequest::from_parts(
            terms.supplier_id,
            terms.account_code.clone(),
            &terms.pricing,
            to_approve_lines(lines),
            quote.final_amount,
            settlement.new_payment,
        );

        let response = self.api.approve_order(order_id, &request).await?;
        tracing::info!(order_id, status = %response.status, "Purchase order approved");

        let label = settled_label(&settlement);
        self.record_label(order_id, label);

        Ok(ApproveOutcome {
            quote,
            settlement,
            label,
        })
    }

    /// Register goods reception. Received quantity and unit cost default to
    /// the solicited values when omitted or non-positive.
    pub async fn receive(
        &self,
        order_id: i64,
        solicited: &[DraftLine],
        received: &[ReceivedLine],
        payment_method: PaymentMethod,
        pricing: &PricingContext,
        payment: PaymentTerms,
    ) -> ReconcileResult<ReceiveOutcome> {
        validate_lines(solicited)?;

        let effective = effective_reception(solicited, received);
        let received_quote = compute_quote(&to_domain_lines(&effective.lines), pricing);
        let settlement = compute_settlement(
            received_quote.final_amount,
            payment.already_paid,
            payment.new_payment,
            payment.full_payment,
        )?;

        let request = ReceiveOrderRequest {
            lines: effective.wire_lines,
            amount_received: received_quote.final_amount,
            payment_method,
            amount_paid: settlement.new_payment,
        };

        let response = self.api.receive_order(order_id, &request).await?;
        tracing::info!(order_id, status = %response.status, "Goods reception registered");

        let label = settled_label(&settlement);
        self.record_label(order_id, label);

        Ok(ReceiveOutcome {
            received: received_quote,
            settlement,
            label,
        })
    }

    /// Best-effort label write. The label is an advisory cache and the remote
    /// action has already succeeded by the time it is written, so a store
    /// failure (including an invalid transition from a stale entry) is
    /// logged and swallowed.
    fn record_label(&self, order_id: i64, label: StatusLabel) {
        if let Err(e) = self.store.record(order_id, label) {
            tracing::warn!(order_id, label = %label, error = %e, "Failed to record advisory label");
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_draft(draft: &OrderDraft) -> ReconcileResult<()> {
    if draft.supplier_id <= 0 {
        return Err(ReconcileError::Validation(
            "A supplier must be selected".to_string(),
        ));
    }
    if !draft.amount_paid.is_finite() || draft.amount_paid < 0.0 {
        return Err(ReconcileError::Validation(
            "Amount paid must be a non-negative number".to_string(),
        ));
    }
    validate_lines(&draft.lines)
}

fn validate_lines(lines: &[DraftLine]) -> ReconcileResult<()> {
    if lines.is_empty() {
        return Err(ReconcileError::Validation(
            "The order must contain at least one line".to_string(),
        ));
    }
    for line in lines {
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(ReconcileError::Validation(format!(
                "Quantity must be positive for product {}",
                line.product_id
            )));
        }
        if !line.unit_price.is_finite() || line.unit_price < 0.0 {
            return Err(ReconcileError::Validation(format!(
                "Unit price must be non-negative for product {}",
                line.product_id
            )));
        }
    }
    Ok(())
}

fn to_wire_lines(lines: &[DraftLine]) -> Vec<CreateOrderLine> {
    lines
        .iter()
        .map(|line| CreateOrderLine {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_of_measure: line.unit_of_measure.clone(),
        })
        .collect()
}

fn to_approve_lines(lines: &[DraftLine]) -> Vec<ApproveOrderLine> {
    lines
        .iter()
        .map(|line| ApproveOrderLine {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_of_measure: line.unit_of_measure.clone(),
        })
        .collect()
}

fn to_domain_lines(lines: &[DraftLine]) -> Vec<OrderLine> {
    lines
        .iter()
        .map(|line| OrderLine::new(line.product_id.to_string(), line.quantity, line.unit_price))
        .collect()
}

fn settled_label(settlement: &Settlement) -> StatusLabel {
    if settlement.remaining_debt > 0.0 {
        StatusLabel::Owing
    } else {
        StatusLabel::Approved
    }
}

struct EffectiveReception {
    lines: Vec<DraftLine>,
    wire_lines: Vec<ReceiveOrderLine>,
}

/// Merge reception entries over the solicited lines. A missing entry, or one
/// with a non-positive/blank quantity or cost, falls back to the solicited
/// value.
fn effective_reception(solicited: &[DraftLine], received: &[ReceivedLine]) -> EffectiveReception {
    let mut lines = Vec::with_capacity(solicited.len());
    let mut wire_lines = Vec::with_capacity(solicited.len());

    for line in solicited {
        let entry = received.iter().find(|r| r.product_id == line.product_id);

        let quantity = entry
            .and_then(|r| r.quantity)
            .filter(|q| q.is_finite() && *q > 0.0)
            .unwrap_or(line.quantity);
        let unit_cost = entry
            .and_then(|r| r.unit_cost)
            .filter(|c| c.is_finite() && *c >= 0.0)
            .unwrap_or(line.unit_price);
        let note = entry.and_then(|r| r.note.clone());

        lines.push(DraftLine {
            product_id: line.product_id,
            quantity,
            unit_price: unit_cost,
            unit_of_measure: line.unit_of_measure.clone(),
        });
        wire_lines.push(ReceiveOrderLine {
            product_id: line.product_id,
            quantity_received: quantity,
            unit_cost,
            note,
        });
    }

    EffectiveReception { lines, wire_lines }
}
