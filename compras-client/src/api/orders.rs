//! Purchase order endpoints
//!
//! Wire field names are the API's Spanish names; the Rust structs keep
//! English names and map via serde renames.

use super::toggle_field;
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::order::{PaymentMethod, PricingContext};

// ============================================================================
// Requests / Responses
// ============================================================================

/// Line item for order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderLine {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    /// Estimated unit price at request time
    #[serde(rename = "precio_unitario_estimado")]
    pub unit_price: f64,
    #[serde(rename = "unidad_medida")]
    pub unit_of_measure: String,
}

/// Body for `POST /ordenes_compra/crear`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    #[serde(rename = "proveedor_id")]
    pub supplier_id: i64,
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "monto_abonado")]
    pub amount_paid: f64,
    #[serde(rename = "detalles")]
    pub lines: Vec<CreateOrderLine>,
}

/// Response from order creation: the new id plus the authoritative status
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateOrderResponse {
    pub id: i64,
    #[serde(rename = "estado")]
    pub status: String,
}

/// Line item for order approval, carrying the final (no longer estimated)
/// unit price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApproveOrderLine {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
    #[serde(rename = "unidad_medida")]
    pub unit_of_measure: String,
}

/// Body for `PUT /ordenes_compra/aprobar/{id}`
///
/// The levy / tax / exchange-rate fields are sent as strings and must be
/// empty when the corresponding toggle is off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApproveOrderRequest {
    #[serde(rename = "proveedor_id")]
    pub supplier_id: i64,
    #[serde(rename = "codigo_cuenta")]
    pub account_code: String,
    #[serde(rename = "iva")]
    pub tax_percent: String,
    #[serde(rename = "iibb")]
    pub levies_percent: String,
    #[serde(rename = "tipo_cambio")]
    pub exchange_rate: String,
    #[serde(rename = "detalles")]
    pub lines: Vec<ApproveOrderLine>,
    pub total: f64,
    #[serde(rename = "monto_abonado")]
    pub amount_paid: f64,
}

impl ApproveOrderRequest {
    /// Build the approve body from domain values. The pricing toggles are
    /// translated into the wire convention (empty string = off).
    pub fn from_parts(
        supplier_id: i64,
        account_code: impl Into<String>,
        pricing: &PricingContext,
        lines: Vec<ApproveOrderLine>,
        total: f64,
        amount_paid: f64,
    ) -> Self {
        Self {
            supplier_id,
            account_code: account_code.into(),
            tax_percent: toggle_field(pricing.effective_tax_percent()),
            levies_percent: toggle_field(pricing.effective_levies_percent()),
            exchange_rate: toggle_field(pricing.effective_exchange_rate()),
            lines,
            total,
            amount_paid,
        }
    }
}

/// Response from approval
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApproveOrderResponse {
    pub id: i64,
    #[serde(rename = "estado")]
    pub status: String,
}

/// Body for `PUT /ordenes_compra/rechazar/{id}` (compensation only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectOrderRequest {
    #[serde(rename = "motivo")]
    pub reason: String,
}

/// Line item for goods reception
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiveOrderLine {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad_recibida")]
    pub quantity_received: f64,
    #[serde(rename = "costo_unitario")]
    pub unit_cost: f64,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body for `PUT /ordenes_compra/recibir/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiveOrderRequest {
    #[serde(rename = "detalles")]
    pub lines: Vec<ReceiveOrderLine>,
    #[serde(rename = "monto_recibido")]
    pub amount_received: f64,
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "monto_abonado")]
    pub amount_paid: f64,
}

/// Response from reception
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReceiveOrderResponse {
    pub id: i64,
    #[serde(rename = "estado")]
    pub status: String,
}

// ============================================================================
// API trait
// ============================================================================

/// Purchase order operations against the remote system.
///
/// The reconciler depends on this trait rather than on [`HttpClient`]
/// directly so the lifecycle logic can be exercised with a scripted mock.
#[async_trait]
pub trait PurchaseOrderApi: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse>;

    async fn approve_order(
        &self,
        order_id: i64,
        request: &ApproveOrderRequest,
    ) -> ClientResult<ApproveOrderResponse>;

    async fn reject_order(&self, order_id: i64, request: &RejectOrderRequest) -> ClientResult<()>;

    async fn receive_order(
        &self,
        order_id: i64,
        request: &ReceiveOrderRequest,
    ) -> ClientResult<ReceiveOrderResponse>;
}

#[async_trait]
impl PurchaseOrderApi for HttpClient {
    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse> {
        self.post("ordenes_compra/crear", request).await
    }

    async fn approve_order(
        &self,
        order_id: i64,
        request: &ApproveOrderRequest,
    ) -> ClientResult<ApproveOrderResponse> {
        self.put(&format!("ordenes_compra/aprobar/{}", order_id), request)
            .await
    }

    async fn reject_order(&self, order_id: i64, request: &RejectOrderRequest) -> ClientResult<()> {
        // The reject endpoint returns a confirmation body we do not consume
        let _: serde_json::Value = self
            .put(&format!("ordenes_compra/rechazar/{}", order_id), request)
            .await?;
        Ok(())
    }

    async fn receive_order(
        &self,
        order_id: i64,
        request: &ReceiveOrderRequest,
    ) -> ClientResult<ReceiveOrderResponse> {
        self.put(&format!("ordenes_compra/recibir/{}", order_id), request)
            .await
    }
}

/// Delegating impl so callers can share one client behind an `Arc`
#[async_trait]
impl<T: PurchaseOrderApi + ?Sized> PurchaseOrderApi for std::sync::Arc<T> {
    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<CreateOrderResponse> {
        (**self).create_order(request).await
    }

    async fn approve_order(
        &self,
        order_id: i64,
        request: &ApproveOrderRequest,
    ) -> ClientResult<ApproveOrderResponse> {
        (**self).approve_order(order_id, request).await
    }

    async fn reject_order(&self, order_id: i64, request: &RejectOrderRequest) -> ClientResult<()> {
        (**self).reject_order(order_id, request).await
    }

    async fn receive_order(
        &self,
        order_id: i64,
        request: &ReceiveOrderRequest,
    ) -> ClientResult<ReceiveOrderResponse> {
        (**self).receive_order(order_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_request_toggles_off_serialize_as_empty_strings() {
        let pricing = PricingContext {
            exchange_rate: None,
            tax_percent: Some(21.0),
            levies_percent: None,
        };
        let request =
            ApproveOrderRequest::from_parts(7, "401-COMPRAS", &pricing, vec![], 1210.0, 0.0);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["iva"], "21");
        assert_eq!(json["iibb"], "");
        assert_eq!(json["tipo_cambio"], "");
        assert_eq!(json["proveedor_id"], 7);
        assert_eq!(json["codigo_cuenta"], "401-COMPRAS");
    }

    #[test]
    fn test_create_request_wire_names() {
        let request = CreateOrderRequest {
            supplier_id: 3,
            payment_method: PaymentMethod::Cash,
            amount_paid: 100.0,
            lines: vec![CreateOrderLine {
                product_id: 11,
                quantity: 2.0,
                unit_price: 50.0,
                unit_of_measure: "kg".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["proveedor_id"], 3);
        assert_eq!(json["metodo_pago"], "Efectivo");
        assert_eq!(json["monto_abonado"], 100.0);
        assert_eq!(json["detalles"][0]["producto_id"], 11);
        assert_eq!(json["detalles"][0]["cantidad"], 2.0);
        assert_eq!(json["detalles"][0]["unidad_medida"], "kg");
        // Creation sends an estimated price, not a final one
        assert_eq!(json["detalles"][0]["precio_unitario_estimado"], 50.0);
    }

    #[test]
    fn test_approve_line_carries_final_price() {
        let pricing = PricingContext::default();
        let request = ApproveOrderRequest::from_parts(
            7,
            "401-COMPRAS",
            &pricing,
            vec![ApproveOrderLine {
                product_id: 11,
                quantity: 2.0,
                unit_price: 55.0,
                unit_of_measure: "kg".to_string(),
            }],
            110.0,
            0.0,
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["detalles"][0]["precio_unitario"], 55.0);
        assert!(json["detalles"][0].get("precio_unitario_estimado").is_none());
    }
}
