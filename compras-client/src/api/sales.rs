//! Sale-side calculation endpoints
//!
//! The remote system exposes its own total and change calculations. The live
//! system keeps the local calculators (`shared::order`) and these endpoints
//! in agreement to the cent; the client exposes both so callers can verify.

use super::toggle_field;
use crate::{ClientResult, HttpClient};
use serde::{Deserialize, Serialize};
use shared::order::PricingContext;

/// Line item for a sale total request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
}

/// Body for `POST /ventas/calcular_total`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleTotalRequest {
    #[serde(rename = "detalles")]
    pub lines: Vec<SaleLine>,
    #[serde(rename = "iva")]
    pub tax_percent: String,
}

impl SaleTotalRequest {
    pub fn new(lines: Vec<SaleLine>, pricing: &PricingContext) -> Self {
        Self {
            lines,
            tax_percent: toggle_field(pricing.effective_tax_percent()),
        }
    }
}

/// Remote-computed sale total
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SaleTotalResponse {
    pub total: f64,
}

/// Body for `POST /ventas/calcular_vuelto`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleChangeRequest {
    #[serde(rename = "monto_recibido")]
    pub amount_tendered: f64,
    pub total: f64,
}

/// Remote-computed change
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SaleChangeResponse {
    #[serde(rename = "vuelto")]
    pub change_due: f64,
}

impl HttpClient {
    /// Compute a sale total on the remote side
    pub async fn sale_total(&self, request: &SaleTotalRequest) -> ClientResult<SaleTotalResponse> {
        self.post("ventas/calcular_total", request).await
    }

    /// Compute change on the remote side
    pub async fn sale_change(
        &self,
        request: &SaleChangeRequest,
    ) -> ClientResult<SaleChangeResponse> {
        self.post("ventas/calcular_vuelto", request).await
    }
}
