//! Product pricing endpoint
//!
//! Used to refresh a line's price as the quantity changes, so the displayed
//! amount always matches what the remote system would charge.

use crate::{ClientResult, HttpClient};
use serde::{Deserialize, Serialize};

/// Body for `POST /productos/calcular_precio/{product_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPriceRequest {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "cliente_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
}

/// Unit and total price for the requested quantity
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProductPriceResponse {
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
    #[serde(rename = "precio_total")]
    pub total_price: f64,
}

impl HttpClient {
    /// Fetch the remote price for a product at a given quantity
    pub async fn product_price(
        &self,
        request: &ProductPriceRequest,
    ) -> ClientResult<ProductPriceResponse> {
        self.post(
            &format!("productos/calcular_precio/{}", request.product_id),
            request,
        )
        .await
    }
}
