//! Compras Client - HTTP client for the administration REST API
//!
//! Typed requests and responses for the purchase order, product pricing and
//! sale endpoints. The reconciler consumes the [`PurchaseOrderApi`] trait so
//! it can be tested without a network.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export the API surface for convenience
pub use api::orders::{
    ApproveOrderLine, ApproveOrderRequest, ApproveOrderResponse, CreateOrderLine,
    CreateOrderRequest, CreateOrderResponse, PurchaseOrderApi, ReceiveOrderLine,
    ReceiveOrderRequest, ReceiveOrderResponse, RejectOrderRequest,
};
pub use api::products::{ProductPriceRequest, ProductPriceResponse};
pub use api::sales::{SaleChangeRequest, SaleChangeResponse, SaleLine, SaleTotalRequest, SaleTotalResponse};
