//! Typed endpoint definitions
//!
//! Every request and response is an explicit struct; an unexpected shape
//! fails with `ClientError::InvalidResponse` instead of being absorbed by
//! optional-field fallbacks.

pub mod orders;
pub mod products;
pub mod sales;

/// Serialize an optional numeric field the way the remote API expects for
/// toggleable values: the number as a string when the toggle is on, an empty
/// string when it is off.
pub(crate) fn toggle_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
