//! Sale model and confirmation payload.
//!
//! A sale is accepted exactly as submitted. Zero or negative quantities
//! and empty product names are legal inputs and reach the counter
//! unchanged.

use serde::{Deserialize, Serialize};

/// A completed sale of `quantity` units of `product_name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sale {
    /// Free-form product name, used verbatim as the counter label.
    pub product_name: String,
    /// Units sold. Signed: no sign check is performed.
    pub quantity: i64,
}

impl Sale {
    /// Create a sale record.
    pub fn new(product_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }

    /// Confirmation returned to the caller once the sale is recorded.
    pub fn confirmation(&self) -> Message {
        Message::new(format!(
            "{} unidades de {} vendidas.",
            self.quantity, self.product_name
        ))
    }
}

/// `{"message": "..."}` JSON body shared by the business endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Greeting served at the root endpoint.
    pub fn greeting() -> Self {
        Self::new("Hello OpenTelemetry!")
    }
}
