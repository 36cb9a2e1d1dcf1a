//! Product catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Platform identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the product can currently be purchased.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Units in stock; `None` means untracked.
    #[serde(default)]
    pub inventory: Option<u32>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Whether the product can be added to a checkout.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.active && self.inventory != Some(0)
    }
}

/// Request body for creating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Units in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<u32>,
}

/// Partial update for a product.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    /// New image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Activate or deactivate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// New stock level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<u32>,
}
