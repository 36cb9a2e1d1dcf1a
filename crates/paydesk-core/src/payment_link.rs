//! Shareable payment link types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::PaymentLinkId;

/// A fixed-amount link a merchant can share with payers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    /// Platform identifier.
    pub id: PaymentLinkId,
    /// Title shown on the payment page.
    pub title: String,
    /// Amount charged.
    pub amount: Money,
    /// Description shown on the payment page.
    #[serde(default)]
    pub description: Option<String>,
    /// Shareable URL.
    pub url: String,
    /// Whether the link still accepts payments.
    #[serde(default = "default_active")]
    pub active: bool,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

/// Request body for creating a payment link.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentLink {
    /// Title shown on the payment page.
    pub title: String,
    /// Amount charged.
    pub amount: Money,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
