//! Transaction types and list filters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{Money, Provider};
use crate::{CustomerId, TransactionId};

/// Default page size for transaction listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound the platform accepts for `pageSize`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A payment transaction recorded by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Platform identifier.
    pub id: TransactionId,
    /// Provider reference (PaymentIntent ID or Paystack reference).
    pub reference: String,
    /// Charged amount.
    pub amount: Money,
    /// Current status.
    pub status: TransactionStatus,
    /// Processor that handled the charge.
    pub provider: Provider,
    /// Payer email.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed by the provider.
    Succeeded,
    /// Rejected by the issuer or provider.
    Declined,
    /// Failed for a technical reason.
    Failed,
    /// Refunded after success.
    Refunded,
    /// Abandoned by the payer.
    Cancelled,
}

impl TransactionStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Declined => "declined",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the status can still change.
    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "succeeded" | "success" => Ok(Self::Succeeded),
            "declined" => Ok(Self::Declined),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// Filter for listing transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only transactions with this status.
    pub status: Option<TransactionStatus>,
    /// Only transactions from this provider.
    pub provider: Option<Provider>,
    /// Only transactions for this customer.
    pub customer: Option<CustomerId>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, clamped to [`MAX_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl TransactionFilter {
    /// Render the filter as query parameters, omitting absent fields.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(provider) = self.provider {
            query.push(("provider", provider.as_str().to_string()));
        }
        if let Some(customer) = &self.customer {
            query.push(("customer", customer.to_string()));
        }
        if let Some(from) = self.from {
            query.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            query.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.max(1).to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.clamp(1, MAX_PAGE_SIZE).to_string()));
        }
        query
    }
}
