//! Balance and payout types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

/// Settled and unsettled funds in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Funds available for payout.
    pub available: Money,
    /// Funds awaiting settlement.
    pub pending: Money,
}

impl Balance {
    /// Currency of this balance.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.available.currency
    }

    /// Available plus pending, in minor units.
    #[must_use]
    pub const fn total_minor(&self) -> i64 {
        self.available.amount + self.pending.amount
    }
}

/// A payout to the merchant's bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    /// Payout identifier.
    pub id: String,
    /// Amount paid out.
    pub amount: Money,
    /// Current status.
    pub status: PayoutStatus,
    /// Expected (or actual) arrival date.
    #[serde(default)]
    pub arrival_date: Option<NaiveDate>,
    /// When the payout was created.
    pub created_at: DateTime<Utc>,
}

/// Payout lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Scheduled.
    Pending,
    /// Sent to the bank.
    InTransit,
    /// Arrived.
    Paid,
    /// Rejected by the bank.
    Failed,
}
