use paydesk_core::{Balance, Payout};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// Available and pending balance per currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn balances(&self) -> Result<Vec<Balance>, ClientError> {
        self.get(&["balances"]).await
    }

    /// Payout history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn payouts(&self) -> Result<Vec<Payout>, ClientError> {
        self.get(&["balances", "payouts"]).await
    }
}
