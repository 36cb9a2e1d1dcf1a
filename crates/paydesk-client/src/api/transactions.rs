use paydesk_core::{Page, Transaction, TransactionFilter, TransactionId};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// List transactions matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` if the date range is inverted,
    /// otherwise any request error.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Page<Transaction>, ClientError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(ClientError::InvalidInput(format!(
                    "date range starts after it ends: {from} > {to}"
                )));
            }
        }
        self.get_query(&["transactions"], &filter.to_query()).await
    }

    /// Get one transaction.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the transaction does not exist.
    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Transaction, ClientError> {
        self.get(&["transactions", id.as_str()]).await
    }
}
