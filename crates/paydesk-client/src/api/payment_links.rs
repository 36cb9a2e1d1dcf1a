use paydesk_core::{NewPaymentLink, PaymentLink, PaymentLinkId};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// List payment links.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_payment_links(&self) -> Result<Vec<PaymentLink>, ClientError> {
        self.get(&["payment-links"]).await
    }

    /// Create a payment link.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` for a blank title or non-positive amount.
    pub async fn create_payment_link(
        &self,
        link: &NewPaymentLink,
    ) -> Result<PaymentLink, ClientError> {
        if link.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("payment link title is required".into()));
        }
        if link.amount.amount <= 0 {
            return Err(ClientError::InvalidInput(
                "payment link amount must be positive".into(),
            ));
        }
        self.post(&["payment-links"], link).await
    }

    /// Stop a payment link from accepting payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn deactivate_payment_link(
        &self,
        id: &PaymentLinkId,
    ) -> Result<PaymentLink, ClientError> {
        self.post_empty(&["payment-links", id.as_str(), "deactivate"])
            .await
    }
}
