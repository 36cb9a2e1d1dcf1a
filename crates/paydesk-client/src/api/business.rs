use paydesk_core::{Business, BusinessRegistration, RegistrationResponse};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// Register a new business.
    ///
    /// The returned token is not attached automatically; call
    /// [`PaydeskClient::set_token`] with it to act as the new business.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn register_business(
        &self,
        registration: &BusinessRegistration,
    ) -> Result<RegistrationResponse, ClientError> {
        if registration.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("business name is required".into()));
        }
        if !paydesk_core::payer::is_valid_email(registration.email.trim()) {
            return Err(ClientError::InvalidInput("a valid email is required".into()));
        }
        let response: RegistrationResponse =
            self.post(&["business", "register"], registration).await?;
        tracing::info!(business_id = %response.business.id, "Business registered");
        Ok(response)
    }

    /// Fetch the business the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid token.
    pub async fn current_business(&self) -> Result<Business, ClientError> {
        self.get(&["business", "me"]).await
    }
}
