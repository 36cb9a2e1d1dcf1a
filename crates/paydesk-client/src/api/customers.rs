use paydesk_core::{Customer, CustomerId, CustomerUpdate, NewCustomer};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.get(&["customers"]).await
    }

    /// Get one customer.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the customer does not exist.
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ClientError> {
        self.get(&["customers", id.as_str()]).await
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` for a blank name or malformed email,
    /// otherwise any request error.
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ClientError> {
        if customer.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("customer name is required".into()));
        }
        if !paydesk_core::payer::is_valid_email(customer.email.trim()) {
            return Err(ClientError::InvalidInput(format!(
                "invalid customer email: {}",
                customer.email
            )));
        }
        self.post(&["customers"], customer).await
    }

    /// Update a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update_customer(
        &self,
        id: &CustomerId,
        update: &CustomerUpdate,
    ) -> Result<Customer, ClientError> {
        self.put(&["customers", id.as_str()], update).await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<(), ClientError> {
        self.delete(&["customers", id.as_str()]).await
    }
}
