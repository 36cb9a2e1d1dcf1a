use paydesk_core::storefront::is_valid_slug;
use paydesk_core::{NewStorefront, Storefront, StorefrontId};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// List storefronts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_storefronts(&self) -> Result<Vec<Storefront>, ClientError> {
        self.get(&["storefronts"]).await
    }

    /// Get one storefront.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the storefront does not exist.
    pub async fn get_storefront(&self, id: &StorefrontId) -> Result<Storefront, ClientError> {
        self.get(&["storefronts", id.as_str()]).await
    }

    /// Create a storefront.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` for a blank name or non-canonical slug.
    pub async fn create_storefront(
        &self,
        storefront: &NewStorefront,
    ) -> Result<Storefront, ClientError> {
        if storefront.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("storefront name is required".into()));
        }
        if !is_valid_slug(&storefront.slug) {
            return Err(ClientError::InvalidInput(format!(
                "invalid storefront slug: {:?}",
                storefront.slug
            )));
        }
        self.post(&["storefronts"], storefront).await
    }

    /// Make a storefront publicly reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn publish_storefront(&self, id: &StorefrontId) -> Result<Storefront, ClientError> {
        let storefront: Storefront = self
            .post_empty(&["storefronts", id.as_str(), "publish"])
            .await?;
        tracing::info!(storefront_id = %id, url = ?storefront.url, "Storefront published");
        Ok(storefront)
    }

    /// Delete a storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn delete_storefront(&self, id: &StorefrontId) -> Result<(), ClientError> {
        self.delete(&["storefronts", id.as_str()]).await
    }
}
