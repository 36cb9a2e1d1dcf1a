use paydesk_core::{NewProduct, Product, ProductId, ProductUpdate};

use crate::client::PaydeskClient;
use crate::error::ClientError;

impl PaydeskClient {
    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get(&["products"]).await
    }

    /// Get one product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the product does not exist.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        self.get(&["products", id.as_str()]).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` for a blank name or non-positive price.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        if product.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("product name is required".into()));
        }
        if product.price.amount <= 0 {
            return Err(ClientError::InvalidInput("product price must be positive".into()));
        }
        self.post(&["products"], product).await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ClientError> {
        if update.price.is_some_and(|p| p.amount <= 0) {
            return Err(ClientError::InvalidInput("product price must be positive".into()));
        }
        self.put(&["products", id.as_str()], update).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        self.delete(&["products", id.as_str()]).await
    }
}
