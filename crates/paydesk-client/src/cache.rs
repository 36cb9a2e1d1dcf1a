//! Catalog loads with a last-known-good fallback.
//!
//! Successful product and customer loads are written to the record store. When
//! the platform is unreachable the stored copy is served instead and the
//! fallback is logged, so stale data is never mistaken for a live load.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use paydesk_core::{Customer, Product};
use paydesk_store::{keys, RecordStore, RecordStoreExt};

use crate::client::PaydeskClient;
use crate::error::ClientError;

/// A list loaded either live or from the fallback cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    /// Fetched from the platform just now.
    Fresh(T),
    /// Served from the cache because the platform was unreachable.
    Cached(T),
}

impl<T> Loaded<T> {
    /// The loaded value regardless of origin.
    pub fn into_inner(self) -> T {
        match self {
            Self::Fresh(value) | Self::Cached(value) => value,
        }
    }

    /// Borrow the loaded value.
    pub const fn get(&self) -> &T {
        match self {
            Self::Fresh(value) | Self::Cached(value) => value,
        }
    }

    /// Whether the value came from the cache.
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// Client wrapper that caches catalog lists.
#[derive(Clone)]
pub struct CachedCatalog {
    client: PaydeskClient,
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for CachedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCatalog")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl CachedCatalog {
    /// Wrap `client`, caching into `store`.
    #[must_use]
    pub fn new(client: PaydeskClient, store: Arc<dyn RecordStore>) -> Self {
        Self { client, store }
    }

    /// The wrapped client.
    #[must_use]
    pub fn client(&self) -> &PaydeskClient {
        &self.client
    }

    /// Products, live when reachable, cached otherwise.
    ///
    /// # Errors
    ///
    /// Returns the request error when the platform answered with an error, or was
    /// unreachable and nothing is cached.
    pub async fn products(&self) -> Result<Loaded<Vec<Product>>, ClientError> {
        self.load(keys::CACHED_PRODUCTS, self.client.list_products())
            .await
    }

    /// Customers, live when reachable, cached otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Self::products`].
    pub async fn customers(&self) -> Result<Loaded<Vec<Customer>>, ClientError> {
        self.load(keys::CACHED_CUSTOMERS, self.client.list_customers())
            .await
    }

    async fn load<T, F>(&self, key: &str, fetch: F) -> Result<Loaded<T>, ClientError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T, ClientError>>,
    {
        match fetch.await {
            Ok(value) => {
                if let Err(e) = self.store.put_cbor(key, &value) {
                    tracing::warn!(key, error = %e, "Failed to update catalog cache");
                }
                Ok(Loaded::Fresh(value))
            }
            Err(e) if e.is_network() => match self.store.get_cbor::<T>(key) {
                Ok(Some(cached)) => {
                    tracing::warn!(key, error = %e, "Platform unreachable, serving cached data");
                    Ok(Loaded::Cached(cached))
                }
                Ok(None) => Err(e),
                Err(cache_err) => {
                    tracing::warn!(key, error = %cache_err, "Ignoring unreadable catalog cache");
                    Err(e)
                }
            },
            Err(e) => Err(e),
        }
    }
}
