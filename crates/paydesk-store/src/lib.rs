//! Persisted record storage for paydesk.
//!
//! This crate provides the small key/value store the dashboard uses the way a
//! browser uses local storage: the payment event record and the fallback
//! catalog caches live here.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local, clones share state
//! - [`FileStore`]: one file per key, shared across processes
//!
//! # Example
//!
//! ```no_run
//! use paydesk_store::{keys, FileStore, RecordStore, RecordStoreExt};
//!
//! let store = FileStore::open(".paydesk").unwrap();
//! store.put_json(keys::PAYMENT_EVENT, &serde_json::json!({"timestamp": 0})).unwrap();
//! assert!(store.get(keys::PAYMENT_EVENT).unwrap().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The storage trait defining raw record operations.
///
/// There is no compare-and-swap: a read followed by a remove can interleave
/// with another reader doing the same.
pub trait RecordStore: Send + Sync {
    /// Read the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete the record under `key`. Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<bool>;
}

/// Typed helpers over any [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    /// Read and decode a JSON record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the record is not valid JSON for `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)?
            .map(|bytes| {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            })
            .transpose()
    }

    /// Encode and store a JSON record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(key, &bytes)
    }

    /// Read and decode a CBOR record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the record is not valid CBOR for `T`.
    fn get_cbor<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)?
            .map(|bytes| {
                ciborium::from_reader(bytes.as_slice())
                    .map_err(|e| StoreError::Serialization(e.to_string()))
            })
            .transpose()
    }

    /// Encode and store a CBOR record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    fn put_cbor<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(key, &buf)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
