//! Paydesk Client SDK.
//!
//! This crate provides the dashboard's view of the payments platform: typed
//! wrappers for every REST resource, a catalog cache that survives outages, and
//! the Stripe and Paystack checkout flows.
//!
//! # Example
//!
//! ```no_run
//! use paydesk_client::{ClientOptions, PaydeskClient};
//! use paydesk_core::TransactionFilter;
//!
//! # async fn example() -> Result<(), paydesk_client::ClientError> {
//! let client = PaydeskClient::with_options(
//!     "http://localhost:4000/api",
//!     ClientOptions::with_token("merchant-token"),
//! )?;
//!
//! for balance in client.balances().await? {
//!     println!("available {}", balance.available);
//! }
//!
//! let page = client.list_transactions(&TransactionFilter::default()).await?;
//! println!("{} of {} transactions", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod api;
mod cache;
pub mod checkout;
mod client;
mod error;

pub use cache::{CachedCatalog, Loaded};
pub use checkout::{
    CardConfirmation, CardConfirmer, CheckoutError, CheckoutOutcome, CheckoutRequest,
    FailureKind, InlineCheckout, InlineResult, InlineSession, PaystackCheckout, StripeCheckout,
    VerifiedPayment,
};
pub use client::{extract_error_message, ClientOptions, PaydeskClient};
pub use error::ClientError;
