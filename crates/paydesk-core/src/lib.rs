//! Core types for paydesk.
//!
//! This crate provides the foundational types shared by the paydesk crates:
//!
//! - **Identifiers**: `BusinessId`, `CustomerId`, `ProductId`, `TransactionId`,
//!   `StorefrontId`, `PaymentLinkId`
//! - **Money**: `Money`, `Currency`, `Provider`
//! - **Resources**: `Business`, `Customer`, `Product`, `Transaction`, `Balance`,
//!   `Payout`, `Storefront`, `PaymentLink`, `Page`
//! - **Checkout input**: `PayerDetails` and its `ValidationError`
//! - **Events**: `PaymentEvent` and the freshness window
//!
//! # Amounts
//!
//! Amounts are stored as `i64` minor units (cents, kobo) alongside their
//! currency. Use [`Money::parse_major`] to read user input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod balance;
pub mod business;
pub mod customer;
pub mod error;
pub mod event;
pub mod ids;
pub mod money;
pub mod page;
pub mod payer;
pub mod payment_link;
pub mod product;
pub mod storefront;
pub mod transaction;

pub use balance::{Balance, Payout, PayoutStatus};
pub use business::{Business, BusinessRegistration, RegistrationResponse};
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use error::{Field, ValidationError};
pub use event::{PaymentEvent, FRESHNESS_WINDOW_MS};
pub use ids::{
    BusinessId, CustomerId, IdError, PaymentLinkId, ProductId, StorefrontId, TransactionId,
};
pub use money::{Currency, Money, MoneyError, Provider};
pub use page::Page;
pub use payer::PayerDetails;
pub use payment_link::{NewPaymentLink, PaymentLink};
pub use product::{NewProduct, Product, ProductUpdate};
pub use storefront::{slugify, NewStorefront, Storefront};
pub use transaction::{Transaction, TransactionFilter, TransactionStatus, DEFAULT_PAGE_SIZE};
