//! Resource endpoints of the payments platform.
//!
//! Each submodule adds an `impl PaydeskClient` block for one resource.

mod balances;
mod business;
mod customers;
mod payment_links;
mod products;
mod storefronts;
mod transactions;
