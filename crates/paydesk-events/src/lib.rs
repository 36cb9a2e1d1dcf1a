//! Payment event notification for paydesk.
//!
//! A completed checkout calls [`PaymentNotifier::notify`]. Views in the same
//! process hear about it through [`PaymentNotifier::subscribe`] (synchronous
//! callbacks) or [`PaymentNotifier::listen`] (a broadcast receiver). Views in
//! other processes share the record through a [`paydesk_store::FileStore`] and
//! run [`spawn_poller`], which treats records younger than
//! [`paydesk_core::FRESHNESS_WINDOW_MS`] as fresh and removes every record it
//! sees.
//!
//! Delivery is at-least-once and possibly multiple: two pollers may both observe
//! the same record before either removes it.
//!
//! # Example
//!
//! ```no_run
//! use paydesk_events::{spawn_poller, PaymentNotifier, DEFAULT_POLL_INTERVAL};
//!
//! # async fn example() {
//! let notifier = PaymentNotifier::in_memory();
//!
//! let _sub = notifier.subscribe(|event| println!("paid at {}", event.timestamp));
//! let _poller = spawn_poller(notifier.clone(), DEFAULT_POLL_INTERVAL, |_| {
//!     println!("refresh balances");
//! });
//!
//! notifier.notify();
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod notifier;
pub mod poller;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notifier::{Callback, PaymentNotifier, PollOutcome, Subscription};
pub use poller::{spawn_poller, PollerHandle, DEFAULT_POLL_INTERVAL, MAX_POLL_INTERVAL};
