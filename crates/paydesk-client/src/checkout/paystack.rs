//! Checkout through the Paystack inline popup.

use async_trait::async_trait;

use paydesk_core::Provider;
use paydesk_events::PaymentNotifier;

use super::wire::{InitializeRequest, PaystackInit};
use super::{CheckoutContext, CheckoutError, CheckoutOutcome, CheckoutRequest};
use crate::client::PaydeskClient;

/// What the inline popup needs to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSession {
    /// Transaction reference issued at initialization.
    pub reference: String,
    /// Paystack access code.
    pub access_code: String,
    /// Hosted page fallback.
    pub authorization_url: Option<String>,
    /// Payer email.
    pub email: String,
    /// Amount in minor units.
    pub amount: i64,
}

/// How the popup closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineResult {
    /// Paystack reported the transaction complete.
    Callback {
        /// Reference returned by the callback.
        reference: String,
    },
    /// The payer closed the popup.
    Closed,
}

/// The inline popup.
#[async_trait]
pub trait InlineCheckout: Send + Sync {
    /// Open the popup and wait until it calls back or is closed.
    async fn open(&self, session: &InlineSession) -> InlineResult;
}

/// Paystack checkout flow.
#[derive(Debug, Clone)]
pub struct PaystackCheckout<W> {
    context: CheckoutContext,
    widget: W,
}

impl<W: InlineCheckout> PaystackCheckout<W> {
    /// Create a flow that opens `widget`.
    #[must_use]
    pub fn new(client: PaydeskClient, widget: W) -> Self {
        Self {
            context: CheckoutContext {
                client,
                notifier: None,
            },
            widget,
        }
    }

    /// Announce verified payments on `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: PaymentNotifier) -> Self {
        self.context.notifier = Some(notifier);
        self
    }

    /// Run the checkout.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` before any request for bad payer
    /// details, `CheckoutError::Network` when the platform is unreachable, and
    /// `CheckoutError::Service` when initialization is refused.
    pub async fn pay(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        request.validate(false)?;
        let client = &self.context.client;

        self.context.track(Provider::Paystack, "started", None, request);

        let body = InitializeRequest {
            email: request.payer.email.trim(),
            name: request.payer.name.trim(),
            phone: request.payer.phone.as_deref().map(str::trim),
            amount: request.amount.amount,
            currency: request.amount.currency,
            metadata: &request.metadata,
        };
        let init: PaystackInit = client
            .post(&["payments", "paystack", "initialize"], &body)
            .await?;
        tracing::debug!(reference = %init.reference, "Paystack transaction initialized");

        let session = InlineSession {
            reference: init.reference,
            access_code: init.access_code,
            authorization_url: init.authorization_url,
            email: request.payer.email.trim().to_string(),
            amount: request.amount.amount,
        };

        let returned = match self.widget.open(&session).await {
            InlineResult::Closed => {
                tracing::info!(reference = %session.reference, "Paystack popup closed");
                self.context.track(
                    Provider::Paystack,
                    "cancelled",
                    Some(session.reference.as_str()),
                    request,
                );
                return Ok(CheckoutOutcome::Cancelled);
            }
            InlineResult::Callback { reference } => reference,
        };

        if returned != session.reference {
            tracing::warn!(
                expected = %session.reference,
                returned = %returned,
                "Paystack callback reference mismatch"
            );
            self.context.track(
                Provider::Paystack,
                "verification_failed",
                Some(session.reference.as_str()),
                request,
            );
            return Ok(CheckoutOutcome::VerificationFailed {
                reason: "callback reference does not match this checkout".into(),
            });
        }

        let verification = client
            .get(&["payments", "paystack", "verify", session.reference.as_str()])
            .await;
        self.context
            .finish(Provider::Paystack, &session.reference, request, verification)
    }
}
