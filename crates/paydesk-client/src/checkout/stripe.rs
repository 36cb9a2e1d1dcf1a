//! Card checkout through Stripe.

use async_trait::async_trait;

use paydesk_core::{PayerDetails, Provider};
use paydesk_events::PaymentNotifier;

use super::wire::{CreateIntentRequest, ReportedStatus, StatusReport, StripeIntent};
use super::{CheckoutContext, CheckoutError, CheckoutOutcome, CheckoutRequest};
use crate::client::PaydeskClient;

/// Result of confirming a card payment in the vendor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardConfirmation {
    /// The card was charged.
    Succeeded,
    /// The card needs an extra step (3-D Secure) that was not completed.
    RequiresAction,
    /// The issuer declined the card.
    Declined {
        /// Decline reason shown by the vendor.
        reason: String,
    },
    /// The widget failed.
    Error {
        /// Vendor error message.
        message: String,
    },
}

/// The card element: confirms a PaymentIntent with the entered card.
#[async_trait]
pub trait CardConfirmer: Send + Sync {
    /// Confirm the intent identified by `client_secret` using `billing` as the
    /// billing details.
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        billing: &PayerDetails,
    ) -> CardConfirmation;
}

/// Stripe checkout flow.
#[derive(Debug, Clone)]
pub struct StripeCheckout<C> {
    context: CheckoutContext,
    confirmer: C,
}

impl<C: CardConfirmer> StripeCheckout<C> {
    /// Create a flow that charges through `confirmer`.
    #[must_use]
    pub fn new(client: PaydeskClient, confirmer: C) -> Self {
        Self {
            context: CheckoutContext {
                client,
                notifier: None,
            },
            confirmer,
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
    /// Success is only returned once `GET /payments/stripe/verify/{id}` confirms
    /// the intent; the notifier fires after that.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` before any request for bad payer
    /// details, `CheckoutError::Network` when the platform is unreachable, and
    /// `CheckoutError::Service` when it refuses to create the intent.
    pub async fn pay(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        request.validate(true)?;
        let client = &self.context.client;

        self.context.track(Provider::Stripe, "started", None, request);

        let body = CreateIntentRequest {
            amount: request.amount.amount,
            currency: request.amount.currency,
            email: request.payer.email.trim(),
            name: request.payer.name.trim(),
            description: request.description.as_deref(),
            metadata: &request.metadata,
            idempotency_key: uuid::Uuid::new_v4().to_string(),
        };
        let intent: StripeIntent = client
            .post(&["payments", "stripe", "intents"], &body)
            .await?;
        tracing::debug!(intent_id = %intent.id, "PaymentIntent created");

        let confirmation = self
            .confirmer
            .confirm_card_payment(&intent.client_secret, &request.payer)
            .await;

        let (reported, message) = match &confirmation {
            CardConfirmation::Succeeded => (ReportedStatus::Succeeded, None),
            CardConfirmation::RequiresAction => {
                (ReportedStatus::Declined, Some("authentication required"))
            }
            CardConfirmation::Declined { reason } => {
                (ReportedStatus::Declined, Some(reason.as_str()))
            }
            CardConfirmation::Error { message } => (ReportedStatus::Error, Some(message.as_str())),
        };
        let report = StatusReport {
            payment_intent_id: &intent.id,
            status: reported,
            message,
        };
        if let Err(e) = client
            .post_discard(&["payments", "stripe", "status"], &report)
            .await
        {
            tracing::warn!(intent_id = %intent.id, error = %e, "Failed to report payment status");
        }

        let declined = match confirmation {
            CardConfirmation::Succeeded => None,
            CardConfirmation::RequiresAction => {
                Some("Card authentication was not completed".to_string())
            }
            CardConfirmation::Declined { reason } => Some(reason),
            CardConfirmation::Error { message } => Some(message),
        };
        if let Some(reason) = declined {
            return Ok(self.declined(&intent.id, request, reason));
        }

        let verification = client
            .get(&["payments", "stripe", "verify", intent.id.as_str()])
            .await;
        self.context
            .finish(Provider::Stripe, &intent.id, request, verification)
    }

    fn declined(
        &self,
        intent_id: &str,
        request: &CheckoutRequest,
        reason: String,
    ) -> CheckoutOutcome {
        tracing::info!(intent_id, reason = %reason, "Card payment declined");
        self.context
            .track(Provider::Stripe, "declined", Some(intent_id), request);
        CheckoutOutcome::Declined { reason }
    }
}
