//! Checkout orchestration for Stripe and Paystack.
//!
//! The vendor widgets are reached through async traits ([`CardConfirmer`],
//! [`InlineCheckout`]); the platform is reached through [`PaydeskClient`]. A
//! checkout only ends in [`CheckoutOutcome::Success`] after the platform has
//! verified the payment with the provider, and [`VerifiedPayment`] cannot be
//! built anywhere else.

mod paystack;
mod stripe;
mod wire;

pub use paystack::{InlineCheckout, InlineResult, InlineSession, PaystackCheckout};
pub use stripe::{CardConfirmation, CardConfirmer, StripeCheckout};

use chrono::{DateTime, Utc};
use std::fmt;

use paydesk_core::{Field, Money, PayerDetails, Provider, TransactionId, ValidationError};
use paydesk_events::PaymentNotifier;

use crate::client::PaydeskClient;
use crate::error::ClientError;
use wire::{AnalyticsEvent, VerificationResponse};

/// What the payer is being charged for.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    /// Amount to charge.
    pub amount: Money,
    /// Payer identity and contact details.
    pub payer: PayerDetails,
    /// Statement or receipt description.
    pub description: Option<String>,
    /// Merchant metadata forwarded to the provider (cart ID, product IDs, ...).
    pub metadata: serde_json::Value,
}

impl CheckoutRequest {
    /// Charge `amount` to `payer`.
    #[must_use]
    pub fn new(amount: Money, payer: PayerDetails) -> Self {
        Self {
            amount,
            payer,
            description: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the metadata object.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    fn validate(&self, require_address: bool) -> Result<(), ValidationError> {
        if self.amount.amount <= 0 {
            return Err(ValidationError::new(
                Field::Amount,
                "amount must be greater than zero",
            ));
        }
        self.payer.validate(require_address)
    }
}

/// Proof that the platform confirmed a payment with its provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    provider: Provider,
    reference: String,
    amount: Money,
    transaction_id: Option<TransactionId>,
    verified_at: DateTime<Utc>,
}

impl VerifiedPayment {
    /// Provider that processed the payment.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// PaymentIntent ID or Paystack reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Amount confirmed.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Platform transaction record, when the verification returned one.
    #[must_use]
    pub const fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// When verification completed.
    #[must_use]
    pub const fn verified_at(&self) -> DateTime<Utc> {
        self.verified_at
    }
}

/// How a checkout ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment verified server-side.
    Success(VerifiedPayment),
    /// The provider rejected the payment.
    Declined {
        /// Provider's reason.
        reason: String,
    },
    /// The payer closed the widget before paying.
    Cancelled,
    /// The platform could not confirm the payment.
    VerificationFailed {
        /// Why verification failed.
        reason: String,
    },
}

impl CheckoutOutcome {
    /// Whether the payment was verified.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Failure category, if the outcome is a failure. Cancellation is not one.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Declined { .. } => Some(FailureKind::PaymentDeclined),
            Self::VerificationFailed { .. } => Some(FailureKind::VerificationFailed),
            Self::Success(_) | Self::Cancelled => None,
        }
    }

    /// Message to show the payer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Success(payment) => format!("Payment of {} confirmed.", payment.amount()),
            Self::Declined { reason } => {
                format!("Your payment was declined: {reason}. Please try another card.")
            }
            Self::Cancelled => "Payment cancelled.".to_string(),
            Self::VerificationFailed { .. } => {
                FailureKind::VerificationFailed.default_message().to_string()
            }
        }
    }
}

/// Error taxonomy surfaced to the payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Missing or invalid input, caught before any network call.
    ValidationError,
    /// The provider rejected the payment.
    PaymentDeclined,
    /// The platform could not confirm the payment.
    VerificationFailed,
    /// No response could be obtained.
    NetworkError,
    /// The platform answered with an error.
    ServiceError,
}

impl FailureKind {
    /// Stable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::PaymentDeclined => "payment_declined",
            Self::VerificationFailed => "verification_failed",
            Self::NetworkError => "network_error",
            Self::ServiceError => "service_error",
        }
    }

    /// Generic message for the category.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ValidationError => "Please check the highlighted field.",
            Self::PaymentDeclined => "Your payment was declined. Please try another card.",
            Self::VerificationFailed => {
                "We could not confirm your payment. Any charge will be reconciled shortly."
            }
            Self::NetworkError => "Network error. Please check your connection and try again.",
            Self::ServiceError => "Something went wrong processing your payment. Please try again.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A checkout that could not run to an outcome.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Input failed validation; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The platform was unreachable.
    #[error("network error: {0}")]
    Network(String),

    /// The platform rejected a request.
    #[error("service error: {message}")]
    Service {
        /// HTTP status, if a response arrived.
        status: Option<u16>,
        /// Message extracted from the response.
        message: String,
    },
}

impl CheckoutError {
    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::ValidationError,
            Self::Network(_) => FailureKind::NetworkError,
            Self::Service { .. } => FailureKind::ServiceError,
        }
    }

    /// Message to show the payer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.message.clone(),
            Self::Network(_) | Self::Service { .. } => self.kind().default_message().to_string(),
        }
    }
}

impl From<ClientError> for CheckoutError {
    fn from(e: ClientError) -> Self {
        if e.is_network() {
            return Self::Network(e.to_string());
        }
        let status = e.status();
        let message = match e {
            ClientError::Unauthorized { message }
            | ClientError::NotFound { message }
            | ClientError::Api { message, .. }
            | ClientError::InvalidInput(message)
            | ClientError::Configuration(message) => message,
            other => other.to_string(),
        };
        Self::Service { status, message }
    }
}

/// Platform access and notification shared by both providers.
#[derive(Debug, Clone)]
struct CheckoutContext {
    client: PaydeskClient,
    notifier: Option<PaymentNotifier>,
}

impl CheckoutContext {
    /// Record a checkout stage without waiting; failures are only logged.
    fn track(
        &self,
        provider: Provider,
        stage: &'static str,
        reference: Option<&str>,
        request: &CheckoutRequest,
    ) {
        let client = self.client.clone();
        let event = AnalyticsEvent {
            provider,
            stage,
            reference: reference.map(str::to_string),
            amount: request.amount.amount,
            currency: request.amount.currency,
        };
        tokio::spawn(async move {
            if let Err(e) = client.post_discard(&["analytics", "checkout"], &event).await {
                tracing::debug!(error = %e, stage = event.stage, "Checkout analytics dropped");
            }
        });
    }

    /// Turn the verification call into an outcome and announce successes.
    fn finish(
        &self,
        provider: Provider,
        reference: &str,
        request: &CheckoutRequest,
        verification: Result<VerificationResponse, ClientError>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let outcome = match verification {
            Ok(response) => evaluate_verification(provider, reference, request, response),
            Err(e) if e.is_network() => {
                tracing::error!(%provider, reference, error = %e, "Verification unreachable");
                self.track(provider, "verification_unreachable", Some(reference), request);
                return Err(CheckoutError::Network(e.to_string()));
            }
            Err(e) => CheckoutOutcome::VerificationFailed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            CheckoutOutcome::Success(payment) => {
                tracing::info!(
                    %provider,
                    reference,
                    amount = payment.amount().amount,
                    currency = %payment.amount().currency,
                    "Payment verified"
                );
                if let Some(notifier) = &self.notifier {
                    notifier.notify();
                }
                self.track(provider, "succeeded", Some(reference), request);
            }
            other => {
                tracing::warn!(%provider, reference, outcome = ?other, "Payment not verified");
                self.track(provider, "verification_failed", Some(reference), request);
            }
        }

        Ok(outcome)
    }
}

/// Check a verification response against what was requested.
fn evaluate_verification(
    provider: Provider,
    reference: &str,
    request: &CheckoutRequest,
    response: VerificationResponse,
) -> CheckoutOutcome {
    if !response.reports_success() {
        return CheckoutOutcome::VerificationFailed {
            reason: response
                .message
                .unwrap_or_else(|| format!("provider status {}", response.status)),
        };
    }
    if response.reference.as_deref().is_some_and(|r| r != reference) {
        return CheckoutOutcome::VerificationFailed {
            reason: "verified reference does not match this checkout".into(),
        };
    }
    if response.amount.is_some_and(|a| a != request.amount.amount)
        || response.currency.is_some_and(|c| c != request.amount.currency)
    {
        return CheckoutOutcome::VerificationFailed {
            reason: "verified amount does not match this checkout".into(),
        };
    }

    CheckoutOutcome::Success(VerifiedPayment {
        provider,
        reference: reference.to_string(),
        amount: request.amount,
        transaction_id: response.transaction_id,
        verified_at: Utc::now(),
    })
}
