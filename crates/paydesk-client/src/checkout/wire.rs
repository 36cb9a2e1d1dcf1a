//! Request and response bodies of the platform's payment endpoints.

use serde::{Deserialize, Serialize};

use paydesk_core::{Currency, Provider, TransactionId};

/// `POST /payments/stripe/intents`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateIntentRequest<'a> {
    pub amount: i64,
    pub currency: Currency,
    pub email: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub metadata: &'a serde_json::Value,
    pub idempotency_key: String,
}

/// A PaymentIntent created by the platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StripeIntent {
    pub id: String,
    pub client_secret: String,
}

/// Status reported back after the card confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReportedStatus {
    Succeeded,
    Declined,
    Error,
}

/// `POST /payments/stripe/status`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusReport<'a> {
    pub payment_intent_id: &'a str,
    pub status: ReportedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

/// `POST /payments/paystack/initialize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitializeRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    pub amount: i64,
    pub currency: Currency,
    pub metadata: &'a serde_json::Value,
}

/// A Paystack transaction initialized by the platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaystackInit {
    pub reference: String,
    pub access_code: String,
    #[serde(default)]
    pub authorization_url: Option<String>,
}

/// Server-side verification result for either provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerificationResponse {
    /// Provider status as the platform saw it (`succeeded`, `success`, `failed`, ...).
    pub status: String,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub reference: Option<String>,
    /// Minor units.
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub transaction_id: Option<TransactionId>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VerificationResponse {
    pub fn reports_success(&self) -> bool {
        self.verified != Some(false)
            && matches!(
                self.status.to_ascii_lowercase().as_str(),
                "succeeded" | "success"
            )
    }
}

/// `POST /analytics/checkout`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyticsEvent {
    pub provider: Provider,
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub amount: i64,
    pub currency: Currency,
}
