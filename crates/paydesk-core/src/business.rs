//! Business (merchant) registration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Currency;
use crate::BusinessId;

/// Request body for registering a business with the payments platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRegistration {
    /// Trading name.
    pub name: String,
    /// Contact email for the merchant account.
    pub email: String,
    /// ISO-3166 alpha-2 country code.
    pub country: String,
    /// Settlement currency.
    pub currency: Currency,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Public website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A registered business.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Platform identifier.
    pub id: BusinessId,
    /// Trading name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Country code.
    pub country: String,
    /// Settlement currency.
    pub currency: Currency,
    /// Visible prefix of the issued API key (the secret itself is never returned).
    #[serde(default)]
    pub api_key_prefix: Option<String>,
    /// When the business was registered.
    pub created_at: DateTime<Utc>,
}

/// Response to a successful registration: the business plus a session token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// The registered business.
    pub business: Business,
    /// Bearer token for subsequent requests.
    pub token: String,
}
