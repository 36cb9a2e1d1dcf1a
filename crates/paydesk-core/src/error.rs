//! Validation error types for paydesk.

use std::fmt;

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Payer or customer name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Postal or billing address.
    Address,
    /// Charge amount.
    Amount,
}

impl Field {
    /// Form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level validation failure, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The offending field.
    pub field: Field,
    /// User-facing message.
    pub message: String,
}

impl ValidationError {
    /// Build an error for `field`.
    #[must_use]
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Error for a missing required field.
    #[must_use]
    pub fn required(field: Field) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}
