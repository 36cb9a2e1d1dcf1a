//! Payer details collected by the checkout form.

use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

/// Shortest phone number accepted, in digits.
const MIN_PHONE_DIGITS: usize = 7;

/// Longest phone number accepted (E.164 limit), in digits.
const MAX_PHONE_DIGITS: usize = 15;

/// Identity and contact details of the person paying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerDetails {
    /// Full name.
    pub name: String,
    /// Email address; receipts go here.
    pub email: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PayerDetails {
    /// Create details with the two always-required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            address: None,
        }
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the billing address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Validate the details, reporting the first failing field.
    ///
    /// `require_address` is set by flows that pass billing details to the card
    /// network.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the field and a user-facing message.
    pub fn validate(&self, require_address: bool) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::required(Field::Name));
        }

        if self.email.trim().is_empty() {
            return Err(ValidationError::required(Field::Email));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::new(
                Field::Email,
                "please enter a valid email address",
            ));
        }

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if !is_valid_phone(phone) {
                return Err(ValidationError::new(
                    Field::Phone,
                    "please enter a valid phone number",
                ));
            }
        }

        let has_address = self
            .address
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty());
        if require_address && !has_address {
            return Err(ValidationError::required(Field::Address));
        }

        Ok(())
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

/// Accepts 7 to 15 digits once spaces, dashes, parentheses and one leading `+` are removed.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return false,
        }
    }
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}
