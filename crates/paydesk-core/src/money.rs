//! Money, currency, and payment provider types.
//!
//! Amounts are always stored as `i64` minor units (cents, kobo, pesewas) to avoid
//! floating point precision issues. All supported currencies have two decimal
//! places.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of minor units per major unit for every supported currency.
const MINOR_PER_MAJOR: i64 = 100;

/// Currencies supported by the payments platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Nigerian naira.
    Ngn,
    /// Ghanaian cedi.
    Ghs,
    /// Kenyan shilling.
    Kes,
    /// South African rand.
    Zar,
}

impl Currency {
    /// ISO-4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Ngn => "NGN",
            Self::Ghs => "GHS",
            Self::Kes => "KES",
            Self::Zar => "ZAR",
        }
    }

    /// The provider that settles this currency unless the merchant chooses otherwise.
    #[must_use]
    pub const fn default_provider(self) -> Provider {
        match self {
            Self::Ngn | Self::Ghs | Self::Kes | Self::Zar => Provider::Paystack,
            Self::Usd | Self::Eur | Self::Gbp => Provider::Stripe,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "NGN" => Ok(Self::Ngn),
            "GHS" => Ok(Self::Ghs),
            "KES" => Ok(Self::Kes),
            "ZAR" => Ok(Self::Zar),
            other => Err(MoneyError::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Payment processor used for a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Stripe (cards, PaymentIntents).
    Stripe,
    /// Paystack (inline checkout, references).
    Paystack,
}

impl Provider {
    /// Wire name of the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paystack => "paystack",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stripe" => Ok(Self::Stripe),
            "paystack" => Ok(Self::Paystack),
            other => Err(MoneyError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// An amount of money in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units.
    pub amount: i64,
    /// Currency of the amount.
    pub currency: Currency,
}

impl Money {
    /// Create an amount from minor units.
    #[must_use]
    pub const fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Parse a decimal major-unit amount such as `"12.5"` or `"1,250.00"`.
    ///
    /// Digits past the second decimal place are rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAmount` for malformed input and
    /// `MoneyError::Negative` for negative amounts.
    pub fn parse_major(input: &str, currency: Currency) -> Result<Self, MoneyError> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.starts_with('-') {
            return Err(MoneyError::Negative);
        }
        let invalid = || MoneyError::InvalidAmount(input.to_string());

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };
        if (whole.is_empty() && fraction.is_empty())
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = fraction
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let minor = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self::from_minor(minor, currency))
    }

    /// Whole major units (truncated).
    #[must_use]
    pub const fn major(&self) -> i64 {
        self.amount / MINOR_PER_MAJOR
    }

    /// Render as `"NGN 1,250.00"`.
    #[must_use]
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let whole = abs / 100;
        let cents = abs % 100;
        format!(
            "{} {sign}{}.{cents:02}",
            self.currency,
            group_thousands(whole)
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Errors from money and currency parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// The amount string could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Negative amounts are not accepted for charges or prices.
    #[error("amount must not be negative")]
    Negative,

    /// Currency code is not supported by the platform.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Provider name is not recognised.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_major_whole_and_fraction() {
        let m = Money::parse_major("12.5", Currency::Usd).unwrap();
        assert_eq!(m.amount, 1250);
        let m = Money::parse_major("1,250.00", Currency::Ngn).unwrap();
        assert_eq!(m.amount, 125_000);
        let m = Money::parse_major(".75", Currency::Eur).unwrap();
        assert_eq!(m.amount, 75);
    }

    #[test]
    fn parse_major_rounds_half_up() {
        assert_eq!(Money::parse_major("0.005", Currency::Usd).unwrap().amount, 1);
        assert_eq!(Money::parse_major("0.004", Currency::Usd).unwrap().amount, 0);
        assert_eq!(Money::parse_major("9.999", Currency::Usd).unwrap().amount, 1000);
    }

    #[test]
    fn parse_major_rejects_garbage() {
        assert!(matches!(
            Money::parse_major("12a", Currency::Usd),
            Err(MoneyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Money::parse_major(".", Currency::Usd),
            Err(MoneyError::InvalidAmount(_))
        ));
        assert_eq!(
            Money::parse_major("-3", Currency::Usd),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::from_minor(125_000, Currency::Ngn).display(), "NGN 1,250.00");
        assert_eq!(Money::from_minor(5, Currency::Usd).display(), "USD 0.05");
        assert_eq!(
            Money::from_minor(123_456_789, Currency::Kes).display(),
            "KES 1,234,567.89"
        );
        assert_eq!(Money::from_minor(-250, Currency::Gbp).display(), "GBP -2.50");
    }

    #[test]
    fn default_provider_by_currency() {
        assert_eq!(Currency::Ngn.default_provider(), Provider::Paystack);
        assert_eq!(Currency::Usd.default_provider(), Provider::Stripe);
    }

    #[test]
    fn currency_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Currency::Ghs).unwrap(), "\"GHS\"");
        let c: Currency = serde_json::from_str("\"ZAR\"").unwrap();
        assert_eq!(c, Currency::Zar);
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    }
}
