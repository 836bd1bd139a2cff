//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront
//! prices everything in US dollars. Decimal input is only accepted at the
//! catalog boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CENTS_PER_DOLLAR: i64 = 100;

/// A US dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a floating-point dollar amount, rounding
    /// to the nearest cent.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * CENTS_PER_DOLLAR as f64).round() as i64)
    }

    /// Parse a decimal string such as `"19.99"` exactly.
    ///
    /// Returns `None` for anything that is not a decimal number or that
    /// carries a fraction of a cent.
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let amount = Decimal::from_str(text.trim()).ok()?.normalize();
        if amount.scale() > 2 {
            return None;
        }
        let cents = amount.checked_mul(Decimal::from(CENTS_PER_DOLLAR))?;
        Some(Self::new(cents.to_i64()?))
    }

    /// Zero dollars.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a dollar value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_DOLLAR as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("${}", self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    ///
    /// Always renders exactly two decimal places.
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = CENTS_PER_DOLLAR.unsigned_abs();
        format!("{sign}{}.{:02}", abs / per, abs % per)
    }

    /// Multiply by a scalar, clamping at the `i64` bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Sum values, clamping at the `i64` bounds.
    pub fn saturating_sum(iter: impl IntoIterator<Item = Money>) -> Money {
        let cents = iter
            .into_iter()
            .fold(0_i64, |acc, m| acc.saturating_add(m.amount_cents));
        Money::new(cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter storing a [`Money`] as a plain decimal JSON number.
///
/// Deserialization accepts a number or a numeric string and rejects
/// negative amounts, so persisted state and catalog records share one shape:
/// `"price": 19.99`.
pub mod decimal {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let money = match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) if n.is_finite() => Money::from_decimal(n),
            RawPrice::Number(n) => {
                return Err(D::Error::custom(format!("invalid price: {n}")));
            }
            RawPrice::Text(s) => Money::parse_decimal(&s)
                .ok_or_else(|| D::Error::custom(format!("invalid price: {s:?}")))?,
        };
        if money.is_negative() {
            return Err(D::Error::custom("price must not be negative"));
        }
        Ok(money)
    }
}
