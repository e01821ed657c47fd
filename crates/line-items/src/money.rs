//! Money Values
//!
//! Fixed-point decimal amounts shown with two decimal places.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of decimal places used for display and rounding
pub const DISPLAY_SCALE: i64 = 2;

/// A decimal amount (price, quantity, balance or total)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(BigDecimal);

impl Money {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// Parse user or server text; empty and non-numeric input become zero
    pub fn parse_or_zero(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::zero();
        }
        BigDecimal::from_str(trimmed)
            .map(Self)
            .unwrap_or_else(|_| Self::zero())
    }

    /// Round half-up to two decimal places
    pub fn round2(&self) -> Self {
        Self(self.0.with_scale_round(DISPLAY_SCALE, RoundingMode::HalfUp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Two-decimal text with trailing zeros and dot removed ("100.00" -> "100")
    pub fn to_trimmed_string(&self) -> String {
        let fixed = self.to_string();
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl From<BigDecimal> for Money {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl<'a> Mul<&'a Money> for &'a Money {
    type Output = Money;

    fn mul(self, rhs: &'a Money) -> Money {
        Money(&self.0 * &rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m.clone())
    }
}

/// Always renders exactly two decimals, e.g. "3.50", "0.00", "-1.25"
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.with_scale_round(DISPLAY_SCALE, RoundingMode::HalfUp);
        let (cents, _) = rounded.as_bigint_and_exponent();
        let digits = cents.to_string();
        let (sign, digits) = match digits.strip_prefix('-') {
            Some(rest) => ("-", rest.to_string()),
            None => ("", digits),
        };
        let padded = format!("{:0>3}", digits);
        let (whole, frac) = padded.split_at(padded.len() - 2);
        let sign = if whole.chars().chain(frac.chars()).all(|c| c == '0') { "" } else { sign };
        write!(f, "{}{}.{}", sign, whole, frac)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

/// Accepts a JSON number, a numeric string or null (zero)
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Money::zero(),
            Some(NumberOrString::Number(n)) => Money::parse_or_zero(&n.to_string()),
            Some(NumberOrString::Text(s)) => Money::parse_or_zero(&s),
        })
    }
}
