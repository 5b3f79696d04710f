use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Fraction digits every computed amount is rounded to.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a decimal to [`MONEY_SCALE`] digits, midpoint away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Signed monetary amount backed by an exact decimal.
///
/// Use this type for line item values, calculated claim amounts, bill totals and balances.
/// Values coming from the remote service are already scaled to 2 digits; values computed
/// locally go through [`Money::rounded`] at every boundary.
///
/// The value is signed so net balances can be expressed:
/// - positive = the group owes this person
/// - negative = this person owes the group
///
/// # Examples
///
/// ```rust
/// use engine::Money;
/// use rust_decimal::Decimal;
///
/// let amount = Money::rounded(Decimal::new(66_666, 4));
/// assert_eq!(amount.to_string(), "6.67");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().to_string(), "10.00");
/// assert_eq!("10,5".parse::<Money>().unwrap().to_string(), "10.50");
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal as-is. Use for values that are already scaled upstream.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Wraps a decimal after rounding it to 2 fractional digits.
    #[must_use]
    pub fn rounded(amount: Decimal) -> Self {
        Self(round_money(amount))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns a copy rounded to 2 fractional digits.
    #[must_use]
    pub fn round(self) -> Self {
        Self::rounded(self.0)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round_money(self.0);
        f.pad(&format!("{rounded:.2}"))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into an amount.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, Some(MONEY_SCALE)).map(Money)
    }
}

/// Parses user input into a decimal, optionally capping the fraction digits.
///
/// Shared by [`Money`] and by split values entered on the command line, where share counts
/// may carry more precision than money.
pub fn parse_decimal(s: &str, max_scale: Option<u32>) -> Result<Decimal, EngineError> {
    let empty = || EngineError::InvalidAmount("empty amount".to_string());
    let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(empty());
    }

    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped.trim())
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped.trim())
    } else {
        (false, trimmed)
    };
    if rest.is_empty() {
        return Err(empty());
    }

    let rest = rest.replace(',', ".");
    let mut parts = rest.split('.');
    let units = parts.next().ok_or_else(invalid)?;
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if let Some(frac) = fraction {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if let Some(max) = max_scale
            && frac.len() > max as usize
        {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }
    }

    let normalized = match fraction {
        Some(frac) if !frac.is_empty() => format!("{units}.{frac}"),
        _ => units.to_string(),
    };
    let value = Decimal::from_str(&normalized)
        .map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))?;

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_always_has_two_digits() {
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!(Money::new(dec!(0.1)).to_string(), "0.10");
        assert_eq!(Money::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Money::new(dec!(-10.5)).to_string(), "-10.50");
        assert_eq!(Money::new(dec!(35)).to_string(), "35.00");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(Money::rounded(dec!(0.125)).amount(), dec!(0.13));
        assert_eq!(Money::rounded(dec!(0.124)).amount(), dec!(0.12));
        assert_eq!(Money::rounded(dec!(-0.125)).amount(), dec!(-0.13));
        assert_eq!(Money::rounded(dec!(3.3333333)).amount(), dec!(3.33));
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().amount(), dec!(10));
        assert_eq!("10.5".parse::<Money>().unwrap().amount(), dec!(10.5));
        assert_eq!("10,50".parse::<Money>().unwrap().amount(), dec!(10.50));
        assert_eq!("-0.01".parse::<Money>().unwrap().amount(), dec!(-0.01));
        assert_eq!("+1.00".parse::<Money>().unwrap().amount(), dec!(1));
        assert_eq!("  2.30 ".parse::<Money>().unwrap().amount(), dec!(2.3));
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("0.001".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn parse_decimal_without_cap_keeps_precision() {
        assert_eq!(parse_decimal("1.125", None).unwrap(), dec!(1.125));
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_string: Money = serde_json::from_str("\"30.00\"").unwrap();
        let from_number: Money = serde_json::from_str("30.0").unwrap();
        assert_eq!(from_string, from_number);
    }
}
