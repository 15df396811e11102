use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (totals, shares,
/// manual pins) so that splitting never drifts away from the total.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; extra
/// decimals are rounded to the cent):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert_eq!("12.345".parse::<MoneyCents>().unwrap().cents(), 1235);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest magnitude accepted from user input (one trillion units).
    pub const MAX_INPUT: MoneyCents = MoneyCents(100_000_000_000_000);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute distance between two amounts.
    #[must_use]
    pub const fn abs_diff(self, other: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.abs_diff(other.0) as i64)
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub fn non_negative(self) -> MoneyCents {
        self.max(MoneyCents::ZERO)
    }

    /// Divides by `parts`, rounding half away from zero to the cent.
    #[must_use]
    pub fn div_round(self, parts: usize) -> Option<MoneyCents> {
        let parts = i64::try_from(parts).ok().filter(|p| *p > 0)?;
        let doubled = self.0.checked_mul(2)?;
        let rounded = if doubled >= 0 {
            (doubled + parts) / (2 * parts)
        } else {
            (doubled - parts) / (2 * parts)
        };
        Some(MoneyCents(rounded))
    }

    /// Converts a major-unit decimal (e.g. `10.5`) into cents, rounding to
    /// the nearest cent.
    pub fn from_major(value: f64) -> Result<MoneyCents, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("amount is not a number".to_string()));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(MoneyCents(cents as i64))
    }

    /// Parses user input for a pinned share.
    ///
    /// Anything that is not a non-negative amount is coerced to zero.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> MoneyCents {
        raw.parse::<MoneyCents>()
            .map(MoneyCents::non_negative)
            .unwrap_or(MoneyCents::ZERO)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Mul<usize> for MoneyCents {
    type Output = MoneyCents;

    fn mul(self, rhs: usize) -> Self::Output {
        MoneyCents(self.0 * rhs as i64)
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - digits past the second decimal round half away from zero
    /// - rejects empty/invalid strings
    /// - rejects magnitudes above [`MoneyCents::MAX_INPUT`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next().unwrap_or("");

        if parts.next().is_some() {
            return Err(invalid());
        }

        // ".5" is accepted as 0.50, a bare "." is not.
        if units_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if !units_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| overflow())?
        };

        let digits: Vec<i64> = frac_str
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);
        let cents = tenths * 10 + hundredths + i64::from(round_up);

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .filter(|v| *v <= MoneyCents::MAX_INPUT.0)
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(MoneyCents(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
        assert_eq!(".5".parse::<MoneyCents>().unwrap().cents(), 50);
        assert_eq!("7.".parse::<MoneyCents>().unwrap().cents(), 700);
    }

    #[test]
    fn parse_rounds_extra_decimals_half_away_from_zero() {
        assert_eq!("12.345".parse::<MoneyCents>().unwrap().cents(), 1235);
        assert_eq!("12.3449".parse::<MoneyCents>().unwrap().cents(), 1234);
        assert_eq!("0.999".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("-0.005".parse::<MoneyCents>().unwrap().cents(), -1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!(".".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!("abc".parse::<MoneyCents>().is_err());
        assert!("1e3".parse::<MoneyCents>().is_err());
        assert!("99999999999999999999".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn lenient_parse_coerces_to_zero() {
        assert_eq!(MoneyCents::parse_lenient("4"), MoneyCents::new(400));
        assert_eq!(MoneyCents::parse_lenient("-4"), MoneyCents::ZERO);
        assert_eq!(MoneyCents::parse_lenient("four"), MoneyCents::ZERO);
        assert_eq!(MoneyCents::parse_lenient(""), MoneyCents::ZERO);
    }

    #[test]
    fn parse_rejects_amounts_above_the_input_bound() {
        assert_eq!(
            "1000000000000".parse::<MoneyCents>().unwrap(),
            MoneyCents::MAX_INPUT
        );
        assert!("1000000000000.01".parse::<MoneyCents>().is_err());
        assert!("-92233720368547758".parse::<MoneyCents>().is_err());
        assert_eq!(MoneyCents::parse_lenient("92233720368547758"), MoneyCents::ZERO);
    }

    #[test]
    fn multiplies_by_a_count() {
        assert_eq!(MoneyCents::new(167) * 6, MoneyCents::new(1002));
        assert_eq!(MoneyCents::ZERO * 3, MoneyCents::ZERO);
    }

    #[test]
    fn div_round_rounds_half_away_from_zero() {
        assert_eq!(MoneyCents::new(1000).div_round(3), Some(MoneyCents::new(333)));
        assert_eq!(MoneyCents::new(2000).div_round(3), Some(MoneyCents::new(667)));
        assert_eq!(MoneyCents::new(5).div_round(2), Some(MoneyCents::new(3)));
        assert_eq!(MoneyCents::new(-5).div_round(2), Some(MoneyCents::new(-3)));
        assert!(MoneyCents::new(5).div_round(0).is_none());
    }

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(MoneyCents::from_major(3.336).unwrap().cents(), 334);
        assert_eq!(MoneyCents::from_major(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(MoneyCents::from_major(10.0).unwrap().cents(), 1000);
        assert!(MoneyCents::from_major(f64::NAN).is_err());
    }
}
