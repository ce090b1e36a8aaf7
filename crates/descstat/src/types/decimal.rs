//! Decimal type for arbitrary precision decimal arithmetic.
//!
//! The implementation uses a coefficient (BigInt) and an exponent (i32)
//! representation: value = coefficient * 10^exponent. Trailing zeros are
//! significant, so `1.50` and `1.5` compare equal but print differently.
//!
//! Arithmetic follows the General Decimal Arithmetic rules with a fixed
//! context: results are rounded half-even to [`DECIMAL_PRECISION`]
//! significant digits. Division keeps as few digits as an exact quotient
//! allows, down to the ideal exponent `exp(dividend) - exp(divisor)`, which is
//! why `124.0750 / 5` is `24.8150` and `124.0750 / 4` is `31.01875`.
//!
//! Only finite values are represented.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::{error::NumberError, numeric::Numeric, types::Fraction};

/// Number of significant digits kept by arithmetic results.
pub const DECIMAL_PRECISION: u32 = 28;

/// Largest adjusted exponent (the exponent of the leading digit) a parsed
/// literal may have. The smallest is its negation.
pub const DECIMAL_MAX_EXPONENT: i32 = 999_999;

/// A finite decimal number with arbitrary precision.
///
/// Zero carries no sign: `"-0.00"` parses to the same value as `"0.00"` and
/// prints without the minus sign.
///
/// # Panics
///
/// Division by zero panics. So does an arithmetic result whose exponent leaves
/// the `i32` range, which parsed values stay far away from.
///
/// # Examples
///
/// ```
/// use descstat::{Decimal, variance};
///
/// let data: Vec<Decimal> = ["27.5", "30.25", "30.25", "34.5", "41.75"]
///     .iter()
///     .map(|s| s.parse())
///     .collect::<Result<_, _>>()?;
/// assert_eq!(variance(&data, None)?.to_string(), "31.01875");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decimal {
    /// The significand of the decimal number.
    coefficient: BigInt,
    /// The exponent (power of 10).
    exponent: i32,
}

impl Decimal {
    /// Creates a new Decimal from coefficient and exponent.
    pub fn new(coefficient: impl Into<BigInt>, exponent: i32) -> Self {
        Self {
            coefficient: coefficient.into(),
            exponent,
        }
    }

    /// Creates a Decimal equal to an integer.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value, 0)
    }

    /// Returns the coefficient.
    #[must_use]
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    /// Returns the exponent.
    #[must_use]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Converts this Decimal to the Fraction it represents exactly.
    #[must_use]
    pub fn to_fraction(&self) -> Fraction {
        let scale = pow10(u64::from(self.exponent.unsigned_abs()));
        if self.exponent >= 0 {
            Fraction::from_integer(&self.coefficient * scale)
        } else {
            // The denominator is a positive power of ten, never zero.
            Fraction::new(self.coefficient.clone(), scale).unwrap_or_else(|_| Fraction::zero())
        }
    }

    /// Converts to the nearest f64.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.coefficient, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Exponent of the leading digit: `1.23E+10` has adjusted exponent 10.
    fn adjusted(&self) -> i64 {
        i64::from(self.exponent) + i64::from(digit_count(&self.coefficient)) - 1
    }

    /// Coefficient rescaled to `target_exp`, which must not exceed the exponent.
    fn coefficient_at(&self, target_exp: i64) -> BigInt {
        let diff = i64::from(self.exponent) - target_exp;
        if diff <= 0 {
            return self.coefficient.clone();
        }
        &self.coefficient * pow10(diff.unsigned_abs())
    }

    /// Rounds half-even to [`DECIMAL_PRECISION`] significant digits and packs
    /// the exponent back into an `i32`.
    fn rounded(coefficient: BigInt, exponent: i64) -> Self {
        let digits = digit_count(&coefficient);
        if digits <= DECIMAL_PRECISION {
            return Self::new(coefficient, packed_exponent(exponent));
        }

        let drop = digits - DECIMAL_PRECISION;
        let divisor = pow10(u64::from(drop));
        let negative = coefficient.is_negative();
        let (mut quotient, remainder) = coefficient.abs().div_rem(&divisor);

        let round_up = match (&remainder * 2u8).cmp(&divisor) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => quotient.is_odd(),
        };
        if round_up {
            quotient += 1u8;
        }

        let mut exponent = exponent + i64::from(drop);
        // 999..9 rounding up gains a digit; the extra one is a zero
        if digit_count(&quotient) > DECIMAL_PRECISION {
            quotient /= 10u8;
            exponent += 1;
        }

        Self::new(if negative { -quotient } else { quotient }, packed_exponent(exponent))
    }

    /// Adds `other` to a zero with exponent `zero_exp`.
    ///
    /// The result keeps the lower of the two exponents, but never more than
    /// one digit beyond the precision below `other`'s own digits.
    fn add_to_zero(zero_exp: i32, other: Self) -> Self {
        if other.coefficient.is_zero() {
            return Self::new(BigInt::zero(), zero_exp.min(other.exponent));
        }
        let other_exp = i64::from(other.exponent);
        let exponent = i64::from(zero_exp)
            .min(other_exp)
            .max(other_exp - i64::from(DECIMAL_PRECISION) - 1);
        Self::rounded(other.coefficient_at(exponent), exponent)
    }

    /// Coefficient and exponent with trailing zeros removed, used for hashing.
    fn reduced(&self) -> (BigInt, i64) {
        if self.coefficient.is_zero() {
            return (BigInt::zero(), 0);
        }
        let ten = BigInt::from(10u8);
        let mut coefficient = self.coefficient.clone();
        let mut exponent = i64::from(self.exponent);
        loop {
            let (q, r) = coefficient.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            coefficient = q;
            exponent += 1;
        }
        (coefficient, exponent)
    }
}

/// Narrows an arithmetic result's exponent back to the stored width.
fn packed_exponent(exponent: i64) -> i32 {
    i32::try_from(exponent).unwrap_or_else(|_| panic!("Decimal exponent overflow: {exponent}"))
}

/// 10^exp as a BigInt.
fn pow10(exp: u64) -> BigInt {
    BigInt::from(10u8).pow(u32::try_from(exp).unwrap_or(u32::MAX))
}

/// Number of decimal digits in the magnitude of `value` (zero has one digit).
fn digit_count(value: &BigInt) -> u32 {
    u32::try_from(value.magnitude().to_string().len()).unwrap_or(u32::MAX)
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl FromStr for Decimal {
    type Err = NumberError;

    /// Parses formats like `"123"`, `"-123"`, `"+1.25"`, `".5"`, `"1.23E+10"`, `"1e-3"`.
    ///
    /// Literals whose leading digit lies beyond 10^±[`DECIMAL_MAX_EXPONENT`]
    /// are rejected with [`NumberError::ExponentOutOfRange`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::invalid_literal("Decimal", s);
        let trimmed = s.trim();

        let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };

        let (mantissa, exp_str) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let out_of_range = || NumberError::ExponentOutOfRange { literal: s.to_owned() };
        let written_exp: i64 = match exp_str {
            Some(exp) => {
                let unsigned = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                // only digit runs too long for i64 fail here
                exp.parse().map_err(|_| out_of_range())?
            }
            None => 0,
        };

        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::from_str(&digits).map_err(|_| invalid())?;
        let exponent = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| written_exp.checked_sub(len))
            .ok_or_else(out_of_range)?;

        let adjusted = exponent.saturating_add(i64::from(digit_count(&magnitude)) - 1);
        let limit = i64::from(DECIMAL_MAX_EXPONENT);
        if !(-limit..=limit).contains(&adjusted) {
            return Err(out_of_range());
        }
        let exponent = i32::try_from(exponent).map_err(|_| out_of_range())?;
        Ok(Self::new(if negative { -magnitude } else { magnitude }, exponent))
    }
}

impl fmt::Display for Decimal {
    /// Scientific-string form: plain notation unless the exponent is positive
    /// or the value is smaller than 1e-6.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.magnitude().to_string();
        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        let exponent = i64::from(self.exponent);
        let adjusted = self.adjusted();

        if exponent <= 0 && adjusted >= -6 {
            // here the point sits within or just before the digits
            let point = adjusted + 1;
            if point > 0 {
                let (int_part, frac_part) = digits.split_at(usize::try_from(point).unwrap_or(0));
                if frac_part.is_empty() {
                    write!(f, "{sign}{int_part}")
                } else {
                    write!(f, "{sign}{int_part}.{frac_part}")
                }
            } else {
                let zeros = usize::try_from(-point).unwrap_or(0);
                write!(f, "{sign}0.{}{digits}", "0".repeat(zeros))
            }
        } else if digits.len() == 1 {
            write!(f, "{sign}{digits}E{adjusted:+}")
        } else {
            let (first, rest) = digits.split_at(1);
            write!(f, "{sign}{first}.{rest}E{adjusted:+}")
        }
    }
}

impl std::ops::Add for Decimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.coefficient.is_zero() {
            return Self::add_to_zero(self.exponent, rhs);
        }
        if rhs.coefficient.is_zero() {
            return Self::add_to_zero(rhs.exponent, self);
        }

        let (high, low) = if self.exponent >= rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // Digits of `low` that fall entirely below the rounding position of the
        // sum only matter through their sign, so they shrink to a sticky unit.
        let high_exp = i64::from(high.exponent);
        let high_digits = i64::from(digit_count(&high.coefficient));
        let floor = high_exp + (-1_i64).min(high_digits - i64::from(DECIMAL_PRECISION) - 2);
        let (low_coefficient, low_exp) = if low.adjusted() < floor {
            (low.coefficient.signum(), floor)
        } else {
            (low.coefficient, i64::from(low.exponent))
        };

        let aligned = high.coefficient_at(low_exp);
        Self::rounded(aligned + low_coefficient, low_exp)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let exponent = i64::from(self.exponent) + i64::from(rhs.exponent);
        Self::rounded(self.coefficient * rhs.coefficient, exponent)
    }
}

impl std::ops::Div for Decimal {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.coefficient.is_zero(), "Decimal division by zero");

        let negative = self.coefficient.is_negative() != rhs.coefficient.is_negative();
        let dividend = self.coefficient.abs();
        let divisor = rhs.coefficient.abs();

        // One digit beyond the precision so the final rounding sees it.
        let shift = i64::from(digit_count(&divisor)) - i64::from(digit_count(&dividend))
            + i64::from(DECIMAL_PRECISION)
            + 1;
        let shift_pow = pow10(shift.unsigned_abs());
        let (mut quotient, remainder) = if shift >= 0 {
            (dividend * shift_pow).div_rem(&divisor)
        } else {
            dividend.div_rem(&(divisor * shift_pow))
        };

        let ideal_exp = i64::from(self.exponent) - i64::from(rhs.exponent);
        let mut exponent = ideal_exp - shift;
        let ten = BigInt::from(10u8);

        if remainder.is_zero() {
            // exact: strip zeros back toward the ideal exponent
            while exponent < ideal_exp {
                let (q, r) = quotient.div_rem(&ten);
                if !r.is_zero() {
                    break;
                }
                quotient = q;
                exponent += 1;
            }
        } else if (&quotient % 5u8).is_zero() {
            // sticky digit so a true tie is never mistaken for an exact half
            quotient += 1u8;
        }

        Self::rounded(if negative { -quotient } else { quotient }, exponent)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.coefficient, self.exponent)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reduced().hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.coefficient.signum();
        let by_sign = sign.cmp(&other.coefficient.signum());
        if by_sign != Ordering::Equal || sign.is_zero() {
            return by_sign;
        }

        // Same sign: the leading digit's position decides unless it matches.
        let by_magnitude = self.adjusted().cmp(&other.adjusted());
        if by_magnitude != Ordering::Equal {
            return if sign.is_positive() { by_magnitude } else { by_magnitude.reverse() };
        }

        // Equal adjusted exponents differ by at most the digit counts.
        let target_exp = i64::from(self.exponent.min(other.exponent));
        self.coefficient_at(target_exp).cmp(&other.coefficient_at(target_exp))
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Self::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }
}

impl Numeric for Decimal {
    type Root = f64;

    fn from_count(count: usize) -> Self {
        Self::from_integer(count)
    }

    fn sqrt(self) -> f64 {
        self.to_f64().sqrt()
    }
}
