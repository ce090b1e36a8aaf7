//! Fraction type for exact rational arithmetic.
//!
//! Fractions use arbitrary precision integers and are always normalized to have
//! a positive denominator and GCD(numerator, denominator) = 1, so structural
//! equality and hashing agree with numeric equality.

use std::{cmp::Ordering, fmt, str::FromStr};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{error::NumberError, numeric::Numeric, types::Decimal};

/// Bit length of the integer quotient `to_f64` rounds from: two more than an
/// f64 significand, the extra ones being the round and sticky bits.
const QUOTIENT_BITS: i64 = 55;

/// A rational number represented as a fraction of two integers.
///
/// Fractions are always stored in normalized form:
/// - The denominator is always positive
/// - The numerator and denominator have no common factors (GCD = 1)
/// - Zero is represented as 0/1
///
/// Dividing by a zero fraction panics, like integer division. The statistics
/// functions only ever divide by positive element counts.
///
/// # Examples
///
/// ```
/// use descstat::{Fraction, mean};
///
/// let data = [Fraction::new(3, 7)?, Fraction::new(1, 21)?, Fraction::new(5, 3)?, Fraction::new(1, 3)?];
/// assert_eq!(mean(&data)?, Fraction::new(13, 21)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Creates a new Fraction from numerator and denominator.
    ///
    /// The fraction is normalized. A zero denominator is rejected.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self, NumberError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(NumberError::ZeroDenominator);
        }
        Ok(Self::normalized(numerator.into(), denominator))
    }

    /// Creates a Fraction equal to an integer (denominator = 1).
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    /// Converts a float to the fraction it represents exactly.
    ///
    /// Every finite `f64` is a dyadic rational, so no rounding happens:
    /// `Fraction::from_f64(0.1)` is `3602879701896397/36028797018963968`.
    pub fn from_f64(value: f64) -> Result<Self, NumberError> {
        if !value.is_finite() {
            return Err(NumberError::NonFinite {
                value: value.to_string(),
            });
        }

        let bits = value.to_bits();
        let negative = bits >> 63 != 0;
        let exponent_bits = i32::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
        let fraction_bits = bits & ((1u64 << 52) - 1);

        let (mantissa, exponent) = if exponent_bits == 0 {
            (fraction_bits, -1022 - 52)
        } else {
            (fraction_bits | (1u64 << 52), exponent_bits - 1023 - 52)
        };

        let mut n = BigInt::from(mantissa);
        let mut d = BigInt::one();
        let shift = usize::try_from(exponent.unsigned_abs()).unwrap_or(0);
        if exponent > 0 {
            n <<= shift;
        } else {
            d <<= shift;
        }
        if negative {
            n = -n;
        }
        Ok(Self::normalized(n, d))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Converts the Fraction to the nearest f64, rounding once.
    ///
    /// The quotient is taken in integers with 55 or 56 significant bits and a
    /// sticky low bit, so the final conversion rounds half-even exactly as a
    /// correctly rounded division would. Results in the subnormal range may be
    /// off by one unit in the last place. Operands of any size are accepted.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.numerator.is_zero() {
            return 0.0;
        }
        let magnitude = self.numerator.abs();
        let bit_gap = i64::try_from(magnitude.bits()).unwrap_or(i64::MAX)
            - i64::try_from(self.denominator.bits()).unwrap_or(i64::MAX);
        let scale = QUOTIENT_BITS - bit_gap;

        let shift = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX);
        let (quotient, remainder) = if scale >= 0 {
            (magnitude << shift).div_rem(&self.denominator)
        } else {
            magnitude.div_rem(&(&self.denominator << shift))
        };
        let mut bits = quotient.to_u64().unwrap_or(u64::MAX);
        if !remainder.is_zero() {
            bits |= 1;
        }

        let value = scale_by_power_of_two(bits as f64, -scale);
        if self.numerator.is_negative() { -value } else { value }
    }

    /// Moves the sign to the numerator and divides out the GCD.
    ///
    /// `d` must be non-zero.
    fn normalized(n: BigInt, d: BigInt) -> Self {
        let (mut n, mut d) = if d.is_negative() { (-n, -d) } else { (n, d) };

        let g = n.gcd(&d);
        if !g.is_one() && !g.is_zero() {
            n /= &g;
            d /= &g;
        }
        if n.is_zero() {
            d = BigInt::one();
        }

        Self {
            numerator: n,
            denominator: d,
        }
    }
}

/// Computes `value * 2^exp` without intermediate overflow or underflow.
fn scale_by_power_of_two(mut value: f64, mut exp: i64) -> f64 {
    // beyond this the result is infinite or zero whatever the significand
    exp = exp.clamp(-2200, 2200);
    let step = 2.0_f64.powi(1000);
    while exp > 1000 {
        value *= step;
        exp -= 1000;
    }
    while exp < -1000 {
        value /= step;
        exp += 1000;
    }
    value * 2.0_f64.powi(i32::try_from(exp).unwrap_or(0))
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl FromStr for Fraction {
    type Err = NumberError;

    /// Parses `"numerator/denominator"`, a plain integer, or a decimal literal
    /// such as `"1.5"` or `"3e-2"` (converted exactly, `"0.1"` is `1/10`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NumberError::invalid_literal("Fraction", s));
        }

        if let Some((num, den)) = trimmed.split_once('/') {
            let numerator = parse_bigint(num.trim(), s)?;
            let denominator = parse_bigint(den.trim(), s)?;
            return Self::new(numerator, denominator);
        }

        if trimmed.contains(['.', 'e', 'E']) {
            let decimal: Decimal = trimmed
                .parse()
                .map_err(|_| NumberError::invalid_literal("Fraction", s))?;
            return Ok(decimal.to_fraction());
        }

        parse_bigint(trimmed, s).map(Self::from_integer)
    }
}

/// Parses a BigInt, reporting the whole literal on failure.
fn parse_bigint(digits: &str, literal: &str) -> Result<BigInt, NumberError> {
    digits
        .strip_prefix('+')
        .unwrap_or(digits)
        .parse()
        .map_err(|_| NumberError::invalid_literal("Fraction", literal))
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl std::ops::Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        if self.denominator == rhs.denominator {
            return Self::normalized(self.numerator + rhs.numerator, self.denominator);
        }
        let n = self.numerator * &rhs.denominator + rhs.numerator * &self.denominator;
        let d = self.denominator * rhs.denominator;
        Self::normalized(n, d)
    }
}

impl std::ops::Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let n = self.numerator * rhs.numerator;
        let d = self.denominator * rhs.denominator;
        Self::normalized(n, d)
    }
}

impl std::ops::Div for Fraction {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.numerator.is_zero(), "Fraction division by zero");
        let n = self.numerator * rhs.denominator;
        let d = self.denominator * rhs.numerator;
        Self::normalized(n, d)
    }
}

impl std::ops::Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // a/b < c/d iff a*d < c*b, since b and d are positive
        let left = &self.numerator * &other.denominator;
        let right = &other.numerator * &self.denominator;
        left.cmp(&right)
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::from_integer(1)
    }
}

impl Numeric for Fraction {
    type Root = f64;

    fn from_count(count: usize) -> Self {
        Self::from_integer(count)
    }

    fn sqrt(self) -> f64 {
        self.to_f64().sqrt()
    }
}
