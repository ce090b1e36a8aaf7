//! A dynamically typed number that promotes between representations.
//!
//! [`Number`] lets one slice hold integers, decimals, fractions and floats
//! together. Every binary operation first promotes both operands to the wider
//! of the two representations:
//!
//! ```text
//! Int  <  Decimal  <  Fraction  <  Float
//! ```
//!
//! Integers are exact and stay integers under `+`, `-` and `*`, but `/` is true
//! division and always yields a `Float` when both sides are `Int`. That is why
//! the median of `[1, 3, 5]` is `Int(3)` while the median of `[1, 3, 5, 7]` is
//! `Float(4.0)`.
//!
//! Comparisons are by numeric value across representations, and exact: a float
//! is compared through the fraction it represents, so `Int(1) == Float(1.0)`
//! but `Fraction(1/10) != Float(0.1)`.

use std::{cmp::Ordering, fmt, str::FromStr};

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::{
    error::NumberError,
    numeric::Numeric,
    types::{Decimal, Fraction},
};

/// A number in one of four representations.
#[derive(Debug, Clone)]
pub enum Number {
    /// Arbitrary precision integer.
    Int(BigInt),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Exact rational.
    Fraction(Fraction),
    /// IEEE-754 double.
    Float(f64),
}

impl Number {
    /// Parses a literal, reading decimal-point and exponent tokens as [`Decimal`]
    /// instead of `Float`.
    ///
    /// Integers and `a/b` fractions parse the same as [`Number::from_str`].
    pub fn parse_decimal(s: &str) -> Result<Self, NumberError> {
        let trimmed = s.trim();
        if trimmed.contains('/') {
            return trimmed.parse().map(Self::Fraction);
        }
        if let Ok(int) = parse_int(trimmed) {
            return Ok(Self::Int(int));
        }
        trimmed.parse().map(Self::Decimal)
    }

    /// Converts to the nearest f64.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int(i) => i.to_f64().unwrap_or(f64::NAN),
            Self::Decimal(d) => d.to_f64(),
            Self::Fraction(f) => f.to_f64(),
            Self::Float(f) => *f,
        }
    }

    /// Returns the name of the representation, e.g. `"Fraction"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Decimal(_) => "Decimal",
            Self::Fraction(_) => "Fraction",
            Self::Float(_) => "Float",
        }
    }

    /// Position in the promotion order.
    fn rank(&self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Decimal(_) => 1,
            Self::Fraction(_) => 2,
            Self::Float(_) => 3,
        }
    }

    /// Converts to the representation of the given rank, never narrowing.
    fn promote(self, rank: u8) -> Self {
        match (self, rank) {
            (Self::Int(i), 1) => Self::Decimal(Decimal::from_integer(i)),
            (Self::Int(i), 2) => Self::Fraction(Fraction::from_integer(i)),
            (Self::Decimal(d), 2) => Self::Fraction(d.to_fraction()),
            (value, 3) if value.rank() < 3 => Self::Float(value.to_f64()),
            (value, _) => value,
        }
    }

    /// Promotes both operands to their common representation.
    fn coerce(self, other: Self) -> (Self, Self) {
        let rank = self.rank().max(other.rank());
        (self.promote(rank), other.promote(rank))
    }

    /// Exact rational value, or `None` for non-finite floats.
    fn to_exact(&self) -> Option<Fraction> {
        match self {
            Self::Int(i) => Some(Fraction::from_integer(i.clone())),
            Self::Decimal(d) => Some(d.to_fraction()),
            Self::Fraction(f) => Some(f.clone()),
            Self::Float(f) => Fraction::from_f64(*f).ok(),
        }
    }
}

/// Parses an optionally signed run of ASCII digits.
fn parse_int(s: &str) -> Result<BigInt, NumberError> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumberError::invalid_literal("Int", s));
    }
    s.strip_prefix('+')
        .unwrap_or(s)
        .parse()
        .map_err(|_| NumberError::invalid_literal("Int", s))
}

impl FromStr for Number {
    type Err = NumberError;

    /// Parses integers as `Int`, `a/b` as `Fraction` and anything else as `Float`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.contains('/') {
            return trimmed.parse().map(Self::Fraction);
        }
        if let Ok(int) = parse_int(trimmed) {
            return Ok(Self::Int(int));
        }
        trimmed
            .parse()
            .map(Self::Float)
            .map_err(|_| NumberError::invalid_literal("Number", s))
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self::Int(BigInt::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<Fraction> for Number {
    fn from(value: Fraction) -> Self {
        Self::Fraction(value)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Fraction(fr) => write!(f, "{fr}"),
            Self::Float(x) => f.write_str(&float_repr(*x)),
        }
    }
}

/// Shortest round-tripping representation of a float.
///
/// Special values print as `inf`, `-inf` and `nan`. Finite values always carry
/// a decimal point or an exponent (`4.0`, `1e+20`, `1e-07`).
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f.is_sign_negative() { "-inf" } else { "inf" }.to_owned();
    }

    let mut buffer = ryu::Buffer::new();
    let s = buffer.format_finite(f);

    // ryu produces "1e20"; use an explicit sign and at least two exponent digits
    if let Some((mantissa, exp)) = s.split_once('e') {
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }
    if s.contains('.') {
        s.to_owned()
    } else {
        format!("{s}.0")
    }
}

impl std::ops::Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.coerce(rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a + b),
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a + b),
            (Self::Fraction(a), Self::Fraction(b)) => Self::Fraction(a + b),
            (a, b) => Self::Float(a.to_f64() + b.to_f64()),
        }
    }
}

impl std::ops::Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.coerce(rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a - b),
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a - b),
            (Self::Fraction(a), Self::Fraction(b)) => Self::Fraction(a - b),
            (a, b) => Self::Float(a.to_f64() - b.to_f64()),
        }
    }
}

impl std::ops::Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.coerce(rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a * b),
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a * b),
            (Self::Fraction(a), Self::Fraction(b)) => Self::Fraction(a * b),
            (a, b) => Self::Float(a.to_f64() * b.to_f64()),
        }
    }
}

impl std::ops::Div for Number {
    type Output = Self;

    /// True division. `Int / Int` is a `Float`; dividing a `Decimal` or
    /// `Fraction` by zero panics, while `Int` and `Float` division by zero
    /// follows IEEE-754 (`inf` or `nan`).
    fn div(self, rhs: Self) -> Self::Output {
        match self.coerce(rhs) {
            (Self::Int(a), Self::Int(b)) => match Fraction::new(a.clone(), b) {
                Ok(ratio) => Self::Float(ratio.to_f64()),
                Err(_) => Self::Float(a.to_f64().unwrap_or(f64::NAN) / 0.0),
            },
            (Self::Decimal(a), Self::Decimal(b)) => Self::Decimal(a / b),
            (Self::Fraction(a), Self::Fraction(b)) => Self::Fraction(a / b),
            (a, b) => Self::Float(a.to_f64() / b.to_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Fraction(a), Self::Fraction(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Float(f), _) | (_, Self::Float(f)) if f.is_nan() => None,
            (Self::Float(f), _) if f.is_infinite() => {
                Some(if *f > 0.0 { Ordering::Greater } else { Ordering::Less })
            }
            (_, Self::Float(f)) if f.is_infinite() => {
                Some(if *f > 0.0 { Ordering::Less } else { Ordering::Greater })
            }
            (a, b) => Some(a.to_exact()?.cmp(&b.to_exact()?)),
        }
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Self::Int(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::Int(i) => i.is_zero(),
            Self::Decimal(d) => d.is_zero(),
            Self::Fraction(f) => f.is_zero(),
            Self::Float(f) => *f == 0.0,
        }
    }
}

impl Numeric for Number {
    type Root = Self;

    fn from_count(count: usize) -> Self {
        Self::from(count)
    }

    /// Square root as a `Float`, whatever the input representation.
    fn sqrt(self) -> Self {
        Self::Float(self.to_f64().sqrt())
    }
}
