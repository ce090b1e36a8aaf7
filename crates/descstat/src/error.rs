//! Error types returned by the statistics functions and numeric constructors.

use std::fmt;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatisticsError>;

/// Broad category an error belongs to.
///
/// Callers that only care whether an input value was rejected can match on
/// [`ErrorKind::InvalidValue`] without naming every concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input value (or collection of values) is not acceptable for the operation.
    InvalidValue,
}

/// A statistics precondition was violated.
///
/// Raised before any result is produced; there is no partial or best-effort
/// result when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    /// At least one data point was required but the input was empty.
    EmptyData { context: &'static str },
    /// Fewer data points than the operation needs.
    InsufficientData {
        context: &'static str,
        required: usize,
        got: usize,
    },
    /// More than one value shares the highest frequency.
    NoUniqueMode { count: usize },
}

impl StatisticsError {
    /// The broad category of this error, always [`ErrorKind::InvalidValue`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidValue
    }
}

impl fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyData { context: "median" } => f.write_str("no median for empty data"),
            Self::EmptyData { context: "mode" } => f.write_str("no mode for empty data"),
            Self::EmptyData { context } => write!(f, "{context} requires at least one data point"),
            Self::InsufficientData { context, required: 2, .. } => {
                write!(f, "{context} requires at least two data points")
            }
            Self::InsufficientData { context, required, .. } => {
                write!(f, "{context} requires at least {required} data points")
            }
            Self::NoUniqueMode { count } => {
                write!(f, "no unique mode; found {count} equally common values")
            }
        }
    }
}

impl std::error::Error for StatisticsError {}

/// Error constructing or parsing one of the numeric types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// A fraction was built with a zero denominator.
    ZeroDenominator,
    /// A NaN or infinite float cannot be represented exactly.
    NonFinite { value: String },
    /// The string is not a valid literal for the target type.
    InvalidLiteral { type_name: &'static str, literal: String },
    /// A decimal literal's exponent lies outside the supported range.
    ExponentOutOfRange { literal: String },
}

impl NumberError {
    /// The broad category of this error, always [`ErrorKind::InvalidValue`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidValue
    }

    pub(crate) fn invalid_literal(type_name: &'static str, literal: &str) -> Self {
        Self::InvalidLiteral {
            type_name,
            literal: literal.to_owned(),
        }
    }
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDenominator => f.write_str("fraction denominator is zero"),
            Self::NonFinite { value } => write!(f, "cannot convert {value} to an exact number"),
            Self::InvalidLiteral { type_name, literal } => {
                write!(f, "invalid literal for {type_name}: {literal:?}")
            }
            Self::ExponentOutOfRange { literal } => write!(f, "exponent of {literal:?} is out of range"),
        }
    }
}

impl std::error::Error for NumberError {}
