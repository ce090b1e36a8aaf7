//! Exact numeric types the statistics functions can run on besides floats.

mod decimal;
mod fraction;
mod number;

pub use decimal::{DECIMAL_MAX_EXPONENT, DECIMAL_PRECISION, Decimal};
pub use fraction::Fraction;
pub use number::Number;
