#![doc = include_str!("../../../README.md")]

mod error;
pub mod numeric;
pub mod statistics;
pub mod types;

pub use crate::{
    error::{ErrorKind, NumberError, StatisticsError, StatsResult},
    numeric::Numeric,
    statistics::{Statistic, counts, mean, median, mode, pstdev, pvariance, stdev, sum_squared_deviations, variance},
    types::{DECIMAL_MAX_EXPONENT, DECIMAL_PRECISION, Decimal, Fraction, Number},
};
