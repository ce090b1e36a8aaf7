//! Averages and measures of spread.
//!
//! Central location:
//! - `mean(data)`: Arithmetic mean of a dataset
//! - `median(data)`: Median (middle value) of a dataset
//! - `mode(data)`: Most common value of discrete or nominal data
//!
//! Spread:
//! - `variance(data, xbar)`: Sample variance (N - 1 denominator)
//! - `stdev(data, xbar)`: Sample standard deviation
//! - `pvariance(data, mu)`: Population variance (N denominator)
//! - `pstdev(data, mu)`: Population standard deviation
//!
//! Every function takes a realized slice and never mutates it. Iterators must be
//! collected first, since most functions need both a sum and a count.

use std::cmp::Ordering;

use crate::{
    error::{StatisticsError, StatsResult},
    numeric::Numeric,
    types::Number,
};

/// The statistics that can be selected by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    Median,
    Mode,
    Variance,
    Stdev,
    Pvariance,
    Pstdev,
}

impl Statistic {
    /// Returns true if the statistic accepts a precomputed mean.
    #[must_use]
    pub fn uses_center(self) -> bool {
        matches!(self, Self::Variance | Self::Stdev | Self::Pvariance | Self::Pstdev)
    }

    /// Computes this statistic over dynamically typed numbers.
    ///
    /// `center` is forwarded as `xbar`/`mu` to the dispersion statistics and
    /// ignored by the others.
    pub fn apply(self, data: &[Number], center: Option<Number>) -> StatsResult<Number> {
        match self {
            Self::Mean => mean(data),
            Self::Median => median(data),
            Self::Mode => mode(data),
            Self::Variance => variance(data, center),
            Self::Stdev => stdev(data, center),
            Self::Pvariance => pvariance(data, center),
            Self::Pstdev => pstdev(data, center),
        }
    }
}

/// Returns the arithmetic mean of `data`: the sum divided by the count.
///
/// ```
/// use descstat::mean;
///
/// assert_eq!(mean(&[-1.0, 2.5, 3.25, 5.75])?, 2.625);
/// # Ok::<(), descstat::StatisticsError>(())
/// ```
///
/// Returns [`StatisticsError::EmptyData`] if `data` is empty.
pub fn mean<T: Numeric>(data: &[T]) -> StatsResult<T> {
    if data.is_empty() {
        return Err(StatisticsError::EmptyData { context: "mean" });
    }
    let total = data.iter().cloned().fold(T::zero(), |acc, x| acc + x);
    Ok(total / T::from_count(data.len()))
}

/// Returns the median (middle value) of `data`.
///
/// For an odd count this is the middle element of the sorted data, unchanged.
/// For an even count it is the average of the two middle elements, computed
/// with the element type's division, so an integer [`Number`] input yields a
/// `Float` median only when the count is even.
///
/// Values that do not compare with themselves (NaN) sort after everything else.
pub fn median<T: Numeric>(data: &[T]) -> StatsResult<T> {
    let mut sorted = data.to_vec();
    sorted.sort_by(total_order);

    let n = sorted.len();
    if n == 0 {
        return Err(StatisticsError::EmptyData { context: "median" });
    }
    if n % 2 == 1 {
        return Ok(sorted.swap_remove(n / 2));
    }
    let upper = sorted.swap_remove(n / 2);
    let lower = sorted.swap_remove(n / 2 - 1);
    Ok((lower + upper) / T::from_count(2))
}

/// Orders by `partial_cmp`, placing self-incomparable values (NaN) last.
fn total_order<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| {
        let a_unordered = a.partial_cmp(a).is_none();
        let b_unordered = b.partial_cmp(b).is_none();
        a_unordered.cmp(&b_unordered)
    })
}

/// Returns the values sharing the highest frequency, with that frequency.
///
/// Values are tallied by equality in order of first appearance, sorted by
/// descending count (a stable sort, so tied values keep their first-appearance
/// order) and cut down to the leading run with the maximum count. Empty input
/// gives an empty table.
///
/// ```
/// use descstat::counts;
///
/// assert_eq!(counts(&[1, 1, 2, 3, 3, 3, 3, 4]), vec![(3, 4)]);
/// assert_eq!(counts(&["a", "b", "b", "a"]), vec![("a", 2), ("b", 2)]);
/// ```
pub fn counts<T: PartialEq + Clone>(data: &[T]) -> Vec<(T, usize)> {
    let mut table: Vec<(T, usize)> = Vec::new();
    for item in data {
        match table.iter_mut().find(|(value, _)| value == item) {
            Some((_, count)) => *count += 1,
            None => table.push((item.clone(), 1)),
        }
    }

    table.sort_by(|a, b| b.1.cmp(&a.1));
    let Some(max_count) = table.first().map(|(_, count)| *count) else {
        return table;
    };
    let leading = table.iter().take_while(|(_, count)| *count == max_count).count();
    table.truncate(leading);
    table
}

/// Returns the single most common value of discrete or nominal data.
///
/// Values are matched by exact equality. This suits counts, categories and
/// labels; on continuous data nearly every float is unique, so most inputs
/// have no unique mode.
///
/// Returns [`StatisticsError::EmptyData`] for empty input and
/// [`StatisticsError::NoUniqueMode`] when several values tie for the highest
/// frequency.
pub fn mode<T: PartialEq + Clone>(data: &[T]) -> StatsResult<T> {
    if data.is_empty() {
        return Err(StatisticsError::EmptyData { context: "mode" });
    }
    let mut table = counts(data);
    if table.len() != 1 {
        return Err(StatisticsError::NoUniqueMode { count: table.len() });
    }
    table
        .pop()
        .map(|(value, _)| value)
        .ok_or(StatisticsError::EmptyData { context: "mode" })
}

/// Returns Σ(x - center)² over `data`.
///
/// When `center` is `None` the mean of `data` is computed and used. No size
/// check is done here; with an empty slice and no center the mean's
/// [`StatisticsError::EmptyData`] propagates, with a center the sum is zero.
pub fn sum_squared_deviations<T: Numeric>(data: &[T], center: Option<T>) -> StatsResult<T> {
    let center = match center {
        Some(center) => center,
        None => mean(data)?,
    };
    Ok(data.iter().cloned().fold(T::zero(), |acc, x| {
        let deviation = x - center.clone();
        acc + deviation.clone() * deviation
    }))
}

/// Returns the sample variance of `data` (Bessel's correction, N - 1).
///
/// `xbar` may carry an already computed mean of `data` to avoid recomputing it.
/// It is trusted as given: passing something other than the mean yields a
/// computed, but meaningless, variance.
///
/// Returns [`StatisticsError::InsufficientData`] with fewer than two values.
pub fn variance<T: Numeric>(data: &[T], xbar: Option<T>) -> StatsResult<T> {
    let n = data.len();
    if n < 2 {
        return Err(StatisticsError::InsufficientData {
            context: "variance",
            required: 2,
            got: n,
        });
    }
    Ok(sum_squared_deviations(data, xbar)? / T::from_count(n - 1))
}

/// Returns the population variance of `data` (N denominator).
///
/// `mu` is an optional precomputed mean, trusted as given like `xbar` in
/// [`variance`].
///
/// Returns [`StatisticsError::EmptyData`] for empty input.
pub fn pvariance<T: Numeric>(data: &[T], mu: Option<T>) -> StatsResult<T> {
    let n = data.len();
    if n < 1 {
        return Err(StatisticsError::EmptyData { context: "pvariance" });
    }
    Ok(sum_squared_deviations(data, mu)? / T::from_count(n))
}

/// Returns the square root of the sample variance.
///
/// The root has the element type's [`Numeric::Root`] type: exact inputs
/// (`Fraction`, `Decimal`) produce an `f64` approximation here.
pub fn stdev<T: Numeric>(data: &[T], xbar: Option<T>) -> StatsResult<T::Root> {
    variance(data, xbar).map(Numeric::sqrt)
}

/// Returns the square root of the population variance.
pub fn pstdev<T: Numeric>(data: &[T], mu: Option<T>) -> StatsResult<T::Root> {
    pvariance(data, mu).map(Numeric::sqrt)
}
