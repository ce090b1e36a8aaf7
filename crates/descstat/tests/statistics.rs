//! End-to-end behaviour of the statistics functions on float input.

use descstat::{ErrorKind, StatisticsError, counts, mean, median, mode, pstdev, pvariance, stdev, sum_squared_deviations, variance};
use pretty_assertions::assert_eq;

const SAMPLE: [f64; 7] = [2.75, 1.75, 1.25, 0.25, 0.5, 1.25, 3.5];

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn mean_of_small_dataset() {
    assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 4.0]).unwrap(), 2.8);
    assert_eq!(mean(&[-1.0, 2.5, 3.25, 5.75]).unwrap(), 2.625);
}

#[test]
fn empty_input_is_rejected_everywhere() {
    let empty: [f64; 0] = [];
    let errors = [
        mean(&empty).unwrap_err(),
        median(&empty).unwrap_err(),
        mode(&empty).unwrap_err(),
        variance(&empty, None).unwrap_err(),
        stdev(&empty, None).unwrap_err(),
        pvariance(&empty, None).unwrap_err(),
        pstdev(&empty, None).unwrap_err(),
    ];
    for err in &errors {
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
    assert_eq!(errors[0].to_string(), "mean requires at least one data point");
    assert_eq!(errors[1].to_string(), "no median for empty data");
    assert_eq!(errors[2].to_string(), "no mode for empty data");
    assert_eq!(errors[3].to_string(), "variance requires at least two data points");
    assert_eq!(errors[5].to_string(), "pvariance requires at least one data point");
}

#[test]
fn mode_reports_tie_size() {
    let err = mode(&[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, StatisticsError::NoUniqueMode { count: 3 });
    assert_eq!(err.to_string(), "no unique mode; found 3 equally common values");
    assert_eq!(mode(&[1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 4.0]).unwrap(), 3.0);
}

#[test]
fn counts_of_sample() {
    assert_eq!(counts(&SAMPLE), vec![(1.25, 2)]);
    assert_eq!(counts(&[1, 1, 2, 3, 3, 3, 3, 4]), vec![(3, 4)]);
}

#[test]
fn median_of_sample() {
    assert_eq!(median(&SAMPLE).unwrap(), 1.25);
    assert_eq!(median(&[1.0, 3.0, 5.0, 7.0]).unwrap(), 4.0);
}

#[test]
fn dispersion_of_sample() {
    assert_close(sum_squared_deviations(&SAMPLE, None).unwrap(), 8.232142857142858);
    assert_close(variance(&SAMPLE, None).unwrap(), 1.3720238095238095);
    assert_close(
        stdev(&[1.5, 2.5, 2.5, 2.75, 3.25, 4.75], None).unwrap(),
        1.0810874155219827,
    );
    assert_eq!(pvariance(&[0.0, 0.25, 0.25, 1.25, 1.5, 1.75, 2.75, 3.25], None).unwrap(), 1.25);
    assert_close(pstdev(&[1.5, 2.5, 2.5, 2.75, 3.25, 4.75], None).unwrap(), 0.986893273527251);
}

#[test]
fn stdev_is_root_of_variance() {
    let data: [f64; 6] = [3.5, 9.25, 0.5, 4.0, 7.75, 2.0];
    assert_close(stdev(&data, None).unwrap(), variance(&data, None).unwrap().sqrt());
    assert_close(pstdev(&data, None).unwrap(), pvariance(&data, None).unwrap().sqrt());
}

#[test]
fn population_variance_never_exceeds_sample_variance() {
    let datasets: [&[f64]; 4] = [
        &SAMPLE,
        &[1.0, 2.0],
        &[5.0, 5.0, 5.0],
        &[-3.5, 10.0, 0.125, 42.0, -7.0],
    ];
    for data in datasets {
        let sample = variance(data, None).unwrap();
        let population = pvariance(data, None).unwrap();
        assert!(population <= sample, "{population} > {sample} for {data:?}");
        assert!(population >= 0.0);
    }
}

#[test]
fn precomputed_mean_matches_recomputed() {
    let data: [f64; 8] = [0.0, 0.25, 0.25, 1.25, 1.5, 1.75, 2.75, 3.25];
    let m = mean(&data).unwrap();
    assert_eq!(variance(&data, Some(m)).unwrap(), variance(&data, None).unwrap());
    assert_eq!(pvariance(&data, Some(m)).unwrap(), 1.25);
    assert_eq!(stdev(&data, Some(m)).unwrap(), stdev(&data, None).unwrap());
}

#[test]
fn single_value() {
    assert_eq!(pvariance(&[9.5], None).unwrap(), 0.0);
    assert_eq!(pstdev(&[9.5], None).unwrap(), 0.0);
    assert!(matches!(
        variance(&[9.5], None),
        Err(StatisticsError::InsufficientData { required: 2, got: 1, .. })
    ));
}

#[test]
fn works_on_f32() {
    let data: [f32; 4] = [1.5, 2.5, 2.5, 3.5];
    assert_eq!(mean(&data).unwrap(), 2.5);
    assert_eq!(pvariance(&data, None).unwrap(), 0.5);
}
