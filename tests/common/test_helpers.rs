//! Helper functions for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;

/// |a − b| / |b|, or |a − b| when b is zero
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        (actual - expected).abs()
    } else {
        ((actual - expected) / expected).abs()
    }
}

/// Assert that `actual` is within `tolerance` (relative) of `expected`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64, message: &str) {
    let error = relative_error(actual, expected);
    assert!(
        error < tolerance,
        "{}: got {}, expected {} (relative error {:e}, tolerance {:e})",
        message,
        actual,
        expected,
        error,
        tolerance
    );
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// First integral of `dy/dt = k·y·(a − y)·(b − y)`
///
/// Along any exact solution `F(y(t)) − F(y(0)) = k·t`, which gives a
/// reference for the degradation ODE without a closed form for `y(t)`.
/// Valid for `0 < y < min(a, b)` and `a ≠ b`.
pub fn degradation_invariant(y: f64, a: f64, b: f64) -> f64 {
    y.ln() / (a * b) - (a - y).ln() / (a * (b - a)) - (b - y).ln() / (b * (a - b))
}
