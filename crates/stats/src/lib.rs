//! Statistical helper functions for aeolus.

/// Sum of a slice. NaN values propagate.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    sum(data) / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n as f64 - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population standard deviation (N denominator, numpy's default `std`).
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// Piecewise-linear ramp from 0 to 1.
///
/// - `x <= start` -> 0
/// - `start < x <= stop` -> `(x - start) / (stop - start)`
/// - `x > stop` -> 1
///
/// With `invert` the result is `1 - ramp`. NaN inputs map to NaN.
pub fn linear_transition(x: &[f64], start: f64, stop: f64, invert: bool) -> Vec<f64> {
    x.iter()
        .map(|&v| {
            let r = if v.is_nan() {
                f64::NAN
            } else if v <= start {
                0.0
            } else if v <= stop {
                (v - start) / (stop - start)
            } else {
                1.0
            };
            if invert { 1.0 - r } else { r }
        })
        .collect()
}
