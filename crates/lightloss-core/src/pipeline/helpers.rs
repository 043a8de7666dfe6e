//! Small numeric utilities shared across the pipeline stages.

/// `count` evenly spaced values from `start` to `stop` inclusive.
///
/// A single-element request yields just `start`; an empty request yields an
/// empty vector.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice.
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Peak-to-peak range (max - min); 0.0 for an empty slice.
pub fn peak_to_peak(data: &[f64]) -> f64 {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &value in data {
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        return 0.0;
    }
    max - min
}
