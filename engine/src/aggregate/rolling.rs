// Trailing rolling mean, used to smooth the month-on-month launch series.

/// Mean of each value and the `window - 1` values before it. Positions before
/// the first full window are `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || values.len() < window {
        return vec![None; values.len()];
    }

    let mut results = vec![None; window - 1];

    // Sum for the first window
    let mut sum: f64 = values.iter().take(window).sum();
    results.push(Some(sum / window as f64));

    // Slide the window
    for i in window..values.len() {
        sum = sum - values[i - window] + values[i];
        results.push(Some(sum / window as f64));
    }
    results
}
