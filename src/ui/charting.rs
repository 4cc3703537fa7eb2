use crate::time_series::Sample;

/// Compute X (seconds) and Y (wpm or errors, whichever peaks higher) bounds for the results chart
pub fn compute_chart_params(samples: &[Sample]) -> (f64, f64) {
    let highest = samples
        .iter()
        .map(|s| (s.wpm as f64).max(s.errors as f64))
        .fold(0.0, f64::max);

    let overall_duration = samples
        .last()
        .map_or(1.0, |s| s.elapsed as f64)
        .max(1.0);

    (overall_duration, highest.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
