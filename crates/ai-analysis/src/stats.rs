/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(i, values[i])`. Returns `None` for an empty series; a
/// single point gives a flat line through it.
pub fn fit_linear(values: &[f64]) -> Option<LinearFit> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let numerator: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64 - x_mean) * (y - y_mean))
        .sum();
    let denominator: f64 = (0..values.len())
        .map(|i| (i as f64 - x_mean).powi(2))
        .sum();

    let slope = if denominator.abs() < 1e-10 {
        0.0
    } else {
        numerator / denominator
    };

    Some(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

/// Label the direction of a series from the signs of its consecutive changes.
pub fn analyze_trend(values: &[f64]) -> &'static str {
    if values.len() < 2 {
        return "insufficient data";
    }

    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_change = changes.iter().sum::<f64>() / changes.len() as f64;

    if changes.iter().all(|c| *c > 0.0) {
        "consistently increasing"
    } else if changes.iter().all(|c| *c < 0.0) {
        "consistently decreasing"
    } else if mean_change > 0.0 {
        "generally increasing"
    } else if mean_change < 0.0 {
        "generally decreasing"
    } else {
        "stable"
    }
}

/// Compound annual growth rate in percent.
pub fn calculate_cagr(start_value: f64, end_value: f64, years: usize) -> f64 {
    ((end_value / start_value).powf(1.0 / years as f64) - 1.0) * 100.0
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Fixed-point text for `value`, spelling non-finite values `inf`/`nan`.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Like [`fixed`] with a comma between each group of three integer digits.
pub(crate) fn grouped(value: f64, decimals: usize) -> String {
    let text = fixed(value, decimals);
    if !value.is_finite() {
        return text;
    }

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
