use analysis_core::{AnalysisError, ForecastPoint, GrowthPoint};
use financial_data::SampleStore;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::stats::{fit_linear, round_to};

/// Relative standard deviation of the noise added to each fitted prediction.
const NOISE_FRACTION: f64 = 0.05;

/// Year the compounding projection counts from.
const COMPOUND_BASE_YEAR: i32 = 2024;

/// `(metric, base value, annual growth rate)` for the compounding projection.
const COMPOUND_PARAMS: [(&str, f64, f64); 5] = [
    ("revenue", 2_500_000.0, 0.15),
    ("profit", 800_000.0, 0.12),
    ("profitMargin", 32.0, 0.02),
    ("eps", 8.0, 0.12),
    ("netAssets", 7_500_000.0, 0.08),
];

const DEFAULT_BASE_VALUE: f64 = 1_000_000.0;
const DEFAULT_GROWTH_RATE: f64 = 0.10;

/// Longest horizon the HTTP layer accepts for either forecast path.
pub const MAX_FORECAST_YEARS: i32 = 50;

/// Project `years` future annual values of `metric` from a line fitted to the
/// stored history, with Gaussian noise on every point.
pub fn generate_forecast(
    store: &SampleStore,
    metric: &str,
    years: i32,
) -> Result<Vec<ForecastPoint>, AnalysisError> {
    generate_forecast_with_rng(store, metric, years, &mut rand::thread_rng())
}

/// [`generate_forecast`] with a caller-supplied random source.
///
/// The noise standard deviation is `0.05 * predicted`, so it follows the size
/// of the prediction rather than the spread of the history. A negative
/// prediction has no valid noise distribution and is reported as a
/// calculation error.
pub fn generate_forecast_with_rng<R: Rng + ?Sized>(
    store: &SampleStore,
    metric: &str,
    years: i32,
    rng: &mut R,
) -> Result<Vec<ForecastPoint>, AnalysisError> {
    let series = store.annual_series(metric)?;
    let (Some(fit), Some(&(last_year, _))) = (
        fit_linear(&series.iter().map(|(_, v)| *v).collect::<Vec<_>>()),
        series.last(),
    ) else {
        return Ok(Vec::new());
    };

    tracing::debug!(
        metric,
        points = series.len(),
        slope = fit.slope,
        intercept = fit.intercept,
        "Fitted forecast line"
    );

    let n = series.len() as f64;
    let mut forecast = Vec::new();
    for i in 1..=years {
        let mut predicted = fit.predict(n - 1.0 + i as f64);

        // Noise scale is proportional to the prediction and cannot be negative.
        if predicted < 0.0 {
            return Err(AnalysisError::CalculationError(format!(
                "predicted value {:.2} for {} in {} is negative, noise scale must be non-negative",
                predicted,
                metric,
                last_year + i
            )));
        }

        let noise = Normal::new(0.0, predicted * NOISE_FRACTION).map_err(|e| {
            AnalysisError::CalculationError(format!(
                "cannot add noise to predicted value {:.2} for {}: {}",
                predicted, metric, e
            ))
        })?;
        predicted += noise.sample(rng);

        forecast.push(ForecastPoint {
            year: last_year + i,
            value: round_to(predicted, 2),
            is_forecast: true,
        });
    }

    Ok(forecast)
}

/// Compound a fixed base value forward from 2024, independent of stored data.
/// Unknown metrics use a base of 1,000,000 growing 10% a year.
pub fn compound_forecast(metric: &str, years: i32) -> Vec<GrowthPoint> {
    let (base_value, growth_rate) = COMPOUND_PARAMS
        .iter()
        .find(|(name, _, _)| *name == metric)
        .map(|(_, base, rate)| (*base, *rate))
        .unwrap_or((DEFAULT_BASE_VALUE, DEFAULT_GROWTH_RATE));

    let decimals = if metric == "profitMargin" { 1 } else { 2 };

    let mut forecast = Vec::new();
    for i in 1..=years {
        forecast.push(GrowthPoint {
            year: COMPOUND_BASE_YEAR + i,
            value: round_to(base_value * (1.0 + growth_rate).powi(i), decimals),
        });
    }
    forecast
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::FinancialRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    #[test]
    fn test_compound_revenue() {
        let points = compound_forecast("revenue", 3);
        assert_eq!(points.len(), 3);
        assert_eq!(
            points.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2025, 2026, 2027]
        );
        for (i, p) in points.iter().enumerate() {
            let expected = 2_500_000.0 * 1.15f64.powi(i as i32 + 1);
            assert!((p.value - expected).abs() < 0.01, "{} vs {}", p.value, expected);
        }
    }

    #[test]
    fn test_compound_profit_margin_rounds_to_one_decimal() {
        let points = compound_forecast("profitMargin", 2);
        assert_eq!(points[0].value, 32.6);
        assert_eq!(points[1].value, 33.3);
    }

    #[test]
    fn test_compound_unknown_metric_uses_defaults() {
        let points = compound_forecast("headcount", 2);
        assert_eq!(points[0].value, 1_100_000.0);
        assert!((points[1].value - 1_210_000.0).abs() < 0.01);
    }

    #[test]
    fn test_compound_non_positive_years() {
        assert!(compound_forecast("revenue", 0).is_empty());
        assert!(compound_forecast("revenue", -2).is_empty());
    }

    #[test]
    fn test_regression_shape() {
        let store = SampleStore::build();
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_forecast_with_rng(&store, "revenue", 4, &mut rng).unwrap();

        assert_eq!(points.len(), 4);
        assert_eq!(
            points.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2025, 2026, 2027, 2028]
        );
        assert!(points.iter().all(|p| p.is_forecast));
        // Two decimal places
        assert!(points
            .iter()
            .all(|p| ((p.value * 100.0).round() - p.value * 100.0).abs() < 1e-6));
    }

    #[test]
    fn test_regression_values_stay_near_fitted_line() {
        let store = SampleStore::build();
        let history: Vec<f64> = store
            .annual_series("revenue")
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        let fit = fit_linear(&history).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let points = generate_forecast_with_rng(&store, "revenue", 3, &mut rng).unwrap();
        for (i, p) in points.iter().enumerate() {
            let predicted = fit.predict(5.0 + (i + 1) as f64);
            // Six standard deviations
            assert!((p.value - predicted).abs() < predicted * 0.3);
        }
    }

    #[test]
    fn test_regression_noise_scales_with_prediction() {
        let store = SampleStore::build();
        let history: Vec<f64> = store
            .annual_series("revenue")
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        let predicted = fit_linear(&history).unwrap().predict(6.0);

        let mut rng = StdRng::seed_from_u64(1234);
        let samples: Vec<f64> = (0..2000)
            .map(|_| generate_forecast_with_rng(&store, "revenue", 1, &mut rng).unwrap()[0].value)
            .collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        let rel_std = var.sqrt() / predicted;

        assert!((mean - predicted).abs() / predicted < 0.01);
        assert!(rel_std > 0.04 && rel_std < 0.06, "relative std {}", rel_std);
    }

    #[test]
    fn test_regression_non_positive_years() {
        let store = SampleStore::build();
        assert!(generate_forecast(&store, "revenue", 0).unwrap().is_empty());
        assert!(generate_forecast(&store, "revenue", -1).unwrap().is_empty());
    }

    #[test]
    fn test_regression_unknown_metric_is_lookup_error() {
        let store = SampleStore::build();
        let err = generate_forecast(&store, "unknown_metric", 3).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownMetric(m) if m == "unknown_metric"));
    }

    #[test]
    fn test_regression_empty_store() {
        let store = SampleStore::default();
        assert!(generate_forecast(&store, "revenue", 3).unwrap().is_empty());
    }

    #[test]
    fn test_regression_shrinking_metric_fails_once_prediction_turns_negative() {
        let store = SampleStore::build();
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_forecast_with_rng(&store, "revenue_growth", 40, &mut rng).unwrap_err();
        assert!(matches!(err, AnalysisError::CalculationError(m) if m.contains("negative")));
    }

    #[test]
    fn test_regression_negative_prediction_is_calculation_error() {
        let mut data = BTreeMap::new();
        for (year, value) in [(2019, 300.0), (2020, 200.0), (2021, 100.0)] {
            data.insert(year, vec![FinancialRecord::new(year, "Q1").with("revenue", value)]);
        }
        let store = SampleStore::from_records(data);

        // Next points are 0 then -100
        let err = generate_forecast(&store, "revenue", 2).unwrap_err();
        assert!(matches!(err, AnalysisError::CalculationError(_)));
    }
}
