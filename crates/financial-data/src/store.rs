use analysis_core::{AnalysisError, FinancialRecord, YearlyDataset};
use std::collections::BTreeMap;

use crate::derived::with_derived_metrics;

pub const FIRST_YEAR: i32 = 2019;
pub const LAST_YEAR: i32 = 2024;

const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Column order of the seed tables below.
const SEED_COLUMNS: [&str; 12] = [
    "revenue",
    "cost_of_sales",
    "operating_expenses",
    "net_profit",
    "eps",
    "net_asset_per_share",
    "current_ratio",
    "debt_ratio",
    "net_profit_margin",
    "dividend_yield",
    "revenue_growth",
    "operating_cash_flow",
];

#[rustfmt::skip]
const SEED_2019: [[f64; 12]; 4] = [
    [200000.0, 130000.0, 40000.0, 22000.0, 1.10, 18.5, 1.45, 0.38, 11.0, 2.1, 8.0, 30000.0],
    [250000.0, 160000.0, 45000.0, 30000.0, 1.50, 18.9, 1.48, 0.37, 12.0, 2.1, 9.5, 38000.0],
    [300000.0, 190000.0, 50000.0, 39000.0, 1.95, 19.4, 1.52, 0.36, 13.0, 2.2, 11.0, 45000.0],
    [250000.0, 165000.0, 47000.0, 27500.0, 1.38, 19.8, 1.50, 0.36, 11.0, 2.2, 7.5, 36000.0],
];

#[rustfmt::skip]
const SEED_2020: [[f64; 12]; 4] = [
    [300000.0, 198000.0, 52000.0, 33000.0, 1.65, 20.3, 1.55, 0.35, 11.0, 2.3, 12.0, 42000.0],
    [280000.0, 190000.0, 51000.0, 25200.0, 1.26, 20.1, 1.42, 0.39, 9.0, 2.0, 4.0, 35000.0],
    [340000.0, 221000.0, 55000.0, 40800.0, 2.04, 20.9, 1.50, 0.37, 12.0, 2.3, 13.3, 48000.0],
    [360000.0, 230000.0, 56000.0, 45000.0, 2.25, 21.6, 1.58, 0.34, 12.5, 2.4, 14.0, 52000.0],
];

/// Dividends are declared once a year; interim quarters report none.
const SEED_DIVIDENDS: [(i32, [Option<f64>; 4]); 2] = [
    (2019, [None, None, None, Some(2.0)]),
    (2020, [None, None, None, Some(2.25)]),
];

/// Scale factor applied to a field when deriving a year from the previous one.
pub fn growth_multiplier(field: &str) -> f64 {
    if field.contains("ratio") || field.contains("margin") || field.contains("yield") {
        1.05
    } else if field.contains("growth") {
        0.9
    } else {
        1.15
    }
}

/// Intensive metrics (ratios, margins, per-share values) are averaged across
/// quarters when building an annual figure; everything else is summed.
pub fn is_intensive_metric(metric: &str) -> bool {
    metric == "eps"
        || ["ratio", "margin", "yield", "growth", "per_share"]
            .iter()
            .any(|p| metric.contains(p))
}

/// Immutable table of quarterly records keyed by year.
///
/// Built once at startup and shared read-only; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    data: BTreeMap<i32, YearlyDataset>,
}

impl SampleStore {
    /// Seed 2019 and 2020 from the literal tables, then grow each following
    /// year up to [`LAST_YEAR`] from the one before it.
    pub fn build() -> Self {
        let mut data = BTreeMap::new();
        data.insert(2019, seed_year(2019, &SEED_2019));
        data.insert(2020, seed_year(2020, &SEED_2020));

        for year in 2021..=LAST_YEAR {
            let grown = match data.get(&(year - 1)) {
                Some(prev) => grow_year(prev, year),
                None => continue,
            };
            data.insert(year, grown);
        }

        tracing::debug!(
            years = data.len(),
            records = data.values().map(Vec::len).sum::<usize>(),
            "Sample store built"
        );

        Self { data }
    }

    /// A store over caller-supplied data, used by tests and tooling.
    pub fn from_records(data: BTreeMap<i32, YearlyDataset>) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.data.keys().copied().collect()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.data.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.data.keys().next_back().copied()
    }

    /// Records for one year; empty for years the store does not know.
    pub fn get_year(&self, year: i32) -> &[FinancialRecord] {
        self.data.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records for every known year in `start..=end`, in year then quarter order.
    /// Unknown years are skipped and `start > end` yields nothing.
    pub fn get_range(&self, start: i32, end: i32) -> Vec<FinancialRecord> {
        if start > end {
            return Vec::new();
        }
        self.data
            .range(start..=end)
            .flat_map(|(_, records)| records.iter().cloned())
            .collect()
    }

    /// One annual value per known year for `metric`, oldest first.
    ///
    /// Quarterly values are summed, or averaged for intensive metrics. Derived
    /// margins are visible here even though they are not stored. Quarters that
    /// report the metric as missing are left out of the aggregate.
    pub fn annual_series(&self, metric: &str) -> Result<Vec<(i32, f64)>, AnalysisError> {
        let intensive = is_intensive_metric(metric);
        let mut series = Vec::with_capacity(self.data.len());

        for (&year, records) in &self.data {
            let mut values = Vec::with_capacity(records.len());
            for record in records {
                let record = with_derived_metrics(record);
                match record.metrics.get(metric) {
                    None => return Err(AnalysisError::UnknownMetric(metric.to_string())),
                    Some(Some(v)) => values.push(*v),
                    Some(None) => {}
                }
            }

            if values.is_empty() {
                return Err(AnalysisError::InvalidData(format!(
                    "{} has no reported value in {}",
                    metric, year
                )));
            }

            let total: f64 = values.iter().sum();
            let annual = if intensive {
                total / values.len() as f64
            } else {
                total
            };
            series.push((year, annual));
        }

        Ok(series)
    }
}

fn seed_year(year: i32, rows: &[[f64; 12]; 4]) -> YearlyDataset {
    let dividends = SEED_DIVIDENDS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, d)| *d)
        .unwrap_or([None; 4]);

    QUARTERS
        .iter()
        .zip(rows.iter())
        .zip(dividends.iter())
        .map(|((quarter, row), dividend)| {
            let mut record = SEED_COLUMNS
                .iter()
                .zip(row.iter())
                .fold(FinancialRecord::new(year, *quarter), |r, (field, v)| {
                    r.with(field, *v)
                });
            record = match dividend {
                Some(d) => record.with("dividend_per_share", *d),
                None => record.with_missing("dividend_per_share"),
            };
            record
        })
        .collect()
}

fn grow_year(prev: &[FinancialRecord], year: i32) -> YearlyDataset {
    prev.iter()
        .map(|record| FinancialRecord {
            year,
            quarter: record.quarter.clone(),
            metrics: record
                .metrics
                .iter()
                .map(|(field, value)| (field.clone(), value.map(|v| v * growth_multiplier(field))))
                .collect(),
        })
        .collect()
}
