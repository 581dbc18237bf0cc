use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One quarter of financial statement data.
///
/// Metric values are kept in a flat name → value map so that records can carry
/// any subset of the catalogued metrics. A `None` value is a field that was
/// reported as missing, which is different from a field that is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub year: i32,
    pub quarter: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl FinancialRecord {
    pub fn new(year: i32, quarter: impl Into<String>) -> Self {
        Self {
            year,
            quarter: quarter.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style insert used when seeding records.
    pub fn with(mut self, metric: &str, value: f64) -> Self {
        self.metrics.insert(metric.to_string(), Some(value));
        self
    }

    /// Records a metric that was reported without a value.
    pub fn with_missing(mut self, metric: &str) -> Self {
        self.metrics.insert(metric.to_string(), None);
        self
    }

    /// Value of a metric; `None` when the metric is absent or reported as missing.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied().flatten()
    }

    pub fn has_metric(&self, metric: &str) -> bool {
        self.metrics.contains_key(metric)
    }
}

/// The quarterly records of a single calendar year, in quarter order.
pub type YearlyDataset = Vec<FinancialRecord>;

/// A point produced by the regression forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ForecastPoint {
    pub year: i32,
    pub value: f64,
    pub is_forecast: bool,
}

/// A point produced by the compounding forecast. Carries no `is_forecast` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GrowthPoint {
    pub year: i32,
    pub value: f64,
}

/// Template family used when writing an insight for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricFamily {
    Revenue,
    NetProfit,
    Margin,
    Eps,
    Ratio,
    CashFlow,
    Generic,
}

impl MetricFamily {
    /// Classify a metric name. Order matters: exact names win over substrings,
    /// and `margin` is checked before `ratio`.
    pub fn classify(metric: &str) -> Self {
        match metric {
            "revenue" => MetricFamily::Revenue,
            "net_profit" => MetricFamily::NetProfit,
            m if m.contains("margin") => MetricFamily::Margin,
            "eps" => MetricFamily::Eps,
            m if m.contains("ratio") => MetricFamily::Ratio,
            m if m.contains("cash_flow") => MetricFamily::CashFlow,
            _ => MetricFamily::Generic,
        }
    }
}

/// Human-readable form of a metric name (`free_cash_flow` → `free cash flow`).
pub fn display_name(metric: &str) -> String {
    metric.replace('_', " ")
}
