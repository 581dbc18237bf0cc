use analysis_core::{display_name, AnalysisError, MetricFamily};
use financial_data::SampleStore;
use statrs::statistics::Statistics;

use crate::stats::{analyze_trend, calculate_cagr, fixed, grouped};

pub const NO_INSIGHT: &str = "No specific insight available for this metric.";

const NO_DATA: &str = "No data available for analysis.";

const STATIC_INSIGHTS: [(&str, &str); 5] = [
    (
        "revenue",
        "Revenue has shown consistent growth over the past 5 years, with an average annual growth rate of 20%. This indicates strong market demand and effective business strategies.",
    ),
    (
        "profit",
        "Profit margins have improved significantly, showing a 12% increase from 2019 to 2024. This suggests improved operational efficiency and cost management.",
    ),
    (
        "profitMargin",
        "The profit margin has stabilized around 32% in recent years, indicating a healthy balance between revenue growth and cost control.",
    ),
    (
        "eps",
        "Earnings per share have doubled from 2019 to 2024, reflecting strong profitability and effective capital allocation.",
    ),
    (
        "netAssets",
        "Net assets have grown steadily, showing a 50% increase over the 5-year period. This indicates strong financial health and investment in long-term growth.",
    ),
];

/// Pre-written paragraph for one of the headline metrics.
pub fn static_insight(metric: &str) -> &'static str {
    STATIC_INSIGHTS
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, text)| *text)
        .unwrap_or(NO_INSIGHT)
}

/// Summary statistics over a metric's annual history.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricStats {
    pub count: usize,
    pub trend: &'static str,
    pub latest: f64,
    pub previous: f64,
    /// Change from the previous to the latest value in percent. A zero
    /// previous value is not special-cased and yields `inf` or `NaN`.
    pub percent_change: f64,
    pub cagr: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl MetricStats {
    pub fn from_values(values: &[f64]) -> Result<Self, AnalysisError> {
        let [.., previous, latest] = values else {
            return Err(AnalysisError::InsufficientData(format!(
                "need at least 2 annual values, got {}",
                values.len()
            )));
        };

        Ok(Self {
            count: values.len(),
            trend: analyze_trend(values),
            latest: *latest,
            previous: *previous,
            percent_change: ((latest - previous) / previous) * 100.0,
            cagr: calculate_cagr(values[0], *latest, values.len() - 1),
            mean: values.mean(),
            std_dev: values.population_std_dev(),
        })
    }
}

/// Three-way qualifier used by several templates.
fn tiered(
    percent_change: f64,
    strong: &'static str,
    steady: &'static str,
    weak: &'static str,
) -> &'static str {
    if percent_change > 10.0 {
        strong
    } else if percent_change > 0.0 {
        steady
    } else {
        weak
    }
}

fn revenue_sentences(_metric: &str, s: &MetricStats) -> Vec<String> {
    vec![
        format!("Revenue has shown a {} trend over the past {} years.", s.trend, s.count),
        format!("Year-over-year growth is {}%.", fixed(s.percent_change, 1)),
        format!("The compound annual growth rate (CAGR) is {}%.", fixed(s.cagr, 1)),
        format!(
            "Average revenue is {} with a standard deviation of {}.",
            grouped(s.mean, 0),
            grouped(s.std_dev, 0)
        ),
        format!(
            "This indicates {}.",
            tiered(
                s.percent_change,
                "strong market performance",
                "stable market presence",
                "challenging market conditions"
            )
        ),
    ]
}

fn net_profit_sentences(_metric: &str, s: &MetricStats) -> Vec<String> {
    vec![
        format!("Net profit has shown a {} trend over the analyzed period.", s.trend),
        format!("Year-over-year change is {}%.", fixed(s.percent_change, 1)),
        format!("The compound annual growth rate (CAGR) is {}%.", fixed(s.cagr, 1)),
        format!("Average net profit is {}.", grouped(s.mean, 0)),
        format!(
            "This suggests {}.",
            tiered(
                s.percent_change,
                "improving operational efficiency",
                "stable operations",
                "pressure on profitability"
            )
        ),
    ]
}

fn margin_sentences(metric: &str, s: &MetricStats) -> Vec<String> {
    let direction = if s.percent_change > 0.0 {
        "improving efficiency"
    } else {
        "cost pressure"
    };
    vec![
        format!("The {} has been {}.", display_name(metric), s.trend),
        format!(
            "Current margin is {}%, compared to {}% in the previous year.",
            fixed(s.latest, 1),
            fixed(s.previous, 1)
        ),
        format!(
            "Average margin is {}% with a standard deviation of {}%.",
            fixed(s.mean, 1),
            fixed(s.std_dev, 1)
        ),
        format!("This indicates {}.", direction),
    ]
}

fn eps_sentences(_metric: &str, s: &MetricStats) -> Vec<String> {
    vec![
        format!("Earnings per share (EPS) shows a {} trend.", s.trend),
        format!("Year-over-year growth is {}%.", fixed(s.percent_change, 1)),
        format!("CAGR of {}% over the period.", fixed(s.cagr, 1)),
        format!(
            "Current EPS is {}, with a historical average of {}.",
            fixed(s.latest, 2),
            fixed(s.mean, 2)
        ),
        format!(
            "This suggests {}.",
            tiered(
                s.percent_change,
                "strong shareholder value creation",
                "stable performance",
                "challenges in profitability"
            )
        ),
    ]
}

fn ratio_sentences(metric: &str, s: &MetricStats) -> Vec<String> {
    let name = display_name(metric);
    let movement = if s.percent_change > 0.0 { "increase" } else { "decrease" };
    let strength = if s.latest > s.mean { "strong" } else { "weakening" };
    vec![
        format!("The {} is currently at {}.", name, fixed(s.latest, 2)),
        format!(
            "This represents a {}% {} from the previous period.",
            fixed(s.percent_change.abs(), 1),
            movement
        ),
        format!("The historical average is {}.", fixed(s.mean, 2)),
        format!("This indicates {} {}.", strength, name),
    ]
}

fn cash_flow_sentences(metric: &str, s: &MetricStats) -> Vec<String> {
    let name = display_name(metric);
    let direction = if s.percent_change > 0.0 {
        "improving"
    } else {
        "deteriorating"
    };
    vec![
        format!("The {} shows a {} pattern.", name, s.trend),
        format!(
            "Current value is {}, a {}% change from previous year.",
            grouped(s.latest, 0),
            fixed(s.percent_change, 1)
        ),
        format!("Average {} is {}.", name, grouped(s.mean, 0)),
        format!("This suggests {} cash management.", direction),
    ]
}

fn generic_sentences(metric: &str, s: &MetricStats) -> Vec<String> {
    vec![
        format!("The {} shows a {} trend.", display_name(metric), s.trend),
        format!(
            "Current value is {}, representing a {}% change.",
            grouped(s.latest, 2),
            fixed(s.percent_change, 1)
        ),
        format!(
            "Historical average is {} with a standard deviation of {}.",
            fixed(s.mean, 2),
            fixed(s.std_dev, 2)
        ),
        format!(
            "The metric has grown at a CAGR of {}% over the period.",
            fixed(s.cagr, 1)
        ),
    ]
}

type Template = fn(&str, &MetricStats) -> Vec<String>;

fn template_for(family: MetricFamily) -> Template {
    match family {
        MetricFamily::Revenue => revenue_sentences,
        MetricFamily::NetProfit => net_profit_sentences,
        MetricFamily::Margin => margin_sentences,
        MetricFamily::Eps => eps_sentences,
        MetricFamily::Ratio => ratio_sentences,
        MetricFamily::CashFlow => cash_flow_sentences,
        MetricFamily::Generic => generic_sentences,
    }
}

/// Write a paragraph about `metric` from its annual history in the store.
pub fn generate_insight(store: &SampleStore, metric: &str) -> Result<String, AnalysisError> {
    let series = store.annual_series(metric)?;
    if series.is_empty() {
        return Ok(NO_DATA.to_string());
    }

    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let stats = MetricStats::from_values(&values)?;
    let family = MetricFamily::classify(metric);

    tracing::debug!(metric, ?family, trend = stats.trend, "Rendering computed insight");

    Ok(template_for(family)(metric, &stats).join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::FinancialRecord;
    use std::collections::BTreeMap;

    fn store_with(metric: &str, values: &[f64]) -> SampleStore {
        let data = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let year = 2019 + i as i32;
                (year, vec![FinancialRecord::new(year, "Q1").with(metric, *v)])
            })
            .collect::<BTreeMap<_, _>>();
        SampleStore::from_records(data)
    }

    #[test]
    fn test_static_insights() {
        assert!(static_insight("revenue").starts_with("Revenue has shown consistent growth"));
        assert!(static_insight("netAssets").contains("50% increase"));
        assert_eq!(static_insight("unknown_metric"), NO_INSIGHT);
        assert_eq!(
            static_insight("unknown_metric"),
            "No specific insight available for this metric."
        );
    }

    #[test]
    fn test_stats_from_values() {
        let stats = MetricStats::from_values(&[100.0, 150.0, 200.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.trend, "consistently increasing");
        assert!((stats.percent_change - 33.333).abs() < 0.001);
        assert!((stats.cagr - 41.421).abs() < 0.001);
        assert!((stats.mean - 150.0).abs() < 1e-9);
        // Population, not sample, standard deviation
        assert!((stats.std_dev - 40.8248).abs() < 1e-4);
    }

    #[test]
    fn test_stats_need_two_values() {
        assert!(matches!(
            MetricStats::from_values(&[1.0]),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_zero_previous_value_not_special_cased() {
        let stats = MetricStats::from_values(&[5.0, 0.0, 10.0]).unwrap();
        assert!(stats.percent_change.is_infinite());
    }

    #[test]
    fn test_revenue_insight_text() {
        let store = store_with("revenue", &[100.0, 120.0, 150.0]);
        let text = generate_insight(&store, "revenue").unwrap();
        assert_eq!(
            text,
            "Revenue has shown a consistently increasing trend over the past 3 years. \
             Year-over-year growth is 25.0%. \
             The compound annual growth rate (CAGR) is 22.5%. \
             Average revenue is 123 with a standard deviation of 21. \
             This indicates strong market performance."
        );
    }

    #[test]
    fn test_net_profit_qualifiers() {
        let steady = generate_insight(&store_with("net_profit", &[100.0, 105.0]), "net_profit").unwrap();
        assert!(steady.ends_with("This suggests stable operations."));

        let weak = generate_insight(&store_with("net_profit", &[100.0, 90.0]), "net_profit").unwrap();
        assert!(weak.ends_with("This suggests pressure on profitability."));
        assert!(weak.starts_with("Net profit has shown a consistently decreasing trend"));
    }

    #[test]
    fn test_margin_insight_text() {
        let store = store_with("net_profit_margin", &[10.0, 12.0, 11.0]);
        let text = generate_insight(&store, "net_profit_margin").unwrap();
        assert_eq!(
            text,
            "The net profit margin has been generally increasing. \
             Current margin is 11.0%, compared to 12.0% in the previous year. \
             Average margin is 11.0% with a standard deviation of 0.8%. \
             This indicates cost pressure."
        );
    }

    #[test]
    fn test_eps_insight_text() {
        let store = store_with("eps", &[2.0, 2.1]);
        let text = generate_insight(&store, "eps").unwrap();
        assert!(text.starts_with("Earnings per share (EPS) shows a consistently increasing trend."));
        assert!(text.contains("Current EPS is 2.10, with a historical average of 2.05."));
        assert!(text.ends_with("This suggests stable performance."));
    }

    #[test]
    fn test_ratio_insight_text() {
        let store = store_with("current_ratio", &[1.5, 1.2]);
        let text = generate_insight(&store, "current_ratio").unwrap();
        assert_eq!(
            text,
            "The current ratio is currently at 1.20. \
             This represents a 20.0% decrease from the previous period. \
             The historical average is 1.35. \
             This indicates weakening current ratio."
        );
    }

    #[test]
    fn test_cash_flow_insight_text() {
        let store = store_with("operating_cash_flow", &[40000.0, 52000.0]);
        let text = generate_insight(&store, "operating_cash_flow").unwrap();
        assert_eq!(
            text,
            "The operating cash flow shows a consistently increasing pattern. \
             Current value is 52,000, a 30.0% change from previous year. \
             Average operating cash flow is 46,000. \
             This suggests improving cash management."
        );
    }

    #[test]
    fn test_generic_insight_text() {
        let store = store_with("working_capital", &[1000.0, 1000.0]);
        let text = generate_insight(&store, "working_capital").unwrap();
        assert_eq!(
            text,
            "The working capital shows a stable trend. \
             Current value is 1,000.00, representing a 0.0% change. \
             Historical average is 1000.00 with a standard deviation of 0.00. \
             The metric has grown at a CAGR of 0.0% over the period."
        );
    }

    #[test]
    fn test_sample_store_insights() {
        let store = SampleStore::build();
        let revenue = generate_insight(&store, "revenue").unwrap();
        assert!(revenue.starts_with(
            "Revenue has shown a consistently increasing trend over the past 6 years."
        ));
        assert!(revenue.contains("Year-over-year growth is 15.0%."));
        assert!(revenue.ends_with("This indicates strong market performance."));

        let margin = generate_insight(&store, "gross_profit_margin").unwrap();
        assert!(margin.starts_with("The gross profit margin has been"));

        let growth = generate_insight(&store, "revenue_growth").unwrap();
        assert!(growth.starts_with("The revenue growth shows a"));
    }

    #[test]
    fn test_insight_errors() {
        let store = SampleStore::build();
        assert!(matches!(
            generate_insight(&store, "unknown_metric"),
            Err(AnalysisError::UnknownMetric(_))
        ));

        let single = store_with("revenue", &[100.0]);
        assert!(matches!(
            generate_insight(&single, "revenue"),
            Err(AnalysisError::InsufficientData(_))
        ));

        let empty = SampleStore::default();
        assert_eq!(generate_insight(&empty, "revenue").unwrap(), NO_DATA);
    }
}
