//! Forecasts and prose insights over the sample financial data.
//!
//! Two forecast paths exist side by side: [`forecast::generate_forecast`] fits
//! a line to the stored history, [`forecast::compound_forecast`] compounds
//! fixed per-metric constants and never looks at stored data. Insights come
//! in a static flavour ([`insight::static_insight`]) and a computed one
//! ([`insight::generate_insight`]).

pub mod forecast;
pub mod insight;
pub mod stats;

pub use forecast::{
    compound_forecast, generate_forecast, generate_forecast_with_rng, MAX_FORECAST_YEARS,
};
pub use insight::{generate_insight, static_insight, MetricStats, NO_INSIGHT};
pub use stats::{analyze_trend, calculate_cagr, fit_linear, round_to, LinearFit};
