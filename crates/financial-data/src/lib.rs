//! In-memory sample financial data: quarterly statements for 2019–2024,
//! shareholder composition and the catalog of known metric names.

pub mod catalog;
pub mod derived;
pub mod shareholders;
pub mod store;

pub use catalog::MetricCatalog;
pub use derived::{gross_profit_margin, operating_margin, with_derived_metrics};
pub use shareholders::{all_shareholders, shareholders_for, Shareholder};
pub use store::{growth_multiplier, is_intensive_metric, SampleStore, FIRST_YEAR, LAST_YEAR};
