use serde::Serialize;

/// Known metric names grouped by category.
#[derive(Debug, Clone, Serialize)]
pub struct MetricCatalog {
    pub core_metrics: &'static [&'static str],
    pub profitability_metrics: &'static [&'static str],
    pub per_share_metrics: &'static [&'static str],
    pub liquidity_metrics: &'static [&'static str],
    pub efficiency_metrics: &'static [&'static str],
    pub debt_metrics: &'static [&'static str],
    pub growth_metrics: &'static [&'static str],
    pub balance_sheet_items: &'static [&'static str],
    pub cash_flow_items: &'static [&'static str],
    pub market_metrics: &'static [&'static str],
}

impl MetricCatalog {
    pub const fn standard() -> Self {
        Self {
            core_metrics: &[
                "revenue",
                "cost_of_sales",
                "operating_expenses",
                "profit",
                "net_profit",
            ],
            profitability_metrics: &[
                "gross_profit_margin",
                "operating_margin",
                "net_profit_margin",
                "return_on_equity",
                "return_on_assets",
            ],
            per_share_metrics: &[
                "eps",
                "dividend_per_share",
                "book_value_per_share",
                "net_asset_per_share",
            ],
            liquidity_metrics: &["current_ratio", "quick_ratio", "cash_ratio", "working_capital"],
            efficiency_metrics: &[
                "asset_turnover",
                "inventory_turnover",
                "receivables_turnover",
                "payables_turnover",
            ],
            debt_metrics: &["debt_to_equity", "debt_ratio", "interest_coverage"],
            growth_metrics: &["revenue_growth", "profit_growth", "asset_growth"],
            balance_sheet_items: &[
                "total_assets",
                "current_assets",
                "fixed_assets",
                "total_liabilities",
                "current_liabilities",
                "long_term_debt",
                "shareholders_equity",
            ],
            cash_flow_items: &[
                "operating_cash_flow",
                "investing_cash_flow",
                "financing_cash_flow",
                "free_cash_flow",
            ],
            market_metrics: &[
                "market_cap",
                "enterprise_value",
                "pe_ratio",
                "pb_ratio",
                "dividend_yield",
            ],
        }
    }
}
