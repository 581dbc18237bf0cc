use analysis_core::FinancialRecord;

type MarginFn = fn(f64, f64) -> Option<f64>;

/// `(revenue - cost_of_sales) / revenue * 100`, or `None` for zero revenue.
pub fn gross_profit_margin(revenue: f64, cost_of_sales: f64) -> Option<f64> {
    if revenue != 0.0 {
        Some(((revenue - cost_of_sales) / revenue) * 100.0)
    } else {
        None
    }
}

/// `(revenue - operating_expenses) / revenue * 100`, or `None` for zero revenue.
pub fn operating_margin(revenue: f64, operating_expenses: f64) -> Option<f64> {
    if revenue != 0.0 {
        Some(((revenue - operating_expenses) / revenue) * 100.0)
    } else {
        None
    }
}

/// Copy of `record` with `gross_profit_margin` and `operating_margin` added
/// wherever their inputs are reported. A record without the inputs comes back
/// unchanged.
pub fn with_derived_metrics(record: &FinancialRecord) -> FinancialRecord {
    let mut out = record.clone();
    let Some(revenue) = record.value("revenue") else {
        return out;
    };

    let derived: [(&str, &str, MarginFn); 2] = [
        ("gross_profit_margin", "cost_of_sales", gross_profit_margin),
        ("operating_margin", "operating_expenses", operating_margin),
    ];

    for (name, input, formula) in derived {
        let Some(cost) = record.value(input) else {
            continue;
        };
        match formula(revenue, cost) {
            Some(margin) => {
                out.metrics.insert(name.to_string(), Some(margin));
            }
            None => tracing::warn!(
                year = record.year,
                quarter = %record.quarter,
                metric = name,
                "Zero revenue, derived margin skipped"
            ),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_added() {
        let record = FinancialRecord::new(2019, "Q1")
            .with("revenue", 200000.0)
            .with("cost_of_sales", 130000.0)
            .with("operating_expenses", 40000.0);

        let out = with_derived_metrics(&record);
        assert_eq!(out.value("gross_profit_margin"), Some(35.0));
        assert_eq!(out.value("operating_margin"), Some(80.0));
        // Base fields untouched
        assert_eq!(out.value("revenue"), Some(200000.0));
    }

    #[test]
    fn test_partial_inputs() {
        let record = FinancialRecord::new(2019, "Q1")
            .with("revenue", 100.0)
            .with("cost_of_sales", 60.0);

        let out = with_derived_metrics(&record);
        assert_eq!(out.value("gross_profit_margin"), Some(40.0));
        assert!(!out.has_metric("operating_margin"));
    }

    #[test]
    fn test_record_without_inputs_unchanged() {
        let record = FinancialRecord::new(2019, "Q1").with("eps", 1.2);
        assert_eq!(with_derived_metrics(&record), record);

        let missing = FinancialRecord::new(2019, "Q1")
            .with_missing("revenue")
            .with("cost_of_sales", 10.0);
        assert_eq!(with_derived_metrics(&missing), missing);
    }

    #[test]
    fn test_zero_revenue_guarded() {
        assert_eq!(gross_profit_margin(0.0, 10.0), None);
        assert_eq!(operating_margin(0.0, 10.0), None);

        let record = FinancialRecord::new(2019, "Q1")
            .with("revenue", 0.0)
            .with("cost_of_sales", 10.0);
        let out = with_derived_metrics(&record);
        assert!(!out.has_metric("gross_profit_margin"));
    }
}
