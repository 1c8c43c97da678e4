use std::collections::HashSet;

use serde::Serialize;

use super::stats::{mean, sum};
use crate::data::FilteredView;

/// Headline numbers shown above the hypothesis sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_sales: f64,
    pub order_count: usize,
    pub unique_customers: usize,
    /// Mean sales per order line; 0 for an empty view.
    pub average_order_value: f64,
}

pub fn kpi_summary(view: &FilteredView<'_>) -> KpiSummary {
    let total_sales = sum(view.iter().map(|o| o.sales));
    let unique_customers = view
        .iter()
        .map(|o| o.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    KpiSummary {
        total_sales,
        order_count: view.len(),
        unique_customers,
        average_order_value: mean(total_sales, view.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{dataset, row};
    use crate::data::{apply, FilterSelection};

    #[test]
    fn summarises_view() {
        let ds = dataset(vec![
            row("2016-01-01", "AA-1", "Consumer", "Chairs", 100.0),
            row("2016-01-02", "AA-1", "Consumer", "Chairs", 50.0),
            row("2016-01-03", "BB-2", "Corporate", "Phones", 150.0),
        ]);
        let view = apply(&ds, &FilterSelection::everything(&ds));
        let kpi = kpi_summary(&view);

        assert_eq!(kpi.total_sales, 300.0);
        assert_eq!(kpi.order_count, 3);
        assert_eq!(kpi.unique_customers, 2);
        assert_eq!(kpi.average_order_value, 100.0);
    }

    #[test]
    fn empty_view_has_zero_average() {
        let ds = dataset(vec![row("2016-01-01", "AA-1", "Consumer", "Chairs", 100.0)]);
        let mut sel = FilterSelection::everything(&ds);
        sel.segments.clear();
        let kpi = kpi_summary(&apply(&ds, &sel));

        assert_eq!(kpi.order_count, 0);
        assert_eq!(kpi.unique_customers, 0);
        assert_eq!(kpi.total_sales, 0.0);
        assert_eq!(kpi.average_order_value, 0.0);
    }
}
