//! H3: sub-categories stuck in the bottom quartile of sales.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{quantile, share, sum};
use crate::data::FilteredView;

/// Quantile that separates the low tier from the rest.
pub const LOW_TIER_QUANTILE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategorySales {
    pub sub_category: String,
    pub sales: f64,
}

/// Aggregate of one performance tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
    pub sub_categories: Vec<SubCategorySales>,
    pub sales: f64,
    /// Share of all filtered sales; 0 when those are 0.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryReport {
    /// 25th percentile of per-sub-category sales; `None` when nothing was sold.
    pub threshold: Option<f64>,
    /// Sub-categories strictly below the threshold, by name.
    pub low: TierSummary,
    /// Sub-categories at or above the threshold, by name.
    pub high: TierSummary,
    /// Every sub-category, best seller first.
    pub ranking: Vec<SubCategorySales>,
}

fn tier(sub_categories: Vec<SubCategorySales>, grand_total: f64) -> TierSummary {
    let sales = sum(sub_categories.iter().map(|s| s.sales));
    TierSummary {
        sub_categories,
        sales,
        share: share(sales, grand_total),
    }
}

pub fn sub_category_report(view: &FilteredView<'_>) -> SubCategoryReport {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for order in view.iter() {
        grouped
            .entry(order.sub_category.as_str())
            .or_default()
            .push(order.sales);
    }

    let totals: Vec<SubCategorySales> = grouped
        .into_iter()
        .map(|(name, sales)| SubCategorySales {
            sub_category: name.to_string(),
            sales: sum(sales),
        })
        .collect();

    let sums: Vec<f64> = totals.iter().map(|s| s.sales).collect();
    let grand_total = sum(sums.iter().copied());
    let threshold = quantile(&sums, LOW_TIER_QUANTILE);

    let mut ranking = totals.clone();
    ranking.sort_by(|a, b| {
        b.sales
            .total_cmp(&a.sales)
            .then_with(|| a.sub_category.cmp(&b.sub_category))
    });

    let (low, high): (Vec<_>, Vec<_>) = match threshold {
        Some(th) => totals.into_iter().partition(|s| s.sales < th),
        None => (Vec::new(), Vec::new()),
    };

    SubCategoryReport {
        threshold,
        low: tier(low, grand_total),
        high: tier(high, grand_total),
        ranking,
    }
}
