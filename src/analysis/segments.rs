//! H1: segment dominance in sales.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::stats::{share, sum};
use crate::data::FilteredView;

/// Sales of one segment and its share of all filtered sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentShare {
    pub segment: String,
    pub sales: f64,
    /// Fraction in `[0, 1]`; 0 for every segment when total sales are 0.
    pub share: f64,
}

/// Sales of one segment within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySegmentSales {
    /// First day of the month.
    pub month: NaiveDate,
    pub segment: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    /// One row per segment, sorted by segment name.
    pub distribution: Vec<SegmentShare>,
    /// One row per (month, segment) pair present, chronological.
    pub monthly: Vec<MonthlySegmentSales>,
}

impl SegmentReport {
    /// Monthly sales split into one chronological series per segment.
    pub fn series_by_segment(&self) -> BTreeMap<&str, Vec<(NaiveDate, f64)>> {
        let mut series: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for point in &self.monthly {
            series
                .entry(point.segment.as_str())
                .or_default()
                .push((point.month, point.sales));
        }
        series
    }

    /// Segment with the most sales, if any.
    pub fn leader(&self) -> Option<&SegmentShare> {
        self.distribution
            .iter()
            .max_by(|a, b| a.sales.total_cmp(&b.sales))
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Group by segment and by (month, segment), summing sales.
pub fn segment_report(view: &FilteredView<'_>) -> SegmentReport {
    let mut by_segment: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut by_month: BTreeMap<(NaiveDate, &str), Vec<f64>> = BTreeMap::new();

    for order in view.iter() {
        by_segment
            .entry(order.segment.as_str())
            .or_default()
            .push(order.sales);
        by_month
            .entry((month_start(order.order_date), order.segment.as_str()))
            .or_default()
            .push(order.sales);
    }

    let totals: Vec<(&str, f64)> = by_segment
        .into_iter()
        .map(|(segment, sales)| (segment, sum(sales)))
        .collect();
    let grand_total = sum(totals.iter().map(|(_, s)| *s));

    let distribution = totals
        .into_iter()
        .map(|(segment, sales)| SegmentShare {
            segment: segment.to_string(),
            sales,
            share: share(sales, grand_total),
        })
        .collect();

    let monthly = by_month
        .into_iter()
        .map(|((month, segment), sales)| MonthlySegmentSales {
            month,
            segment: segment.to_string(),
            sales: sum(sales),
        })
        .collect();

    SegmentReport {
        distribution,
        monthly,
    }
}
