//! H2: early-month purchasing bias.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::stats::mean;
use crate::data::FilteredView;

/// Last day of the month that still counts as "early".
pub const EARLY_MONTH_LAST_DAY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPartition {
    /// Days 1 through 3.
    Early,
    /// Days 4 through 31.
    Rest,
}

impl DayPartition {
    pub fn of(day: u32) -> Self {
        if day <= EARLY_MONTH_LAST_DAY {
            DayPartition::Early
        } else {
            DayPartition::Rest
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPartition::Early => "Days 1-3",
            DayPartition::Rest => "Days 4-31",
        }
    }
}

/// Number of order lines placed on a given day-of-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: u32,
    pub orders: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionStats {
    pub partition: DayPartition,
    pub orders: usize,
    /// Distinct order dates in the view that fall in this partition.
    pub calendar_days: usize,
    /// `orders / calendar_days`, 0 when there are no such days.
    pub daily_mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOfMonthReport {
    /// Observed days only, ascending.
    pub per_day: Vec<DayCount>,
    pub early: PartitionStats,
    pub rest: PartitionStats,
}

/// Count distinct order dates in the view per partition.
pub fn observed_days_by_partition(view: &FilteredView<'_>) -> (usize, usize) {
    let dates: BTreeSet<NaiveDate> = view.iter().map(|o| o.order_date).collect();
    dates
        .into_iter()
        .fold((0, 0), |(early, rest), d| match DayPartition::of(d.day()) {
            DayPartition::Early => (early + 1, rest),
            DayPartition::Rest => (early, rest + 1),
        })
}

/// Orders per day-of-month, and early vs rest totals and daily means.
///
/// The daily mean divides by the number of distinct order dates observed in
/// that partition, so it depends on the filtered rows only.
pub fn day_of_month_report(view: &FilteredView<'_>) -> DayOfMonthReport {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for order in view.iter() {
        *counts.entry(order.order_date.day()).or_default() += 1;
    }

    let (mut early_orders, mut rest_orders) = (0, 0);
    for (&day, &n) in &counts {
        match DayPartition::of(day) {
            DayPartition::Early => early_orders += n,
            DayPartition::Rest => rest_orders += n,
        }
    }

    let (early_days, rest_days) = observed_days_by_partition(view);

    DayOfMonthReport {
        per_day: counts
            .into_iter()
            .map(|(day, orders)| DayCount { day, orders })
            .collect(),
        early: PartitionStats {
            partition: DayPartition::Early,
            orders: early_orders,
            calendar_days: early_days,
            daily_mean: mean(early_orders as f64, early_days),
        },
        rest: PartitionStats {
            partition: DayPartition::Rest,
            orders: rest_orders,
            calendar_days: rest_days,
            daily_mean: mean(rest_orders as f64, rest_days),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{dataset, row};
    use crate::data::{apply, FilterSelection, OrderRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn orders_on(day: &str, n: usize) -> Vec<OrderRecord> {
        (0..n)
            .map(|_| row(day, "AA-1", "Consumer", "Chairs", 1.0))
            .collect()
    }

    #[test]
    fn one_full_month() {
        let mut rows = Vec::new();
        rows.extend(orders_on("2016-11-01", 5));
        rows.extend(orders_on("2016-11-02", 5));
        rows.extend(orders_on("2016-11-03", 5));
        rows.extend(orders_on("2016-11-15", 10));
        let ds = dataset(rows);

        let mut sel = FilterSelection::everything(&ds);
        sel.start = date(2016, 11, 1);
        sel.end = date(2016, 11, 30);
        let report = day_of_month_report(&apply(&ds, &sel));

        assert_eq!(
            report.per_day,
            vec![
                DayCount { day: 1, orders: 5 },
                DayCount { day: 2, orders: 5 },
                DayCount { day: 3, orders: 5 },
                DayCount { day: 15, orders: 10 },
            ]
        );
        assert_eq!(report.early.orders, 15);
        assert_eq!(report.rest.orders, 10);
        assert_eq!(report.early.calendar_days, 3);
        assert_eq!(report.rest.calendar_days, 1);
        assert_eq!(report.early.daily_mean, 5.0);
        assert_eq!(report.rest.daily_mean, 10.0);
    }

    #[test]
    fn days_without_orders_are_not_counted() {
        // Two orders on Jan 30, one each on Feb 2 and Mar 1, none in between.
        let mut rows = orders_on("2016-01-30", 2);
        rows.extend(orders_on("2016-02-02", 1));
        rows.extend(orders_on("2016-03-01", 1));
        let ds = dataset(rows);
        let mut sel = FilterSelection::everything(&ds);
        sel.start = date(2016, 1, 1);
        sel.end = date(2016, 3, 31);
        let view = apply(&ds, &sel);

        assert_eq!(observed_days_by_partition(&view), (2, 1));
        let report = day_of_month_report(&view);
        assert_eq!(report.early.daily_mean, 1.0);
        assert_eq!(report.rest.daily_mean, 2.0);
    }

    #[test]
    fn widest_possible_range_stays_cheap() {
        let ds = dataset(orders_on("2017-05-04", 3));
        let mut sel = FilterSelection::everything(&ds);
        sel.start = NaiveDate::MIN;
        sel.end = NaiveDate::MAX;
        let report = day_of_month_report(&apply(&ds, &sel));

        assert_eq!(report.early.calendar_days, 0);
        assert_eq!(report.rest.calendar_days, 1);
        assert_eq!(report.rest.daily_mean, 3.0);
    }

    #[test]
    fn empty_view_is_all_zero() {
        let ds = dataset(orders_on("2016-11-01", 2));
        let mut sel = FilterSelection::everything(&ds);
        sel.start = date(2016, 12, 1);
        sel.end = date(2016, 11, 1);
        let report = day_of_month_report(&apply(&ds, &sel));

        assert!(report.per_day.is_empty());
        assert_eq!(report.early.orders, 0);
        assert_eq!(report.early.daily_mean, 0.0);
        assert_eq!(report.rest.calendar_days, 0);
        assert_eq!(report.rest.daily_mean, 0.0);
    }

    #[test]
    fn partition_boundary() {
        assert_eq!(DayPartition::of(3), DayPartition::Early);
        assert_eq!(DayPartition::of(4), DayPartition::Rest);
        assert_eq!(DayPartition::Early.label(), "Days 1-3");
    }
}
