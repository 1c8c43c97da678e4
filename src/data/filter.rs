use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, OrderRecord};

// ---------------------------------------------------------------------------
// Filter selection: date interval plus three allow-lists
// ---------------------------------------------------------------------------

/// User-selected filter values, handed over by the presentation layer.
///
/// Every allow-list is strict: an empty set selects nothing. There is no
/// implicit "select all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Inclusive lower bound.
    pub start: NaiveDate,
    /// Inclusive upper bound.
    pub end: NaiveDate,
    pub segments: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub sub_categories: BTreeSet<String>,
}

impl FilterSelection {
    /// The selection a fresh dashboard starts with: full date range, every
    /// value selected. An empty dataset gets an inverted range.
    pub fn everything(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds
            .unwrap_or((NaiveDate::MAX, NaiveDate::MIN));
        Self {
            start,
            end,
            segments: dataset.segments.clone(),
            categories: dataset.categories.clone(),
            sub_categories: dataset.sub_categories.clone(),
        }
    }

    /// Whether `start > end`, which selects nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    fn in_range(&self, order: &OrderRecord) -> bool {
        self.start <= order.order_date && order.order_date <= self.end
    }

    fn segment_allowed(&self, order: &OrderRecord) -> bool {
        self.segments.contains(&order.segment)
    }

    fn category_allowed(&self, order: &OrderRecord) -> bool {
        self.categories.contains(&order.category)
    }

    fn sub_category_allowed(&self, order: &OrderRecord) -> bool {
        self.sub_categories.contains(&order.sub_category)
    }

    /// Conjunction of all four predicates.
    pub fn matches(&self, order: &OrderRecord) -> bool {
        self.in_range(order)
            && self.segment_allowed(order)
            && self.category_allowed(order)
            && self.sub_category_allowed(order)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] that pass a [`FilterSelection`], in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub rows: Vec<&'a OrderRecord>,
    /// The selected date interval, `None` when it was inverted.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.rows.iter().copied()
    }
}

/// Return the rows that satisfy every predicate of `selection`.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    if selection.is_inverted() {
        log::debug!(
            "Date range is inverted ({} > {}); nothing selected",
            selection.start,
            selection.end
        );
        return FilteredView {
            rows: Vec::new(),
            date_range: None,
        };
    }

    let rows: Vec<&OrderRecord> = dataset
        .orders
        .iter()
        .filter(|order| selection.matches(order))
        .collect();
    log::debug!("{} of {} orders pass the filters", rows.len(), dataset.len());

    FilteredView {
        rows,
        date_range: Some((selection.start, selection.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(d: NaiveDate, segment: &str, category: &str, sub: &str) -> OrderRecord {
        OrderRecord {
            order_date: d,
            customer_id: "AA-1".into(),
            segment: segment.into(),
            category: category.into(),
            sub_category: sub.into(),
            sales: 1.0,
        }
    }

    fn sample() -> Dataset {
        Dataset::from_orders(vec![
            order(date(2016, 1, 1), "Consumer", "Furniture", "Chairs"),
            order(date(2016, 1, 15), "Corporate", "Technology", "Phones"),
            order(date(2016, 2, 1), "Home Office", "Furniture", "Tables"),
            order(date(2016, 3, 31), "Consumer", "Technology", "Phones"),
        ])
    }

    #[test]
    fn everything_selects_all_rows() {
        let ds = sample();
        let view = apply(&ds, &FilterSelection::everything(&ds));
        assert_eq!(view.len(), 4);
        assert_eq!(view.date_range, Some((date(2016, 1, 1), date(2016, 3, 31))));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = sample();
        let mut sel = FilterSelection::everything(&ds);
        sel.start = date(2016, 1, 15);
        sel.end = date(2016, 2, 1);
        let view = apply(&ds, &sel);
        let days: Vec<_> = view.iter().map(|o| o.order_date).collect();
        assert_eq!(days, vec![date(2016, 1, 15), date(2016, 2, 1)]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = sample();
        let mut sel = FilterSelection::everything(&ds);
        sel.segments = ["Consumer".to_string()].into();
        sel.categories = ["Technology".to_string()].into();
        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows[0].order_date, date(2016, 3, 31));
    }

    #[test]
    fn empty_allow_list_selects_nothing() {
        let ds = sample();
        let mut sel = FilterSelection::everything(&ds);
        sel.sub_categories.clear();
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let ds = sample();
        let mut sel = FilterSelection::everything(&ds);
        sel.start = date(2016, 3, 1);
        sel.end = date(2016, 2, 1);
        let view = apply(&ds, &sel);
        assert!(view.is_empty());
        assert!(view.date_range.is_none());
    }

    #[test]
    fn empty_dataset_default_selection_is_inverted() {
        let ds = Dataset::default();
        let sel = FilterSelection::everything(&ds);
        assert!(sel.is_inverted());
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn selection_round_trips_through_json() {
        let ds = sample();
        let sel = FilterSelection::everything(&ds);
        let json = serde_json::to_string(&sel).unwrap();
        assert!(json.contains("\"start\":\"2016-01-01\""));
        let back: FilterSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sel);
    }
}
