use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// OrderRecord – one row of the Superstore export
// ---------------------------------------------------------------------------

/// A single order line. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub customer_id: String,
    /// Customer segment, e.g. `Consumer`, `Corporate`, `Home Office`.
    pub segment: String,
    pub category: String,
    pub sub_category: String,
    /// Sales amount; always finite and non-negative.
    pub sales: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed value indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All order lines, in file order.
    pub orders: Vec<OrderRecord>,
    /// Sorted unique segments.
    pub segments: BTreeSet<String>,
    /// Sorted unique categories.
    pub categories: BTreeSet<String>,
    /// Sorted unique sub-categories.
    pub sub_categories: BTreeSet<String>,
    /// Earliest and latest order date, `None` for an empty dataset.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Build the value indices from the loaded orders.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        let mut segments = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut sub_categories = BTreeSet::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for order in &orders {
            segments.insert(order.segment.clone());
            categories.insert(order.category.clone());
            sub_categories.insert(order.sub_category.clone());
            date_bounds = Some(match date_bounds {
                None => (order.order_date, order.order_date),
                Some((lo, hi)) => (lo.min(order.order_date), hi.max(order.order_date)),
            });
        }

        Dataset {
            orders,
            segments,
            categories,
            sub_categories,
            date_bounds,
        }
    }

    /// Number of order lines.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
