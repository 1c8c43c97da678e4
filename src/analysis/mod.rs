//! Aggregation pipeline: one pure function per dashboard section.
//!
//! Every function takes a [`FilteredView`](crate::data::FilteredView) and is
//! total over it: an empty view yields empty tables and zero measures.

pub mod day_of_month;
pub mod kpi;
pub mod segments;
pub mod stats;
pub mod sub_categories;

pub use day_of_month::{day_of_month_report, DayOfMonthReport};
pub use kpi::{kpi_summary, KpiSummary};
pub use segments::{segment_report, SegmentReport};
pub use sub_categories::{sub_category_report, SubCategoryReport};
