//! Superstore dashboard core.
//!
//! Loads the order export once, filters it by a [`FilterSelection`], and
//! computes the KPI summary and the three hypothesis sections as plain data.
//! Rendering is left to whatever presentation layer consumes the
//! [`DashboardReport`].

pub mod analysis;
pub mod data;
pub mod report;

pub use data::{Dataset, FilterSelection, LoadError, LoaderConfig};
pub use report::{build_report, Dashboard, DashboardReport};
