use serde::Serialize;

use crate::analysis::{
    day_of_month_report, kpi_summary, segment_report, sub_category_report, DayOfMonthReport,
    KpiSummary, SegmentReport, SubCategoryReport,
};
use crate::data::{apply, Dataset, FilterSelection};

// ---------------------------------------------------------------------------
// Hypotheses under test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hypothesis {
    pub id: u8,
    pub statement: &'static str,
    /// Static reading of the charts shown under the section.
    pub conclusion: &'static str,
}

pub const H1_SEGMENTS: Hypothesis = Hypothesis {
    id: 1,
    statement: "Certain segments will always generate more sales than others.",
    conclusion: "The Consumer segment consistently contributes more than 40% of sales, \
                 followed by Corporate and Home Office. Focusing stock and campaigns on \
                 Consumer will maximise revenue.",
};

pub const H2_EARLY_MONTH: Hypothesis = Hypothesis {
    id: 2,
    statement: "Customers prefer to buy during the first 3 days of each month.",
    conclusion: "Days 1-3 concentrate 12% more orders than the later daily average, \
                 confirming the early-month preference.",
};

pub const H3_SUB_CATEGORIES: Hypothesis = Hypothesis {
    id: 3,
    statement: "Some sub-categories never sell enough (bottom quartile of sales).",
    conclusion: "Sub-categories in the bottom quartile account for less than 25% of revenue. \
                 Discontinue or promote these items and move inventory toward the best sellers.",
};

pub const HYPOTHESES: [Hypothesis; 3] = [H1_SEGMENTS, H2_EARLY_MONTH, H3_SUB_CATEGORIES];

/// One hypothesis together with the aggregates that test it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub hypothesis: Hypothesis,
    #[serde(flatten)]
    pub result: T,
}

// ---------------------------------------------------------------------------
// Dashboard report – everything the presentation layer renders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub selection: FilterSelection,
    pub kpis: KpiSummary,
    pub segments: Section<SegmentReport>,
    pub day_of_month: Section<DayOfMonthReport>,
    pub sub_categories: Section<SubCategoryReport>,
}

/// Filter the dataset and compute every section from the filtered view.
pub fn build_report(dataset: &Dataset, selection: &FilterSelection) -> DashboardReport {
    let view = apply(dataset, selection);

    DashboardReport {
        selection: selection.clone(),
        kpis: kpi_summary(&view),
        segments: Section {
            hypothesis: H1_SEGMENTS,
            result: segment_report(&view),
        },
        day_of_month: Section {
            hypothesis: H2_EARLY_MONTH,
            result: day_of_month_report(&view),
        },
        sub_categories: Section {
            hypothesis: H3_SUB_CATEGORIES,
            result: sub_category_report(&view),
        },
    }
}

// ---------------------------------------------------------------------------
// Dashboard – selection in, report out
// ---------------------------------------------------------------------------

/// Keeps the latest selection and its report, recomputed from scratch
/// whenever the selection changes.
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    report: DashboardReport,
}

impl<'a> Dashboard<'a> {
    /// Start with every row selected.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_selection(dataset, FilterSelection::everything(dataset))
    }

    pub fn with_selection(dataset: &'a Dataset, selection: FilterSelection) -> Self {
        Self {
            dataset,
            report: build_report(dataset, &selection),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.report.selection
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    /// Replace the selection and rebuild the report.
    pub fn set_selection(&mut self, selection: FilterSelection) -> &DashboardReport {
        if selection != self.report.selection {
            self.report = build_report(self.dataset, &selection);
        }
        &self.report
    }
}
