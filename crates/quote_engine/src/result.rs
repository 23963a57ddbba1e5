//! Output types of a quotation recompute.

use crate::matrix::{MatrixRow, RowId};

/// Contract totals by cost category, over all lines and the full duration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryStats {
    /// Base salaries
    pub salary: f64,
    /// Allowances
    pub allow: f64,
    /// Statutory benefits
    pub benefits: f64,
    /// Company overheads
    pub company_overheads: f64,
    /// Sub-contractor allocation
    pub sub_con_alloc: f64,
    /// Coordination
    pub coordination: f64,
    /// Guarantee cost plus one-off costs
    pub financials: f64,
}

impl CategoryStats {
    /// Sum of every category.
    pub fn total(&self) -> f64 {
        self.salary
            + self.allow
            + self.benefits
            + self.company_overheads
            + self.sub_con_alloc
            + self.coordination
            + self.financials
    }
}

/// Flat per-line record for reports and exports.
///
/// Component totals are per person over the contract duration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailedBreakdownRow {
    /// Job title
    pub position: String,
    /// Line headcount
    pub qty: u32,
    /// Contract duration in months
    pub duration: f64,
    /// Working days per month as entered
    pub working_days: f64,
    /// Base salary total
    pub base_salary: f64,
    /// Allowances total
    pub allowances_total: f64,
    /// Statutory benefits total
    pub benefits_total: f64,
    /// Company overheads total
    pub company_overheads_total: f64,
    /// Sub-contractor allocation total
    pub sub_con_alloc_total: f64,
    /// Coordination total
    pub coordination_total: f64,
    /// One-off costs per person
    pub one_off_total: f64,
    /// Cost per person including guarantee cost
    pub total_cost: f64,
    /// Target margin percent
    pub target_margin: f64,
    /// Bank guarantee rate percent
    pub bg_rate: f64,
    /// Billable rate per month
    pub unit_rate: f64,
    /// Revenue per person
    pub revenue: f64,
    /// Profit of the whole line
    pub profit: f64,
}

/// Result of one full recompute.
///
/// Consumers treat this as read-only: every derived figure is already
/// present.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculationResult {
    /// Contract value
    pub total_revenue: f64,
    /// Contract cost including guarantee cost
    pub total_cost: f64,
    /// Revenue minus cost
    pub gross_profit: f64,
    /// Gross profit as a percentage of revenue, zero without revenue
    pub margin_percent: f64,
    /// Totals by cost category
    pub stats: CategoryStats,
    /// Display rows in order
    pub rows: Vec<MatrixRow>,
    /// One record per roster line
    pub detailed_breakdown: Vec<DetailedBreakdownRow>,
}

impl CalculationResult {
    /// Looks up a display row; `None` when the row is hidden.
    pub fn row(&self, id: RowId) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Whether a display row is present.
    pub fn has_row(&self, id: RowId) -> bool {
        self.row(id).is_some()
    }
}
