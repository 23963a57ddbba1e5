//! Full-roster aggregation.
//!
//! [`calculate_quotation`] runs the allocator and the inverter over every
//! roster line, sums contract totals and category stats, and assembles the
//! display matrix and the detailed breakdown. It is pure and recomputes
//! everything on each call.

use quote_core::{ParameterSet, SelectedPosition};
use tracing::debug;

use crate::allocation::{AllocationContext, CostAllocator, CostBreakdown};
use crate::matrix::{build_rows, LineView, Totals};
use crate::result::{CalculationResult, CategoryStats, DetailedBreakdownRow};
use crate::revenue::{LineTotals, RevenueBreakdown, RevenueInverter};

/// Cost, revenue and line totals of one roster line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCalculation {
    /// Per-person cost components
    pub cost: CostBreakdown,
    /// Per-person revenue figures
    pub revenue: RevenueBreakdown,
    /// Whole-line totals
    pub line: LineTotals,
}

/// Computes one line under a snapshot.
pub fn calculate_line(
    allocator: &CostAllocator<'_>,
    inverter: &RevenueInverter<'_>,
    selection: &SelectedPosition,
) -> LineCalculation {
    let cost = allocator.allocate(&selection.position, selection.qty);
    let revenue = inverter.invert(cost.cost_per_person);
    let line = revenue.line_totals(cost.cost_per_person, selection.qty);
    LineCalculation { cost, revenue, line }
}

/// Computes the full quotation for a snapshot and roster.
///
/// # Examples
///
/// ```
/// use quote_core::{ParameterSet, Position, SelectionList};
/// use quote_engine::calculate_quotation;
///
/// let params = ParameterSet::bare(12.0, 20.0);
/// let mut roster = SelectionList::new();
/// roster.add(Position::new("Inspector", 5000.0, None), 1);
///
/// let result = calculate_quotation(&params, roster.as_slice());
/// assert_eq!(result.total_revenue, 75_000.0);
/// assert_eq!(result.gross_profit, 15_000.0);
/// ```
pub fn calculate_quotation(params: &ParameterSet, positions: &[SelectedPosition]) -> CalculationResult {
    let context = AllocationContext::from_selection(params, positions);
    let allocator = CostAllocator::new(params, context);
    let inverter = RevenueInverter::new(params);

    let lines: Vec<LineCalculation> = positions
        .iter()
        .map(|selection| calculate_line(&allocator, &inverter, selection))
        .collect();

    let mut total_revenue = 0.0;
    let mut total_cost = 0.0;
    let mut stats = CategoryStats::default();
    let mut detailed_breakdown = Vec::with_capacity(positions.len());

    for (selection, calc) in positions.iter().zip(&lines) {
        let qty = selection.qty_f64();
        let cost = &calc.cost;
        let revenue = &calc.revenue;

        total_revenue += calc.line.line_total_billable;
        total_cost += calc.line.line_total_cost_operational + revenue.bg_cost * qty;

        stats.salary += cost.total_base * qty;
        stats.allow += cost.total_allowances * qty;
        stats.benefits += cost.total_benefits * qty;
        stats.company_overheads += cost.total_company_overheads * qty;
        stats.sub_con_alloc += cost.total_sub_con * qty;
        stats.coordination += cost.total_coordination * qty;
        stats.financials += revenue.bg_cost * qty + cost.total_one_off_per_person * qty;

        detailed_breakdown.push(DetailedBreakdownRow {
            position: selection.name().to_string(),
            qty: selection.qty,
            duration: params.duration,
            working_days: params.working_days,
            base_salary: cost.total_base,
            allowances_total: cost.total_allowances,
            benefits_total: cost.total_benefits,
            company_overheads_total: cost.total_company_overheads,
            sub_con_alloc_total: cost.total_sub_con,
            coordination_total: cost.total_coordination,
            one_off_total: cost.total_one_off_per_person,
            total_cost: cost.cost_per_person + revenue.bg_cost,
            target_margin: params.margin,
            bg_rate: params.bank_guarantee_rate,
            unit_rate: revenue.unit_billable_monthly,
            revenue: revenue.final_revenue,
            profit: calc.line.line_profit,
        });
    }

    let gross_profit = total_revenue - total_cost;
    let margin_percent = if total_revenue > 0.0 {
        gross_profit / total_revenue * 100.0
    } else {
        0.0
    };

    let views: Vec<LineView<'_>> = positions
        .iter()
        .zip(&lines)
        .map(|(selection, calc)| LineView {
            selection,
            cost: &calc.cost,
            revenue: &calc.revenue,
            line: &calc.line,
        })
        .collect();
    let totals = Totals {
        headcount: context.total_headcount,
        revenue: total_revenue,
        cost: total_cost,
        gross_profit,
    };
    let rows = build_rows(params, &views, &totals);

    debug!(
        lines = positions.len(),
        headcount = context.total_headcount,
        billable_months = inverter.billable_months(),
        total_revenue,
        total_cost,
        margin_percent,
        "Quotation recomputed"
    );

    CalculationResult {
        total_revenue,
        total_cost,
        gross_profit,
        margin_percent,
        stats,
        rows,
        detailed_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RowId;
    use approx::assert_relative_eq;
    use quote_core::{Position, SelectionList, Toggle};

    fn roster(entries: &[(&str, f64, Option<f64>, u32)]) -> Vec<SelectedPosition> {
        let mut list = SelectionList::new();
        for (name, salary, tool, qty) in entries {
            list.add(Position::new(*name, *salary, *tool), *qty);
        }
        list.into_lines()
    }

    #[test]
    fn test_stats_scale_with_quantity() {
        let mut params = ParameterSet::bare(12.0, 0.0);
        params.mobilization = Toggle::on(1000.0);
        let positions = roster(&[("Fitter", 4000.0, Some(500.0), 2)]);

        let result = calculate_quotation(&params, &positions);

        assert_relative_eq!(result.stats.salary, 4000.0 * 12.0 * 2.0);
        assert_relative_eq!(result.stats.financials, 1500.0 * 2.0);
        assert_relative_eq!(result.stats.total(), result.total_cost);
    }

    #[test]
    fn test_detailed_breakdown_per_line() {
        let params = ParameterSet::bare(12.0, 20.0);
        let positions = roster(&[("Fitter", 4000.0, None, 2), ("Rigger", 3000.0, None, 1)]);

        let result = calculate_quotation(&params, &positions);

        assert_eq!(result.detailed_breakdown.len(), 2);
        let fitter = &result.detailed_breakdown[0];
        assert_eq!(fitter.position, "Fitter");
        assert_eq!(fitter.qty, 2);
        assert_relative_eq!(fitter.total_cost, 48_000.0);
        assert_relative_eq!(fitter.revenue, 60_000.0);
        assert_relative_eq!(fitter.profit, 24_000.0);
        assert_relative_eq!(fitter.unit_rate, 5_000.0);
    }

    #[test]
    fn test_quantity_row_total_is_headcount() {
        let params = ParameterSet::bare(12.0, 20.0);
        let positions = roster(&[("Fitter", 4000.0, None, 2), ("Rigger", 3000.0, None, 3)]);

        let result = calculate_quotation(&params, &positions);
        let qty = result.row(RowId::Qty).map(|r| r.total);

        assert_eq!(qty, Some(Some(5.0)));
    }
}
