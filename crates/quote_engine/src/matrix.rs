//! Display rows of the cost/revenue breakdown.
//!
//! The matrix is an ordered list of [`MatrixRow`]s, one value per selected
//! position and an optional row total. Rows for disabled features are left
//! out entirely; the five summary rows are always appended last.

use std::fmt;

use quote_core::{ParameterSet, SelectedPosition};

use crate::allocation::CostBreakdown;
use crate::revenue::{LineTotals, RevenueBreakdown};

/// Stable identity of a matrix row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowId {
    /// Headcount per line
    Qty,
    /// Billable months
    Duration,
    /// Monthly base salary
    Base,
    /// Monthly allowances
    Allowances,
    /// Monthly statutory benefits
    Benefits,
    /// Monthly coordination
    Coordination,
    /// Monthly company overheads
    CompanyOverheads,
    /// Monthly sub-contractor share
    SubCon,
    /// Tool cost of the whole line
    Tools,
    /// Mobilization per unit
    Mobilization,
    /// Billable rate per month
    UnitBillable,
    /// Cost per billable month
    UnitCost,
    /// Contract value of the line
    LineTotal,
    /// Contract cost of the line
    TotalCost,
    /// Gross profit of the line
    GrossProfit,
}

impl RowId {
    /// Short key used in exports and lookups.
    pub fn key(&self) -> &'static str {
        match self {
            RowId::Qty => "qty",
            RowId::Duration => "duration",
            RowId::Base => "base",
            RowId::Allowances => "allow",
            RowId::Benefits => "benefits",
            RowId::Coordination => "coord",
            RowId::CompanyOverheads => "compOver",
            RowId::SubCon => "subcon",
            RowId::Tools => "tools",
            RowId::Mobilization => "mob",
            RowId::UnitBillable => "unitBill",
            RowId::UnitCost => "unitCost",
            RowId::LineTotal => "lineTotal",
            RowId::TotalCost => "totalCost",
            RowId::GrossProfit => "grossProfit",
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a row's cells should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowKind {
    /// Editable integer input (quantities)
    Input,
    /// Preformatted text
    Text,
    /// Currency amount
    Money,
}

/// Colour emphasis of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowTone {
    /// Regular text
    #[default]
    Normal,
    /// De-emphasised
    Muted,
    /// Cost figures
    Cost,
    /// Profit figures
    Profit,
}

/// One cell of a matrix row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Numeric value
    Number(f64),
    /// Preformatted text
    Text(String),
}

impl CellValue {
    /// Numeric value of the cell, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One display row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixRow {
    /// Row identity
    pub id: RowId,
    /// Display label
    pub label: String,
    /// Cell rendering
    pub kind: RowKind,
    /// One value per selected position, in roster order
    pub values: Vec<CellValue>,
    /// Row total, where one is meaningful
    pub total: Option<f64>,
    /// Bold emphasis
    pub is_bold: bool,
    /// Highlight emphasis
    pub is_highlight: bool,
    /// Colour emphasis
    pub tone: RowTone,
}

impl MatrixRow {
    fn new(id: RowId, label: impl Into<String>, kind: RowKind, values: Vec<CellValue>) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            values,
            total: None,
            is_bold: false,
            is_highlight: false,
            tone: RowTone::Normal,
        }
    }

    fn money(id: RowId, label: impl Into<String>, values: impl Iterator<Item = f64>) -> Self {
        Self::new(id, label, RowKind::Money, values.map(CellValue::Number).collect())
    }

    fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    fn highlight(mut self) -> Self {
        self.is_highlight = true;
        self
    }

    fn tone(mut self, tone: RowTone) -> Self {
        self.tone = tone;
        self
    }
}

/// Per-line results the row builder reads from.
pub(crate) struct LineView<'a> {
    pub selection: &'a SelectedPosition,
    pub cost: &'a CostBreakdown,
    pub revenue: &'a RevenueBreakdown,
    pub line: &'a LineTotals,
}

/// Global figures shown in the total column.
pub(crate) struct Totals {
    pub headcount: u32,
    pub revenue: f64,
    pub cost: f64,
    pub gross_profit: f64,
}

/// Assembles the ordered, conditionally visible rows.
pub(crate) fn build_rows(params: &ParameterSet, lines: &[LineView<'_>], totals: &Totals) -> Vec<MatrixRow> {
    let mut rows = Vec::with_capacity(15);

    rows.push(
        MatrixRow::new(
            RowId::Qty,
            "Quantity",
            RowKind::Input,
            lines.iter().map(|l| CellValue::Number(l.selection.qty_f64())).collect(),
        )
        .with_total(f64::from(totals.headcount))
        .highlight(),
    );

    let billable = lines
        .first()
        .map(|l| l.revenue.billable_months)
        .unwrap_or_else(|| crate::revenue::billable_months(params));
    rows.push(MatrixRow::new(
        RowId::Duration,
        format!("Billable Mos. (of {})", params.duration),
        RowKind::Text,
        lines.iter().map(|_| CellValue::Text(format!("{billable:.1}"))).collect(),
    ));

    rows.push(MatrixRow::money(
        RowId::Base,
        "Base Salary",
        lines.iter().map(|l| l.selection.position.base_salary),
    ));

    if params.has_allowances() {
        rows.push(MatrixRow::money(
            RowId::Allowances,
            "Total Allowances",
            lines.iter().map(|l| l.cost.monthly_allowances),
        ));
    }

    rows.push(MatrixRow::money(
        RowId::Benefits,
        "Statutory Benefits",
        lines.iter().map(|l| l.cost.monthly_benefits()),
    ));

    if params.coordination_rate > 0.0 {
        rows.push(MatrixRow::money(
            RowId::Coordination,
            format!("Coordination ({}%)", params.coordination_rate),
            lines.iter().map(|l| l.cost.coordination_cost),
        ));
    }

    if params.company_overheads.enabled {
        rows.push(MatrixRow::money(
            RowId::CompanyOverheads,
            "Company Overheads",
            lines.iter().map(|l| l.cost.company_overheads),
        ));
    }

    if params.sub_con.enabled {
        rows.push(MatrixRow::money(
            RowId::SubCon,
            "Sub-Con Alloc.",
            lines.iter().map(|l| l.cost.sub_con_alloc_per_person),
        ));
    }

    if lines.iter().any(|l| l.selection.position.has_tool_cost()) {
        let total = lines.iter().map(|l| l.cost.line_tool_cost_total).sum();
        rows.push(
            MatrixRow::money(
                RowId::Tools,
                "Tool Cost (Total)",
                lines.iter().map(|l| l.cost.line_tool_cost_total),
            )
            .with_total(total),
        );
    }

    rows.push(MatrixRow::money(
        RowId::Mobilization,
        "Mobilization (One-Off)",
        lines.iter().map(|l| l.cost.mob_cost),
    ));

    rows.push(
        MatrixRow::money(
            RowId::UnitBillable,
            "UNIT MONTHLY RATE",
            lines.iter().map(|l| l.revenue.unit_billable_monthly),
        )
        .bold()
        .highlight(),
    );
    rows.push(
        MatrixRow::money(
            RowId::UnitCost,
            "UNIT MONTHLY COST",
            lines.iter().map(|l| l.revenue.unit_cost_monthly),
        )
        .tone(RowTone::Muted),
    );
    rows.push(
        MatrixRow::money(
            RowId::LineTotal,
            "TOTAL CONTRACT VALUE",
            lines.iter().map(|l| l.line.line_total_billable),
        )
        .with_total(totals.revenue)
        .bold()
        .highlight(),
    );
    rows.push(
        MatrixRow::money(
            RowId::TotalCost,
            "TOTAL CONTRACT COST",
            lines.iter().map(|l| l.line.line_total_cost_with_bg),
        )
        .with_total(totals.cost)
        .bold()
        .tone(RowTone::Cost),
    );
    rows.push(
        MatrixRow::money(
            RowId::GrossProfit,
            "GROSS PROFIT",
            lines.iter().map(|l| l.line.line_profit),
        )
        .with_total(totals.gross_profit)
        .bold()
        .tone(RowTone::Profit),
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_keys_are_unique() {
        let ids = [
            RowId::Qty,
            RowId::Duration,
            RowId::Base,
            RowId::Allowances,
            RowId::Benefits,
            RowId::Coordination,
            RowId::CompanyOverheads,
            RowId::SubCon,
            RowId::Tools,
            RowId::Mobilization,
            RowId::UnitBillable,
            RowId::UnitCost,
            RowId::LineTotal,
            RowId::TotalCost,
            RowId::GrossProfit,
        ];
        let mut keys: Vec<_> = ids.iter().map(RowId::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ids.len());
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Number(2.0).to_string(), "2");
        assert_eq!(CellValue::Text("11.0".into()).to_string(), "11.0");
        assert_eq!(CellValue::Text("x".into()).as_f64(), None);
    }

    #[test]
    fn test_empty_roster_still_has_fixed_rows() {
        let params = ParameterSet::bare(12.0, 20.0);
        let totals = Totals {
            headcount: 0,
            revenue: 0.0,
            cost: 0.0,
            gross_profit: 0.0,
        };
        let rows = build_rows(&params, &[], &totals);
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                RowId::Qty,
                RowId::Duration,
                RowId::Base,
                RowId::Benefits,
                RowId::Mobilization,
                RowId::UnitBillable,
                RowId::UnitCost,
                RowId::LineTotal,
                RowId::TotalCost,
                RowId::GrossProfit,
            ]
        );
        assert_eq!(rows[1].label, "Billable Mos. (of 12)");
    }
}
