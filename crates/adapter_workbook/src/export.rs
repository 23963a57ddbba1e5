//! Workbook exports.
//!
//! Master data is written in the exact shape [`ingest_workbook`] reads, so
//! an export re-ingests to the same catalog and parameters.
//!
//! [`ingest_workbook`]: crate::ingest::ingest_workbook

use chrono::NaiveDate;
use quote_core::currency::format_percent;
use quote_core::{Client, ParameterSet, PositionCatalog};
use quote_engine::CalculationResult;

use crate::clients::CLIENTS_SHEET;
use crate::parameters::PARAMETERS_SHEET;
use crate::workbook::{Cell, Sheet, Workbook};

/// Sheet the master-data export writes positions to.
pub const MASTER_POSITIONS_SHEET: &str = "Reference Salary (A)";
/// P&L statement sheet.
pub const PNL_SHEET: &str = "Project P&L Statement";
/// Per-line breakdown sheet.
pub const DETAILED_MATRIX_SHEET: &str = "Detailed Matrix";

/// Column headers of the detailed matrix.
pub const DETAILED_MATRIX_HEADERS: [&str; 17] = [
    "Position Title",
    "Qty",
    "Duration",
    "Working Days",
    "Base Salary",
    "Allowances",
    "Benefits",
    "Co. Overheads",
    "SubCon Alloc",
    "Coordination",
    "One-Offs",
    "Total Cost",
    "Target Margin %",
    "Bank Guarantee %",
    "Unit Monthly Rate",
    "Total Revenue",
    "Net Profit",
];

fn text_row(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|c| Cell::from(*c)).collect()
}

fn param_row(name: &str, value: f64, enabled: bool) -> Vec<Cell> {
    vec![name.into(), value.into(), enabled.into()]
}

/// Parameter rows using the key strings the ingestion rules recognise.
fn parameter_rows(params: &ParameterSet) -> Vec<Vec<Cell>> {
    let overheads = &params.company_overheads;
    let sub_con = &params.sub_con;
    vec![
        text_row(&["Parameter", "Value", "Enabled"]),
        param_row("Duration", params.duration, true),
        param_row("Working Days", params.working_days, true),
        param_row("Annual Leave Days", params.leave.value, params.leave.enabled),
        param_row("Sick Leave Days", params.sick.value, params.sick.enabled),
        param_row("Public Holidays", params.holiday.value, params.holiday.enabled),
        param_row("EOSB Days", params.eosb.value, params.eosb.enabled),
        param_row("Insurance Rate %", params.insurance.value, params.insurance.enabled),
        param_row("HRA / Accom.", params.hra.value, params.hra.enabled),
        param_row("Food Allow.", params.food.value, params.food.enabled),
        param_row("Transport Allow.", params.transport.value, params.transport.enabled),
        param_row("Others Allow.", params.others.value, params.others.enabled),
        param_row("Mob/Demob Cost", params.mobilization.value, params.mobilization.enabled),
        param_row("company_accommodation", overheads.accommodation, overheads.enabled),
        param_row("transport_fees", overheads.transport, overheads.enabled),
        param_row("fuel_expense", overheads.fuel, overheads.enabled),
        param_row("medical_insurance_per_month", overheads.medical, overheads.enabled),
        param_row("air_ticket_per_annum", overheads.air_ticket, overheads.enabled),
        param_row("visa_cost", overheads.visa, overheads.enabled),
        param_row("ppe", overheads.ppe, overheads.enabled),
        param_row("gate_pass", overheads.gate_pass, overheads.enabled),
        param_row("bank_guarantee_charges", params.bank_guarantee_rate, true),
        param_row("coordination_cost", params.coordination_rate, true),
        param_row("subcon_manpower", sub_con.manpower, sub_con.enabled),
        param_row("subcon_equip", sub_con.equipment, sub_con.enabled),
        param_row("margin", params.margin, true),
    ]
}

/// Exports positions, clients and parameters as a re-ingestable workbook.
///
/// Positions carry a zero quantity column so the file can be filled in and
/// imported as a pre-selected roster.
pub fn export_master_data(catalog: &PositionCatalog, clients: &[Client], params: &ParameterSet) -> Workbook {
    let mut positions = Sheet::new(MASTER_POSITIONS_SHEET);
    positions.push_row(text_row(&["Position Title", "Basic Salary", "Tools Cost", "Qty"]));
    for position in catalog {
        positions.push_row(vec![
            position.name.as_str().into(),
            position.base_salary.into(),
            position.tool_cost_unit().into(),
            0.0.into(),
        ]);
    }

    let mut client_sheet = Sheet::new(CLIENTS_SHEET);
    client_sheet.push_row(text_row(&["Client Name", "Address", "Attention"]));
    for client in clients {
        client_sheet.push_row(vec![
            client.name.as_str().into(),
            client.address.as_str().into(),
            client.attention.as_str().into(),
        ]);
    }

    let mut workbook = Workbook::new();
    workbook.add_sheet(positions);
    workbook.add_sheet(client_sheet);
    workbook.add_sheet(Sheet::from_rows(PARAMETERS_SHEET, parameter_rows(params)));
    workbook
}

/// Empty master-data workbook carrying the template parameters.
pub fn blank_template() -> Workbook {
    export_master_data(&PositionCatalog::new(), &[], &ParameterSet::template())
}

/// Header fields of the P&L statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportHeader {
    /// Quotation reference
    pub reference: String,
    /// Client name
    pub client: String,
    /// Contract duration in months
    pub duration: f64,
    /// Report date
    pub date: NaiveDate,
}

fn share_of_revenue(amount: f64, revenue: f64) -> String {
    if revenue > 0.0 {
        format_percent(amount / revenue * 100.0)
    } else {
        format_percent(0.0)
    }
}

/// Exports the P&L statement and the detailed matrix of a result.
pub fn export_profit_and_loss(result: &CalculationResult, header: &ReportHeader) -> Workbook {
    let revenue = result.total_revenue;
    let stats = &result.stats;
    let line = |label: &str, amount: f64| -> Vec<Cell> {
        vec![label.into(), amount.into(), share_of_revenue(amount, revenue).into()]
    };

    let duration = format!("{} Months", header.duration);
    let date = header.date.format("%Y-%m-%d").to_string();
    let pnl_rows = vec![
        text_row(&["PROJECT PROFIT & LOSS STATEMENT"]),
        text_row(&["Reference:", header.reference.as_str()]),
        text_row(&["Client:", header.client.as_str()]),
        text_row(&["Duration:", duration.as_str()]),
        text_row(&["Date:", date.as_str()]),
        vec![],
        text_row(&["DESCRIPTION", "AMOUNT", "% OF REV"]),
        text_row(&["REVENUE", "", ""]),
        vec!["Total Contract Value".into(), revenue.into(), format_percent(100.0).into()],
        vec![],
        text_row(&["DIRECT COSTS", "", ""]),
        line("  Manpower Base Salaries", stats.salary),
        line("  Monthly Allowances", stats.allow),
        line("  Statutory Benefits", stats.benefits),
        line("  Company Overheads (Visa/Med/etc)", stats.company_overheads),
        line("  Coordination Costs", stats.coordination),
        line("  Sub-Contractor Allocations", stats.sub_con_alloc),
        line("  One-Offs & Bank Guarantee Costs", stats.financials),
        vec![],
        line("TOTAL PROJECT COST", result.total_cost),
        vec![],
        vec![
            "NET PROFIT".into(),
            result.gross_profit.into(),
            format_percent(result.margin_percent).into(),
        ],
    ];

    let mut matrix = Sheet::new(DETAILED_MATRIX_SHEET);
    matrix.push_row(text_row(&DETAILED_MATRIX_HEADERS));
    for row in &result.detailed_breakdown {
        matrix.push_row(vec![
            row.position.as_str().into(),
            row.qty.into(),
            row.duration.into(),
            row.working_days.into(),
            row.base_salary.into(),
            row.allowances_total.into(),
            row.benefits_total.into(),
            row.company_overheads_total.into(),
            row.sub_con_alloc_total.into(),
            row.coordination_total.into(),
            row.one_off_total.into(),
            row.total_cost.into(),
            row.target_margin.into(),
            row.bg_rate.into(),
            row.unit_rate.into(),
            row.revenue.into(),
            row.profit.into(),
        ]);
    }
    matrix.push_row(vec![]);
    matrix.push_row(vec![
        "TOTALS".into(),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        stats.salary.into(),
        stats.allow.into(),
        stats.benefits.into(),
        stats.company_overheads.into(),
        stats.sub_con_alloc.into(),
        stats.coordination.into(),
        stats.financials.into(),
        result.total_cost.into(),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        revenue.into(),
        result.gross_profit.into(),
    ]);

    let mut workbook = Workbook::new();
    workbook.add_sheet(Sheet::from_rows(PNL_SHEET, pnl_rows));
    workbook.add_sheet(matrix);
    workbook
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{Position, SelectionList};
    use quote_engine::calculate_quotation;

    #[test]
    fn test_master_data_layout() {
        let mut catalog = PositionCatalog::new();
        catalog.add(Position::new("Welder", 4000.0, Some(350.0)));
        let clients = vec![Client::new(0, "Acme", "Doha", "Ops")];

        let wb = export_master_data(&catalog, &clients, &ParameterSet::default());

        let names: Vec<_> = wb.sheet_names().collect();
        assert_eq!(names, vec![MASTER_POSITIONS_SHEET, CLIENTS_SHEET, PARAMETERS_SHEET]);

        let positions = wb.sheet(MASTER_POSITIONS_SHEET).unwrap();
        assert_eq!(positions.rows[1], vec![Cell::from("Welder"), Cell::from(4000.0), Cell::from(350.0), Cell::from(0.0)]);

        let params = wb.sheet(PARAMETERS_SHEET).unwrap();
        assert_eq!(params.rows.len(), 26);
        assert_eq!(params.rows[25], vec![Cell::from("margin"), Cell::from(15.0), Cell::from(true)]);
    }

    #[test]
    fn test_blank_template_has_only_headers() {
        let wb = blank_template();
        assert_eq!(wb.sheet(MASTER_POSITIONS_SHEET).map(|s| s.rows.len()), Some(1));
        assert_eq!(wb.sheet(CLIENTS_SHEET).map(|s| s.rows.len()), Some(1));
        let params = wb.sheet(PARAMETERS_SHEET).unwrap();
        let coordination = params.rows.iter().find(|r| r[0] == Cell::from("coordination_cost")).unwrap();
        assert_eq!(coordination[1], Cell::from(0.0));
    }

    #[test]
    fn test_profit_and_loss_sheets() {
        let params = ParameterSet::bare(12.0, 20.0);
        let mut roster = SelectionList::new();
        roster.add(Position::new("Inspector", 5000.0, None), 1);
        let result = calculate_quotation(&params, roster.as_slice());
        let header = ReportHeader {
            reference: "Q-2024-017".into(),
            client: "Acme".into(),
            duration: 12.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };

        let wb = export_profit_and_loss(&result, &header);

        let pnl = wb.sheet(PNL_SHEET).unwrap();
        assert_eq!(pnl.cell(3, 1), &Cell::from("12 Months"));
        assert_eq!(pnl.cell(4, 1), &Cell::from("2024-03-01"));
        let net = pnl.rows.last().unwrap();
        assert_eq!(net[2], Cell::from("20.0%"));

        let matrix = wb.sheet(DETAILED_MATRIX_SHEET).unwrap();
        assert_eq!(matrix.rows[0].len(), 17);
        assert_eq!(matrix.rows.len(), 4);
        assert_eq!(matrix.rows[3][0], Cell::from("TOTALS"));
        assert_eq!(matrix.rows[3].len(), 17);
    }

    #[test]
    fn test_zero_revenue_shares() {
        let result = CalculationResult::default();
        let header = ReportHeader {
            reference: String::new(),
            client: String::new(),
            duration: 0.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let wb = export_profit_and_loss(&result, &header);
        let pnl = wb.sheet(PNL_SHEET).unwrap();
        assert_eq!(pnl.cell(11, 2), &Cell::from("0.0%"));
    }
}
