//! Schedule of rates for the client-facing proposal.
//!
//! The proposal shows monthly rates, not contract totals: each line gets its
//! unit monthly rate and the monthly amount for the whole line. One-off
//! charges (tools and mobilization) are listed separately for lines that
//! carry any.

use quote_core::{ParameterSet, SelectedPosition};

use crate::aggregation::calculate_line;
use crate::allocation::{AllocationContext, CostAllocator};
use crate::revenue::RevenueInverter;

/// Monthly rate line of the schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateLine {
    /// Job title
    pub position: String,
    /// Headcount
    pub qty: u32,
    /// Billable rate per person per month
    pub unit_rate: f64,
    /// `unit_rate * qty`
    pub monthly_total: f64,
}

/// One-off charge line of the schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneOffLine {
    /// Job title
    pub position: String,
    /// Headcount
    pub qty: u32,
    /// Tools plus mobilization per person
    pub unit_amount: f64,
    /// `unit_amount * qty`
    pub total: f64,
}

/// Schedule of rates for a roster.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleOfRates {
    /// Monthly rate lines in roster order
    pub rates: Vec<RateLine>,
    /// One-off lines for positions with nonzero one-offs
    pub one_offs: Vec<OneOffLine>,
}

impl ScheduleOfRates {
    /// Monthly amount of the whole roster.
    pub fn monthly_total(&self) -> f64 {
        self.rates.iter().map(|r| r.monthly_total).sum()
    }

    /// Sum of all one-off charges.
    pub fn one_off_total(&self) -> f64 {
        self.one_offs.iter().map(|o| o.total).sum()
    }
}

/// Builds the schedule of rates for a snapshot and roster.
pub fn schedule_of_rates(params: &ParameterSet, positions: &[SelectedPosition]) -> ScheduleOfRates {
    let allocator = CostAllocator::new(params, AllocationContext::from_selection(params, positions));
    let inverter = RevenueInverter::new(params);

    let mut schedule = ScheduleOfRates::default();
    for selection in positions {
        let calc = calculate_line(&allocator, &inverter, selection);
        let qty = selection.qty_f64();
        let unit_rate = calc.revenue.unit_billable_monthly;

        schedule.rates.push(RateLine {
            position: selection.name().to_string(),
            qty: selection.qty,
            unit_rate,
            monthly_total: unit_rate * qty,
        });

        let one_off = calc.cost.total_one_off_per_person;
        if one_off != 0.0 {
            schedule.one_offs.push(OneOffLine {
                position: selection.name().to_string(),
                qty: selection.qty,
                unit_amount: one_off,
                total: one_off * qty,
            });
        }
    }
    schedule
}
