//! Revenue inversion.
//!
//! Cost is converted into billable revenue in two gross-up stages: first the
//! target margin (`cost / (1 - margin)`), then the bank guarantee
//! (`target / (1 - rate)`). The difference between the two stages is the
//! implicit guarantee cost, which is folded back into cost so reported
//! margins stay consistent. Monthly rates are spread over the billable
//! months, which exclude non-productive leave time.

use quote_core::ParameterSet;

/// Months over which revenue is rate-distributed.
///
/// `duration - (duration / 12) * (leave days / working days)`, never below
/// one. Leave days are used whether or not the leave benefit is enabled.
///
/// # Examples
///
/// ```
/// use quote_core::ParameterSet;
/// use quote_engine::revenue::billable_months;
///
/// let params = ParameterSet::default(); // 24 months, 30 leave days, 30 working days
/// assert_eq!(billable_months(&params), 22.0);
/// ```
pub fn billable_months(params: &ParameterSet) -> f64 {
    let yearly_leave_ratio = params.leave.value / params.effective_working_days();
    let non_billable = (params.duration / 12.0) * yearly_leave_ratio;
    (params.duration - non_billable).max(1.0)
}

/// Grosses `amount` up so that `rate_percent` of the result covers the
/// difference. Rates at or above 100 % yield zero.
#[inline]
pub fn gross_up(amount: f64, rate_percent: f64) -> f64 {
    let rate = rate_percent / 100.0;
    if rate >= 1.0 {
        0.0
    } else {
        amount / (1.0 - rate)
    }
}

/// Revenue figures for one person.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevenueBreakdown {
    /// Months the revenue is spread over
    pub billable_months: f64,
    /// Revenue after the margin gross-up
    pub target_revenue: f64,
    /// Revenue after the bank-guarantee gross-up
    pub final_revenue: f64,
    /// Implicit guarantee cost (`final - target`)
    pub bg_cost: f64,
    /// Billable rate per month
    pub unit_billable_monthly: f64,
    /// Cost including guarantee per billable month
    pub unit_cost_monthly: f64,
}

/// Revenue, cost and profit of a whole roster line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineTotals {
    /// Final revenue times quantity
    pub line_total_billable: f64,
    /// Cost including guarantee times quantity
    pub line_total_cost_with_bg: f64,
    /// Billable minus cost
    pub line_profit: f64,
    /// Operational cost (before guarantee) times quantity
    pub line_total_cost_operational: f64,
}

/// Inverts cost into revenue under one parameter snapshot.
///
/// # Examples
///
/// ```
/// use quote_core::ParameterSet;
/// use quote_engine::revenue::RevenueInverter;
///
/// let params = ParameterSet::bare(12.0, 20.0);
/// let revenue = RevenueInverter::new(&params).invert(60_000.0);
/// assert_eq!(revenue.final_revenue, 75_000.0);
/// assert_eq!(revenue.bg_cost, 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RevenueInverter<'a> {
    params: &'a ParameterSet,
    billable_months: f64,
}

impl<'a> RevenueInverter<'a> {
    /// Creates an inverter, fixing the billable months for the snapshot.
    pub fn new(params: &'a ParameterSet) -> Self {
        Self {
            params,
            billable_months: billable_months(params),
        }
    }

    /// Billable months in use.
    pub fn billable_months(&self) -> f64 {
        self.billable_months
    }

    /// Computes revenue for one person costing `cost` over the contract.
    pub fn invert(&self, cost: f64) -> RevenueBreakdown {
        let target_revenue = gross_up(cost, self.params.margin);
        let final_revenue = gross_up(target_revenue, self.params.bank_guarantee_rate);
        let bg_cost = final_revenue - target_revenue;

        RevenueBreakdown {
            billable_months: self.billable_months,
            target_revenue,
            final_revenue,
            bg_cost,
            unit_billable_monthly: final_revenue / self.billable_months,
            unit_cost_monthly: (cost + bg_cost) / self.billable_months,
        }
    }
}

impl RevenueBreakdown {
    /// Scales per-person figures to a line of `qty` units.
    pub fn line_totals(&self, cost: f64, qty: u32) -> LineTotals {
        let qty = f64::from(qty);
        let line_total_billable = self.final_revenue * qty;
        let line_total_cost_with_bg = (cost + self.bg_cost) * qty;
        LineTotals {
            line_total_billable,
            line_total_cost_with_bg,
            line_profit: line_total_billable - line_total_cost_with_bg,
            line_total_cost_operational: cost * qty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quote_core::Toggle;

    #[test]
    fn test_billable_months_ignores_leave_flag() {
        let mut params = ParameterSet::bare(12.0, 0.0);
        params.leave = Toggle::off(30.0);
        // 12 - 1 * (30 / 30)
        assert_relative_eq!(billable_months(&params), 11.0);
    }

    #[test]
    fn test_billable_months_floor() {
        let mut params = ParameterSet::bare(1.0, 0.0);
        params.leave = Toggle::on(360.0);
        assert_eq!(billable_months(&params), 1.0);

        params.duration = 0.0;
        assert_eq!(billable_months(&params), 1.0);
    }

    #[test]
    fn test_gross_up_clamp() {
        assert_relative_eq!(gross_up(80.0, 20.0), 100.0);
        assert_eq!(gross_up(80.0, 100.0), 0.0);
        assert_eq!(gross_up(80.0, 150.0), 0.0);
        assert_eq!(gross_up(80.0, 0.0), 80.0);
    }

    #[test]
    fn test_bank_guarantee_cost() {
        let mut params = ParameterSet::bare(12.0, 20.0);
        params.bank_guarantee_rate = 2.0;
        let revenue = RevenueInverter::new(&params).invert(60_000.0);

        assert_relative_eq!(revenue.target_revenue, 75_000.0);
        assert_relative_eq!(revenue.final_revenue, 75_000.0 / 0.98);
        assert_relative_eq!(revenue.bg_cost, 75_000.0 / 0.98 - 75_000.0);
        assert_relative_eq!(revenue.unit_cost_monthly, (60_000.0 + revenue.bg_cost) / 12.0);
    }

    #[test]
    fn test_full_margin_yields_zero_revenue() {
        let params = ParameterSet::bare(12.0, 100.0);
        let revenue = RevenueInverter::new(&params).invert(60_000.0);
        assert_eq!(revenue.final_revenue, 0.0);
        assert_eq!(revenue.bg_cost, 0.0);
    }

    #[test]
    fn test_line_totals() {
        let params = ParameterSet::bare(12.0, 20.0);
        let revenue = RevenueInverter::new(&params).invert(60_000.0);
        let line = revenue.line_totals(60_000.0, 3);

        assert_relative_eq!(line.line_total_billable, 225_000.0);
        assert_relative_eq!(line.line_total_cost_with_bg, 180_000.0);
        assert_relative_eq!(line.line_profit, 45_000.0);
        assert_relative_eq!(line.line_total_cost_operational, 180_000.0);
    }
}
