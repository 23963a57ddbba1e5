//! Per-position cost allocation.
//!
//! [`CostAllocator`] turns one parameter snapshot and one position into
//! every monthly cost component and the per-person total over the contract.
//! The shared sub-contractor pool and the roster headcount are not position
//! data; they arrive through an explicit [`AllocationContext`] so the
//! allocation stays a pure function of its arguments.

use quote_core::{total_headcount, ParameterSet, Position, SelectedPosition};

/// Roster-wide context needed to cost a single position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationContext {
    /// Sum of quantities over every selected position
    pub total_headcount: u32,
    /// Shared monthly sub-contractor pool (zero when the pools are disabled)
    pub sub_con_pool: f64,
}

impl AllocationContext {
    /// Creates a context from explicit values.
    pub fn new(total_headcount: u32, sub_con_pool: f64) -> Self {
        Self {
            total_headcount,
            sub_con_pool,
        }
    }

    /// Derives the context from a snapshot and the roster being quoted.
    pub fn from_selection(params: &ParameterSet, positions: &[SelectedPosition]) -> Self {
        Self {
            total_headcount: total_headcount(positions),
            sub_con_pool: params.sub_con.monthly_pool(),
        }
    }

    /// Monthly pool share of one person; zero for an empty roster.
    #[inline]
    pub fn sub_con_per_person(&self) -> f64 {
        if self.total_headcount > 0 {
            self.sub_con_pool / f64::from(self.total_headcount)
        } else {
            0.0
        }
    }
}

/// Every cost component of one position.
///
/// Monthly figures are per person per month; `total_*` figures are per
/// person over the contract duration; one-offs are per person and are not
/// multiplied by duration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Base salary divided by working days
    pub daily_rate: f64,
    /// Annual leave accrual per month
    pub leave_cost: f64,
    /// Sick leave accrual per month
    pub sick_cost: f64,
    /// Public holiday accrual per month
    pub holiday_cost: f64,
    /// End-of-service accrual per month
    pub eosb_cost: f64,
    /// Insurance as a share of base salary
    pub insurance_cost: f64,
    /// Enabled flat allowances
    pub monthly_allowances: f64,
    /// Coordination on salary, allowances and leave
    pub coordination_cost: f64,
    /// Company overheads per month
    pub company_overheads: f64,
    /// Share of the sub-contractor pool
    pub sub_con_alloc_per_person: f64,

    /// Tool cost per unit
    pub tool_cost_unit: f64,
    /// Mobilization per unit
    pub mob_cost: f64,
    /// Tool cost plus mobilization per unit
    pub total_one_off_per_person: f64,
    /// Tool cost per unit times the line quantity, for display
    pub line_tool_cost_total: f64,

    /// Base salary over the contract
    pub total_base: f64,
    /// Allowances over the contract
    pub total_allowances: f64,
    /// Statutory benefits over the contract
    pub total_benefits: f64,
    /// Coordination over the contract
    pub total_coordination: f64,
    /// Company overheads over the contract
    pub total_company_overheads: f64,
    /// Sub-contractor share over the contract
    pub total_sub_con: f64,
    /// Operational cost of one person over the contract, before guarantee
    pub cost_per_person: f64,
}

impl CostBreakdown {
    /// Monthly statutory benefits: the four day-count accruals plus insurance.
    #[inline]
    pub fn monthly_benefits(&self) -> f64 {
        self.leave_cost + self.sick_cost + self.holiday_cost + self.eosb_cost + self.insurance_cost
    }
}

/// Costs positions under one parameter snapshot.
///
/// # Examples
///
/// ```
/// use quote_core::{ParameterSet, Position};
/// use quote_engine::allocation::{AllocationContext, CostAllocator};
///
/// let params = ParameterSet::bare(12.0, 20.0);
/// let allocator = CostAllocator::new(&params, AllocationContext::new(1, 0.0));
/// let cost = allocator.allocate(&Position::new("Inspector", 5000.0, None), 1);
///
/// assert_eq!(cost.cost_per_person, 60_000.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CostAllocator<'a> {
    params: &'a ParameterSet,
    context: AllocationContext,
}

impl<'a> CostAllocator<'a> {
    /// Creates an allocator for a snapshot and roster context.
    pub fn new(params: &'a ParameterSet, context: AllocationContext) -> Self {
        Self { params, context }
    }

    /// The roster context in use.
    pub fn context(&self) -> AllocationContext {
        self.context
    }

    /// Computes every cost component for `position` on a line of `qty` units.
    pub fn allocate(&self, position: &Position, qty: u32) -> CostBreakdown {
        let p = self.params;
        let base_salary = position.base_salary;
        let daily_rate = base_salary / p.effective_working_days();

        let accrual = |days: f64| daily_rate * (days / 12.0);
        let leave_cost = if p.leave.enabled { accrual(p.leave.value) } else { 0.0 };
        let sick_cost = if p.sick.enabled { accrual(p.sick.value) } else { 0.0 };
        let holiday_cost = if p.holiday.enabled { accrual(p.holiday.value) } else { 0.0 };
        let eosb_cost = if p.eosb.enabled { accrual(p.eosb.value) } else { 0.0 };
        let insurance_cost = if p.insurance.enabled {
            base_salary * (p.insurance.value / 100.0)
        } else {
            0.0
        };

        let monthly_allowances = p.monthly_allowances();

        // Coordination base is salary + allowances + leave only.
        let coordination_cost =
            (base_salary + monthly_allowances + leave_cost) * (p.coordination_rate / 100.0);

        let company_overheads = p.company_overheads.monthly();
        let sub_con_alloc_per_person = self.context.sub_con_per_person();

        let tool_cost_unit = position.tool_cost_unit();
        let mob_cost = p.mobilization.effective();
        let total_one_off_per_person = tool_cost_unit + mob_cost;
        let line_tool_cost_total = tool_cost_unit * f64::from(qty);

        let mut breakdown = CostBreakdown {
            daily_rate,
            leave_cost,
            sick_cost,
            holiday_cost,
            eosb_cost,
            insurance_cost,
            monthly_allowances,
            coordination_cost,
            company_overheads,
            sub_con_alloc_per_person,
            tool_cost_unit,
            mob_cost,
            total_one_off_per_person,
            line_tool_cost_total,
            ..CostBreakdown::default()
        };

        let duration = p.duration;
        breakdown.total_base = base_salary * duration;
        breakdown.total_allowances = monthly_allowances * duration;
        breakdown.total_benefits = breakdown.monthly_benefits() * duration;
        breakdown.total_coordination = coordination_cost * duration;
        breakdown.total_company_overheads = company_overheads * duration;
        breakdown.total_sub_con = sub_con_alloc_per_person * duration;
        breakdown.cost_per_person = breakdown.total_base
            + breakdown.total_allowances
            + breakdown.total_benefits
            + breakdown.total_coordination
            + breakdown.total_company_overheads
            + breakdown.total_sub_con
            + total_one_off_per_person;

        breakdown
    }
}
