//! Commercial parameter snapshot.
//!
//! A [`ParameterSet`] holds the global assumptions one quotation is priced
//! under: contract duration, margin targets, statutory benefit day-counts,
//! allowances, one-off mobilization, company overheads and the shared
//! sub-contractor pools. Every optional cost is a [`Toggle`] so that a value
//! can be kept while its contribution is switched off.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// Working days per month used when the snapshot carries an unset or invalid value.
pub const DEFAULT_WORKING_DAYS: f64 = 30.0;

/// A value paired with an enable flag.
///
/// The meaning of `value` depends on the field: days for statutory
/// benefits, a percentage for insurance, a flat monthly amount for
/// allowances and a one-off amount for mobilization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    /// Whether the item contributes to cost
    pub enabled: bool,
    /// Days, rate or amount
    pub value: f64,
}

impl Toggle {
    /// Creates an enabled item.
    pub const fn on(value: f64) -> Self {
        Self {
            enabled: true,
            value,
        }
    }

    /// Creates a disabled item that still remembers its value.
    pub const fn off(value: f64) -> Self {
        Self {
            enabled: false,
            value,
        }
    }

    /// Returns the value when enabled, zero otherwise.
    #[inline]
    pub fn effective(&self) -> f64 {
        if self.enabled {
            self.value
        } else {
            0.0
        }
    }
}

/// Per-person monthly company overheads, gated as one group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverheads {
    /// Group enable flag
    pub enabled: bool,
    /// Accommodation
    pub accommodation: f64,
    /// Transport fees
    pub transport: f64,
    /// Fuel expense
    pub fuel: f64,
    /// Medical insurance
    pub medical: f64,
    /// Air ticket, an annual figure
    pub air_ticket: f64,
    /// Visa cost
    pub visa: f64,
    /// Personal protective equipment
    pub ppe: f64,
    /// Site gate pass
    pub gate_pass: f64,
}

impl CompanyOverheads {
    /// Monthly overhead per person; zero when the group is disabled.
    ///
    /// The air ticket is converted from annual to monthly before summing.
    pub fn monthly(&self) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        self.accommodation
            + self.transport
            + self.fuel
            + self.medical
            + self.visa
            + self.ppe
            + self.gate_pass
            + self.air_ticket / 12.0
    }
}

/// Shared monthly sub-contractor pools, divided across the whole headcount.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubContractorPools {
    /// Pool enable flag
    pub enabled: bool,
    /// Third-party manpower per month
    pub manpower: f64,
    /// Equipment per month
    pub equipment: f64,
}

impl SubContractorPools {
    /// Total monthly pool; zero when disabled.
    pub fn monthly_pool(&self) -> f64 {
        if self.enabled {
            self.manpower + self.equipment
        } else {
            0.0
        }
    }
}

/// Snapshot of the global commercial assumptions for one quotation.
///
/// # Examples
/// ```
/// use quote_core::ParameterSet;
///
/// let mut params = ParameterSet::default();
/// assert_eq!(params.duration, 24.0);
///
/// params.working_days = 0.0;
/// assert_eq!(params.effective_working_days(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Contract duration in months
    pub duration: f64,
    /// Working days per month
    pub working_days: f64,
    /// Target margin percent
    pub margin: f64,
    /// Bank guarantee rate percent
    pub bank_guarantee_rate: f64,
    /// Coordination rate percent
    pub coordination_rate: f64,

    /// Annual leave days
    pub leave: Toggle,
    /// Sick leave days
    pub sick: Toggle,
    /// Public holiday days
    pub holiday: Toggle,
    /// End-of-service benefit days
    pub eosb: Toggle,
    /// Insurance rate percent of base salary
    pub insurance: Toggle,

    /// Housing allowance per month
    pub hra: Toggle,
    /// Food allowance per month
    pub food: Toggle,
    /// Transport allowance per month
    pub transport: Toggle,
    /// Other allowances per month
    pub others: Toggle,

    /// Mobilization, one-off per person
    pub mobilization: Toggle,

    /// Company overhead line items
    pub company_overheads: CompanyOverheads,
    /// Shared sub-contractor pools
    pub sub_con: SubContractorPools,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            duration: 24.0,
            working_days: DEFAULT_WORKING_DAYS,
            margin: 15.0,
            bank_guarantee_rate: 1.0,
            coordination_rate: 5.0,
            leave: Toggle::on(30.0),
            sick: Toggle::on(14.0),
            holiday: Toggle::on(10.0),
            eosb: Toggle::on(21.0),
            insurance: Toggle::on(1.5),
            hra: Toggle::off(0.0),
            food: Toggle::off(0.0),
            transport: Toggle::off(0.0),
            others: Toggle::off(0.0),
            mobilization: Toggle::on(2500.0),
            company_overheads: CompanyOverheads {
                enabled: true,
                ..CompanyOverheads::default()
            },
            sub_con: SubContractorPools {
                enabled: true,
                ..SubContractorPools::default()
            },
        }
    }
}

impl ParameterSet {
    /// Snapshot used for blank import templates: the defaults with no
    /// coordination and no bank guarantee.
    pub fn template() -> Self {
        Self {
            coordination_rate: 0.0,
            bank_guarantee_rate: 0.0,
            ..Self::default()
        }
    }

    /// Snapshot with every optional cost switched off, useful as a neutral
    /// starting point.
    pub fn bare(duration: f64, margin: f64) -> Self {
        Self {
            duration,
            working_days: DEFAULT_WORKING_DAYS,
            margin,
            bank_guarantee_rate: 0.0,
            coordination_rate: 0.0,
            leave: Toggle::off(0.0),
            sick: Toggle::off(0.0),
            holiday: Toggle::off(0.0),
            eosb: Toggle::off(0.0),
            insurance: Toggle::off(0.0),
            hra: Toggle::off(0.0),
            food: Toggle::off(0.0),
            transport: Toggle::off(0.0),
            others: Toggle::off(0.0),
            mobilization: Toggle::off(0.0),
            company_overheads: CompanyOverheads::default(),
            sub_con: SubContractorPools::default(),
        }
    }

    /// Working days per month, falling back to [`DEFAULT_WORKING_DAYS`]
    /// when unset, zero, negative or not finite.
    #[inline]
    pub fn effective_working_days(&self) -> f64 {
        if self.working_days.is_finite() && self.working_days > 0.0 {
            self.working_days
        } else {
            DEFAULT_WORKING_DAYS
        }
    }

    /// Sum of the enabled flat monthly allowances.
    pub fn monthly_allowances(&self) -> f64 {
        self.hra.effective() + self.food.effective() + self.transport.effective() + self.others.effective()
    }

    /// Whether at least one allowance is enabled.
    pub fn has_allowances(&self) -> bool {
        self.hra.enabled || self.food.enabled || self.transport.enabled || self.others.enabled
    }

    /// Checks the snapshot and returns every problem found.
    ///
    /// Margin or bank-guarantee rates at or above 100 are not reported:
    /// the engine defines revenue as zero for them.
    pub fn validate(&self) -> Vec<ParameterError> {
        let mut errors = Vec::new();

        let amounts: [(&'static str, f64); 22] = [
            ("duration", self.duration),
            ("leave.value", self.leave.value),
            ("sick.value", self.sick.value),
            ("holiday.value", self.holiday.value),
            ("eosb.value", self.eosb.value),
            ("hra.value", self.hra.value),
            ("food.value", self.food.value),
            ("transport.value", self.transport.value),
            ("others.value", self.others.value),
            ("mobilization.value", self.mobilization.value),
            ("company_overheads.accommodation", self.company_overheads.accommodation),
            ("company_overheads.transport", self.company_overheads.transport),
            ("company_overheads.fuel", self.company_overheads.fuel),
            ("company_overheads.medical", self.company_overheads.medical),
            ("company_overheads.air_ticket", self.company_overheads.air_ticket),
            ("company_overheads.visa", self.company_overheads.visa),
            ("company_overheads.ppe", self.company_overheads.ppe),
            ("company_overheads.gate_pass", self.company_overheads.gate_pass),
            ("sub_con.manpower", self.sub_con.manpower),
            ("sub_con.equipment", self.sub_con.equipment),
            ("margin", self.margin),
            ("bank_guarantee_rate", self.bank_guarantee_rate),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                errors.push(ParameterError::NotFinite { field });
            } else if value < 0.0 {
                errors.push(ParameterError::Negative { field, value });
            }
        }

        let percentages: [(&'static str, f64); 2] = [
            ("insurance.value", self.insurance.value),
            ("coordination_rate", self.coordination_rate),
        ];
        for (field, value) in percentages {
            if !value.is_finite() {
                errors.push(ParameterError::NotFinite { field });
            } else if !(0.0..=100.0).contains(&value) {
                errors.push(ParameterError::PercentOutOfRange { field, value });
            }
        }

        if self.effective_working_days() != self.working_days {
            errors.push(ParameterError::WorkingDaysFallback(self.working_days));
        }

        errors
    }
}
