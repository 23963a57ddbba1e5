//! Parameter sheet mapping.
//!
//! Each `{Parameter, Value, Enabled}` row is matched against
//! [`PARAMETER_RULES`] in order. Rules use substring tests on the
//! lower-cased parameter name and are evaluated independently, so one row
//! can satisfy several rules; a later rule overwrites any field an earlier
//! one set. The result is a [`ParameterPatch`] that only carries the fields
//! the sheet actually provided.

use quote_core::{ParameterSet, Toggle};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::workbook::Sheet;

/// Name of the parameter sheet.
pub const PARAMETERS_SHEET: &str = "Parameters";

/// Partial parameter set read from a workbook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterPatch {
    /// Contract duration in months
    pub duration: Option<f64>,
    /// Working days per month
    pub working_days: Option<f64>,
    /// Target margin percent
    pub margin: Option<f64>,
    /// Bank guarantee rate percent
    pub bank_guarantee_rate: Option<f64>,
    /// Coordination rate percent
    pub coordination_rate: Option<f64>,
    /// Annual leave days
    pub leave: Option<Toggle>,
    /// Sick leave days
    pub sick: Option<Toggle>,
    /// Public holiday days
    pub holiday: Option<Toggle>,
    /// End-of-service benefit days
    pub eosb: Option<Toggle>,
    /// Insurance rate percent
    pub insurance: Option<Toggle>,
    /// Housing allowance
    pub hra: Option<Toggle>,
    /// Food allowance
    pub food: Option<Toggle>,
    /// Transport allowance
    pub transport: Option<Toggle>,
    /// Other allowances
    pub others: Option<Toggle>,
    /// Mobilization cost
    pub mobilization: Option<Toggle>,
    /// Company overheads switched on (never switched off by a sheet)
    pub company_overheads_enabled: Option<bool>,
    /// Company accommodation
    pub overhead_accommodation: Option<f64>,
    /// Company transport fees
    pub overhead_transport: Option<f64>,
    /// Fuel expense
    pub overhead_fuel: Option<f64>,
    /// Medical insurance per month
    pub overhead_medical: Option<f64>,
    /// Air ticket per annum
    pub overhead_air_ticket: Option<f64>,
    /// Visa cost
    pub overhead_visa: Option<f64>,
    /// PPE
    pub overhead_ppe: Option<f64>,
    /// Gate pass
    pub overhead_gate_pass: Option<f64>,
    /// Sub-contractor pools switched on (never switched off by a sheet)
    pub sub_con_enabled: Option<bool>,
    /// Sub-contractor manpower pool
    pub sub_con_manpower: Option<f64>,
    /// Sub-contractor equipment pool
    pub sub_con_equipment: Option<f64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl ParameterPatch {
    /// Whether the patch sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layers the patch over `params`; unset fields keep their value.
    pub fn apply_to(&self, params: &mut ParameterSet) {
        set(&mut params.duration, self.duration);
        set(&mut params.working_days, self.working_days);
        set(&mut params.margin, self.margin);
        set(&mut params.bank_guarantee_rate, self.bank_guarantee_rate);
        set(&mut params.coordination_rate, self.coordination_rate);

        set(&mut params.leave, self.leave);
        set(&mut params.sick, self.sick);
        set(&mut params.holiday, self.holiday);
        set(&mut params.eosb, self.eosb);
        set(&mut params.insurance, self.insurance);
        set(&mut params.hra, self.hra);
        set(&mut params.food, self.food);
        set(&mut params.transport, self.transport);
        set(&mut params.others, self.others);
        set(&mut params.mobilization, self.mobilization);

        let overheads = &mut params.company_overheads;
        set(&mut overheads.enabled, self.company_overheads_enabled);
        set(&mut overheads.accommodation, self.overhead_accommodation);
        set(&mut overheads.transport, self.overhead_transport);
        set(&mut overheads.fuel, self.overhead_fuel);
        set(&mut overheads.medical, self.overhead_medical);
        set(&mut overheads.air_ticket, self.overhead_air_ticket);
        set(&mut overheads.visa, self.overhead_visa);
        set(&mut overheads.ppe, self.overhead_ppe);
        set(&mut overheads.gate_pass, self.overhead_gate_pass);

        set(&mut params.sub_con.enabled, self.sub_con_enabled);
        set(&mut params.sub_con.manpower, self.sub_con_manpower);
        set(&mut params.sub_con.equipment, self.sub_con_equipment);
    }

    /// Returns `base` with the patch applied.
    pub fn applied(&self, base: &ParameterSet) -> ParameterSet {
        let mut params = base.clone();
        self.apply_to(&mut params);
        params
    }
}

/// One `(predicate, effect)` pair of the parameter mapping.
#[derive(Clone, Copy)]
pub struct ParameterRule {
    /// Short name for logs
    pub name: &'static str,
    /// Tests the lower-cased parameter name
    pub matches: fn(&str) -> bool,
    /// Writes the row's value and enabled flag into the patch
    pub apply: fn(&mut ParameterPatch, f64, bool),
}

impl std::fmt::Debug for ParameterRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterRule").field("name", &self.name).finish()
    }
}

/// The parameter mapping, in evaluation order.
pub static PARAMETER_RULES: &[ParameterRule] = &[
    ParameterRule {
        name: "leave",
        matches: |k| k.contains("leave") && !k.contains("sick"),
        apply: |p, value, enabled| p.leave = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "sick",
        matches: |k| k.contains("sick"),
        apply: |p, value, enabled| p.sick = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "holiday",
        matches: |k| k.contains("holiday"),
        apply: |p, value, enabled| p.holiday = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "eosb",
        matches: |k| k.contains("eosb"),
        apply: |p, value, enabled| p.eosb = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "margin",
        matches: |k| k.contains("margin"),
        apply: |p, value, _| p.margin = Some(value),
    },
    ParameterRule {
        name: "working_days",
        matches: |k| k.contains("working days"),
        apply: |p, value, _| p.working_days = Some(value),
    },
    ParameterRule {
        name: "insurance",
        matches: |k| k.contains("insurance rate"),
        apply: |p, value, enabled| p.insurance = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "hra",
        matches: |k| k.contains("hra") || (k.contains("accom") && !k.contains("company")),
        apply: |p, value, enabled| p.hra = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "food",
        matches: |k| k.contains("food"),
        apply: |p, value, enabled| p.food = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "transport",
        matches: |k| k.contains("transport") && !k.contains("fees"),
        apply: |p, value, enabled| p.transport = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "others",
        matches: |k| k.contains("others"),
        apply: |p, value, enabled| p.others = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "mobilization",
        matches: |k| k.contains("mob") || k.contains("demob"),
        apply: |p, value, enabled| p.mobilization = Some(Toggle { enabled, value }),
    },
    ParameterRule {
        name: "company_accommodation",
        matches: |k| k.contains("company_accommodation"),
        apply: |p, value, enabled| {
            p.overhead_accommodation = Some(value);
            if enabled {
                p.company_overheads_enabled = Some(true);
            }
        },
    },
    ParameterRule {
        name: "transport_fees",
        matches: |k| k.contains("transport_fees"),
        apply: |p, value, _| p.overhead_transport = Some(value),
    },
    ParameterRule {
        name: "fuel",
        matches: |k| k.contains("fuel"),
        apply: |p, value, _| p.overhead_fuel = Some(value),
    },
    ParameterRule {
        name: "medical",
        matches: |k| k.contains("medical"),
        apply: |p, value, _| p.overhead_medical = Some(value),
    },
    ParameterRule {
        name: "air_ticket",
        matches: |k| k.contains("air_ticket"),
        apply: |p, value, _| p.overhead_air_ticket = Some(value),
    },
    ParameterRule {
        name: "visa",
        matches: |k| k.contains("visa"),
        apply: |p, value, _| p.overhead_visa = Some(value),
    },
    ParameterRule {
        name: "ppe",
        matches: |k| k.contains("ppe"),
        apply: |p, value, _| p.overhead_ppe = Some(value),
    },
    ParameterRule {
        name: "gate_pass",
        matches: |k| k.contains("gate_pass"),
        apply: |p, value, _| p.overhead_gate_pass = Some(value),
    },
    ParameterRule {
        name: "bank_guarantee",
        matches: |k| k.contains("bank_guarantee"),
        apply: |p, value, _| p.bank_guarantee_rate = Some(value),
    },
    ParameterRule {
        name: "coordination",
        matches: |k| k.contains("coordination"),
        apply: |p, value, _| p.coordination_rate = Some(value),
    },
    ParameterRule {
        name: "subcon_manpower",
        matches: |k| k.contains("third-party") || k.contains("subcon_manpower"),
        apply: |p, value, enabled| {
            p.sub_con_manpower = Some(value);
            if enabled {
                p.sub_con_enabled = Some(true);
            }
        },
    },
    ParameterRule {
        name: "subcon_equipment",
        matches: |k| k.contains("equipment") || k.contains("subcon_equip"),
        apply: |p, value, _| p.sub_con_equipment = Some(value),
    },
    ParameterRule {
        name: "duration",
        matches: |k| k.contains("duration"),
        apply: |p, value, _| p.duration = Some(value),
    },
];

/// Applies every matching rule for one parameter row. Returns the number of
/// rules that matched.
pub fn apply_parameter_row(patch: &mut ParameterPatch, name: &str, value: f64, enabled: bool) -> usize {
    let key = name.to_lowercase();
    let mut matched = 0;
    for rule in PARAMETER_RULES {
        if (rule.matches)(&key) {
            trace!(rule = rule.name, parameter = name, value, enabled, "Parameter rule matched");
            (rule.apply)(patch, value, enabled);
            matched += 1;
        }
    }
    matched
}

/// Reads a parameter sheet into a patch.
pub fn read_parameters(sheet: &Sheet) -> ParameterPatch {
    let mut patch = ParameterPatch::default();
    for record in sheet.records().iter() {
        let name = record.get("Parameter").as_text();
        let value = record.get("Value").as_number();
        let enabled = record.get("Enabled").as_text().to_lowercase() == "true";
        apply_parameter_row(&mut patch, &name, value, enabled);
    }
    patch
}
