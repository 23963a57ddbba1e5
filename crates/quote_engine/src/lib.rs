//! # Quote Engine (L2: Business Logic)
//!
//! Cost allocation, revenue inversion and breakdown aggregation for
//! staffing quotations.
//!
//! This crate provides:
//! - [`allocation`]: per-position monthly cost components under a shared
//!   allocation context
//! - [`revenue`]: margin and bank-guarantee gross-up, billable months
//! - [`aggregation`]: full-roster totals, category stats and detailed
//!   breakdown
//! - [`matrix`]: ordered, conditionally visible display rows
//! - [`schedule`]: monthly schedule of rates for proposals
//!
//! ## Design Principles
//!
//! - **Pure recompute**: every call computes the whole result from one
//!   parameter snapshot and roster; nothing is cached or patched
//! - **Explicit context**: roster headcount and the shared sub-contractor
//!   pool are passed to the allocator, never read from ambient state
//! - **Defined degenerate cases**: margin or guarantee rates at or above
//!   100 % yield zero revenue, an empty roster yields zero totals
//!
//! ## Usage Example
//!
//! ```rust
//! use quote_core::{ParameterSet, Position, SelectionList};
//! use quote_engine::{calculate_quotation, RowId};
//!
//! let params = ParameterSet::bare(12.0, 20.0);
//! let mut roster = SelectionList::new();
//! roster.add(Position::new("Inspector", 5000.0, None), 1);
//!
//! let result = calculate_quotation(&params, roster.as_slice());
//! assert_eq!(result.margin_percent, 20.0);
//! assert!(!result.has_row(RowId::Tools));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregation;
pub mod allocation;
pub mod matrix;
pub mod result;
pub mod revenue;
pub mod schedule;

pub use aggregation::{calculate_line, calculate_quotation, LineCalculation};
pub use allocation::{AllocationContext, CostAllocator, CostBreakdown};
pub use matrix::{CellValue, MatrixRow, RowId, RowKind, RowTone};
pub use result::{CalculationResult, CategoryStats, DetailedBreakdownRow};
pub use revenue::{billable_months, LineTotals, RevenueBreakdown, RevenueInverter};
pub use schedule::{schedule_of_rates, OneOffLine, RateLine, ScheduleOfRates};
