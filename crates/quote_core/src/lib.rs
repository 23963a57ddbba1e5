//! # quote_core: Input Records for the Quotation Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! quote_core is the bottom layer of the quotation workspace, providing the
//! immutable snapshots every other crate consumes:
//! - Commercial assumptions: [`ParameterSet`] with its toggled items (`params`)
//! - Staffing catalog: [`Position`], [`PositionCatalog`] (`catalog`)
//! - Quotation roster: [`SelectedPosition`], [`SelectionList`] (`selection`)
//! - Client master data and saved projects (`client`, `project`)
//! - Display currencies and money formatting (`currency`)
//! - Error types: [`ParameterError`] (`error`)
//!
//! ## Zero Dependency Principle
//!
//! This crate depends on no other workspace crate. External dependencies are
//! limited to serde (serialisation), chrono (timestamps), uuid (identifiers)
//! and thiserror.
//!
//! ## Usage Examples
//!
//! ```rust
//! use quote_core::{ParameterSet, Position, SelectionList};
//!
//! let params = ParameterSet::default();
//! assert_eq!(params.effective_working_days(), 30.0);
//!
//! let mut roster = SelectionList::new();
//! roster.add(Position::new("Welder", 5000.0, None), 2);
//! roster.add(Position::new("Welder", 5000.0, None), 1);
//! assert_eq!(roster.total_headcount(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod client;
pub mod currency;
pub mod error;
pub mod params;
pub mod project;
pub mod selection;

pub use catalog::{Position, PositionCatalog, PositionId};
pub use client::{Client, ClientId};
pub use currency::Currency;
pub use error::{CurrencyError, ParameterError};
pub use params::{CompanyOverheads, ParameterSet, SubContractorPools, Toggle, DEFAULT_WORKING_DAYS};
pub use project::{ProjectDraft, ProjectId, SavedProject};
pub use selection::{total_headcount, PreSelection, SelectedPosition, SelectionId, SelectionList};
