//! Quotation roster.
//!
//! A [`SelectedPosition`] is a catalog position plus a headcount and a
//! selection identity of its own, so the same title can appear more than
//! once in one quotation. [`SelectionList`] owns the roster ordering and
//! hands out selection identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Position, PositionCatalog, PositionId};

/// Identity of one roster line, distinct from the catalog id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionId(u64);

impl SelectionId {
    /// Creates a selection ID.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position placed on the roster with a headcount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedPosition {
    /// Roster line identity
    pub selection_id: SelectionId,
    /// The catalog entry being quoted
    pub position: Position,
    /// Headcount for this line
    pub qty: u32,
}

impl SelectedPosition {
    /// Creates a roster line.
    pub fn new(selection_id: SelectionId, position: Position, qty: u32) -> Self {
        Self {
            selection_id,
            position,
            qty,
        }
    }

    /// Job title of the line.
    #[inline]
    pub fn name(&self) -> &str {
        &self.position.name
    }

    /// Headcount as a float for cost arithmetic.
    #[inline]
    pub fn qty_f64(&self) -> f64 {
        f64::from(self.qty)
    }
}

/// Sum of the quantities of `lines`, saturating at `u32::MAX`.
///
/// Quantities come from untrusted workbooks, so the sum never wraps.
pub fn total_headcount(lines: &[SelectedPosition]) -> u32 {
    lines.iter().fold(0u32, |acc, line| acc.saturating_add(line.qty))
}

/// A pre-selection found during ingestion: a catalog id and a quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreSelection {
    /// Catalog position referenced
    pub position_id: PositionId,
    /// Headcount requested
    pub qty: u32,
}

/// Ordered roster of selected positions.
///
/// # Examples
///
/// ```
/// use quote_core::{Position, SelectionList};
///
/// let mut roster = SelectionList::new();
/// let id = roster.add(Position::new("Fitter", 3500.0, None), 2);
/// roster.update_qty(id, 5);
/// assert_eq!(roster.total_headcount(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionList {
    lines: Vec<SelectedPosition>,
    next_id: u64,
}

impl SelectionList {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a roster from saved lines, continuing the id sequence after
    /// the highest id present.
    pub fn from_lines(lines: Vec<SelectedPosition>) -> Self {
        let next_id = lines
            .iter()
            .map(|l| l.selection_id.value() + 1)
            .max()
            .unwrap_or(0);
        Self { lines, next_id }
    }

    /// Appends a line and returns its fresh selection id.
    ///
    /// A quantity of zero is raised to one: every roster line carries a
    /// positive headcount.
    pub fn add(&mut self, position: Position, qty: u32) -> SelectionId {
        let id = SelectionId::new(self.next_id);
        self.next_id += 1;
        self.lines.push(SelectedPosition::new(id, position, qty.max(1)));
        id
    }

    /// Changes the headcount of a line. Quantities below one are ignored.
    ///
    /// Returns `true` when the line exists and was updated.
    pub fn update_qty(&mut self, id: SelectionId, qty: u32) -> bool {
        if qty < 1 {
            return false;
        }
        match self.lines.iter_mut().find(|l| l.selection_id == id) {
            Some(line) => {
                line.qty = qty;
                true
            }
            None => false,
        }
    }

    /// Removes a line, returning it when present.
    pub fn remove(&mut self, id: SelectionId) -> Option<SelectedPosition> {
        let idx = self.lines.iter().position(|l| l.selection_id == id)?;
        Some(self.lines.remove(idx))
    }

    /// Appends pre-selections resolved against the catalog.
    ///
    /// Pre-selections whose id the catalog does not resolve are dropped
    /// silently. Returns the number of lines added.
    pub fn materialize(&mut self, selections: &[PreSelection], catalog: &PositionCatalog) -> usize {
        let mut added = 0;
        for pre in selections {
            if let Some(position) = catalog.get(&pre.position_id) {
                self.add(position.clone(), pre.qty);
                added += 1;
            }
        }
        added
    }

    /// Sum of all line quantities, saturating at `u32::MAX`.
    pub fn total_headcount(&self) -> u32 {
        total_headcount(&self.lines)
    }

    /// Lines in roster order.
    pub fn as_slice(&self) -> &[SelectedPosition] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consumes the roster, returning its lines.
    pub fn into_lines(self) -> Vec<SelectedPosition> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_title_twice_gets_distinct_ids() {
        let welder = Position::new("Welder", 4000.0, None);
        let mut roster = SelectionList::new();
        let a = roster.add(welder.clone(), 1);
        let b = roster.add(welder, 3);

        assert_ne!(a, b);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.total_headcount(), 4);
    }

    #[test]
    fn test_total_headcount_saturates() {
        let mut roster = SelectionList::new();
        roster.add(Position::new("Welder", 4000.0, None), u32::MAX);
        roster.add(Position::new("Fitter", 3500.0, None), 1);

        assert_eq!(roster.total_headcount(), u32::MAX);
        assert_eq!(total_headcount(roster.as_slice()), u32::MAX);
    }

    #[test]
    fn test_zero_qty_is_raised_to_one() {
        let mut roster = SelectionList::new();
        roster.add(Position::new("Helper", 1500.0, None), 0);
        assert_eq!(roster.as_slice()[0].qty, 1);
    }

    #[test]
    fn test_update_qty_rejects_zero() {
        let mut roster = SelectionList::new();
        let id = roster.add(Position::new("Helper", 1500.0, None), 2);
        assert!(!roster.update_qty(id, 0));
        assert_eq!(roster.as_slice()[0].qty, 2);
        assert!(roster.update_qty(id, 7));
        assert_eq!(roster.as_slice()[0].qty, 7);
        assert!(!roster.update_qty(SelectionId::new(99), 3));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut roster = SelectionList::new();
        roster.add(Position::new("A", 1.0, None), 1);
        let b = roster.add(Position::new("B", 1.0, None), 1);
        roster.add(Position::new("C", 1.0, None), 1);

        assert_eq!(roster.remove(b).unwrap().name(), "B");
        let names: Vec<&str> = roster.as_slice().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_materialize_drops_unknown_ids() {
        let mut catalog = PositionCatalog::new();
        let fitter = catalog.add(Position::new("Fitter", 3500.0, None));

        let selections = vec![
            PreSelection {
                position_id: fitter,
                qty: 2,
            },
            PreSelection {
                position_id: PositionId::new("missing"),
                qty: 5,
            },
        ];

        let mut roster = SelectionList::new();
        assert_eq!(roster.materialize(&selections, &catalog), 1);
        assert_eq!(roster.total_headcount(), 2);
        assert_eq!(roster.as_slice()[0].name(), "Fitter");
    }

    #[test]
    fn test_from_lines_continues_sequence() {
        let line = SelectedPosition::new(SelectionId::new(4), Position::new("A", 1.0, None), 1);
        let mut roster = SelectionList::from_lines(vec![line]);
        let next = roster.add(Position::new("B", 1.0, None), 1);
        assert_eq!(next, SelectionId::new(5));
    }
}
