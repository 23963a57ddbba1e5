//! Staffing position catalog.
//!
//! A [`Position`] is one job title with its monthly base salary and an
//! optional one-off tool cost per unit. The [`PositionCatalog`] keeps
//! positions unique by name, which is also the de-duplication key used
//! during spreadsheet ingestion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog position.
///
/// # Examples
///
/// ```
/// use quote_core::PositionId;
///
/// let id = PositionId::new("POS001");
/// assert_eq!(id.as_str(), "POS001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(String);

impl PositionId {
    /// Creates a position ID from an existing identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A catalog entry: one job title and its cost basis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Stable identifier
    pub id: PositionId,
    /// Job title, unique within a catalog
    pub name: String,
    /// Monthly base salary
    pub base_salary: f64,
    /// One-off tool cost per unit
    pub specific_tool_cost: Option<f64>,
}

impl Position {
    /// Creates a position with a freshly generated identifier.
    pub fn new(name: impl Into<String>, base_salary: f64, specific_tool_cost: Option<f64>) -> Self {
        Self {
            id: PositionId::generate(),
            name: name.into(),
            base_salary,
            specific_tool_cost,
        }
    }

    /// Creates a position with a known identifier.
    pub fn with_id(
        id: PositionId,
        name: impl Into<String>,
        base_salary: f64,
        specific_tool_cost: Option<f64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            base_salary,
            specific_tool_cost,
        }
    }

    /// Tool cost per unit, zero when absent.
    #[inline]
    pub fn tool_cost_unit(&self) -> f64 {
        self.specific_tool_cost.unwrap_or(0.0)
    }

    /// Whether this position carries a nonzero tool cost.
    #[inline]
    pub fn has_tool_cost(&self) -> bool {
        self.tool_cost_unit() != 0.0
    }
}

/// Ordered collection of positions with unique names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionCatalog {
    positions: Vec<Position>,
}

impl PositionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a position unless one with the same name exists.
    ///
    /// Returns the identifier of the position now holding that name: the
    /// new one, or the existing one when the name was already taken.
    pub fn add(&mut self, position: Position) -> PositionId {
        if let Some(existing) = self.find_by_name(&position.name) {
            return existing.id.clone();
        }
        let id = position.id.clone();
        self.positions.push(position);
        id
    }

    /// Removes a position by identifier, returning it when present.
    pub fn remove(&mut self, id: &PositionId) -> Option<Position> {
        let idx = self.positions.iter().position(|p| &p.id == id)?;
        Some(self.positions.remove(idx))
    }

    /// Looks a position up by identifier.
    pub fn get(&self, id: &PositionId) -> Option<&Position> {
        self.positions.iter().find(|p| &p.id == id)
    }

    /// Looks a position up by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.name == name)
    }

    /// Sorts positions alphabetically by name, ignoring case first.
    pub fn sort_by_name(&mut self) {
        self.positions.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over positions in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// Positions as a slice.
    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }
}

impl FromIterator<Position> for PositionCatalog {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for position in iter {
            catalog.add(position);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a PositionCatalog {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}
