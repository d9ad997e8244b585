//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    /// Short id printed on the table, e.g. `A1`
    pub id: String,
    /// Display name, e.g. `A1桌 (2人)`
    pub name: String,
    /// Zone the table belongs to (区域: A/B/C)
    pub zone: String,
    /// Seats (advisory only)
    pub capacity: u32,
}

impl DiningTable {
    /// Build a table with the house naming convention `{id}桌 ({capacity}人)`
    pub fn new(id: impl Into<String>, zone: impl Into<String>, capacity: u32) -> Self {
        let id = id.into();
        Self {
            name: format!("{}桌 ({}人)", id, capacity),
            id,
            zone: zone.into(),
            capacity,
        }
    }

    /// Override the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
