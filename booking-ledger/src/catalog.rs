//! Table Catalog (桌位配置)
//!
//! Fixed set of physical tables, built once at startup. Capacity is advisory:
//! the ledger warns about mismatches but never refuses a table for its size.

use std::collections::HashSet;

use shared::error::{AppError, ErrorCode};
use shared::models::DiningTable;
use thiserror::Error;

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one table")]
    Empty,

    #[error("Duplicate table id: {0}")]
    DuplicateId(String),

    #[error("Table {0} must seat at least one guest")]
    InvalidCapacity(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Empty => AppError::config(message),
            CatalogError::DuplicateId(id) => {
                AppError::with_message(ErrorCode::TableIdDuplicated, message)
                    .with_detail("table_id", id)
            }
            CatalogError::InvalidCapacity(id) => {
                AppError::with_message(ErrorCode::TableInvalidCapacity, message)
                    .with_detail("table_id", id)
            }
        }
    }
}

/// Immutable, ordered set of dining tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCatalog {
    tables: Vec<DiningTable>,
}

impl TableCatalog {
    /// Build a catalog, keeping the given order
    pub fn new(tables: Vec<DiningTable>) -> Result<Self, CatalogError> {
        if tables.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.id.as_str()) {
                return Err(CatalogError::DuplicateId(table.id.clone()));
            }
            if table.capacity == 0 {
                return Err(CatalogError::InvalidCapacity(table.id.clone()));
            }
        }

        Ok(Self { tables })
    }

    /// 店内桌位：A 区 A1-A4 (2人)、A5 (3人)；B 区 B1-B2 (4人)；C 区 C1-C2 (4人)、C3 (3人)
    pub fn house_layout() -> Self {
        let mut tables: Vec<DiningTable> = (1..=4)
            .map(|i| DiningTable::new(format!("A{i}"), "A", 2))
            .collect();
        tables.push(DiningTable::new("A5", "A", 3));
        tables.extend((1..=2).map(|i| DiningTable::new(format!("B{i}"), "B", 4)));
        tables.push(DiningTable::new("C1", "C", 4));
        tables.push(DiningTable::new("C2", "C", 4));
        tables.push(DiningTable::new("C3", "C", 3));

        Self { tables }
    }

    /// All tables in catalog order
    pub fn list(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn get(&self, table_id: &str) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.get(table_id).is_some()
    }

    /// Tables of one zone, in catalog order
    pub fn zone<'a>(&'a self, zone: &'a str) -> impl Iterator<Item = &'a DiningTable> + 'a {
        self.tables.iter().filter(move |t| t.zone == zone)
    }

    /// Total seats of the given tables; unknown ids seat nobody
    ///
    /// Saturates at `u32::MAX`.
    pub fn total_capacity<S: AsRef<str>>(&self, table_ids: &[S]) -> u32 {
        table_ids
            .iter()
            .filter_map(|id| self.get(id.as_ref()))
            .fold(0u32, |acc, t| acc.saturating_add(t.capacity))
    }

    /// Display names joined by `separator`; unknown ids fall back to the raw id
    pub fn combined_name<S: AsRef<str>>(&self, table_ids: &[S], separator: &str) -> String {
        table_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id).map_or(id, |t| t.name.as_str())
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Default for TableCatalog {
    fn default() -> Self {
        Self::house_layout()
    }
}
