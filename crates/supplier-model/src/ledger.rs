use serde::{Deserialize, Serialize};

/// One row of the asset ledger.
///
/// `cells` holds every column of the source row in its original order and is
/// passed through untouched. Only `resolved_code` is written by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Raw supplier name; `None` when the cell was missing.
    pub supplier_name: Option<String>,
    /// Resolved supplier code, empty when unresolved.
    pub resolved_code: String,
    /// All source cells of the row.
    pub cells: Vec<String>,
}

impl LedgerRow {
    pub fn new(supplier_name: Option<String>, cells: Vec<String>) -> Self {
        Self {
            supplier_name,
            resolved_code: String::new(),
            cells,
        }
    }

    /// Convenience constructor for a row with only a supplier name.
    pub fn named(supplier_name: impl Into<String>) -> Self {
        Self::new(Some(supplier_name.into()), Vec::new())
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        !self.resolved_code.is_empty()
    }

    /// Returns a copy of this row carrying `code` as its resolved code.
    #[must_use]
    pub fn with_resolved_code(&self, code: String) -> Self {
        Self {
            supplier_name: self.supplier_name.clone(),
            resolved_code: code,
            cells: self.cells.clone(),
        }
    }
}
