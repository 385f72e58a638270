use serde::{Deserialize, Serialize};

/// One row of the supplier registry.
///
/// The same `id` may appear on several entries when the registry lists name
/// variants of one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    pub name: String,
}

impl RegistryEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// True when the name carries no text once surrounding whitespace is removed.
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}
