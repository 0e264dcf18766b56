//! Component reference entity - master catalogue entry for a component type

use serde::{Deserialize, Serialize};

/// A row of the component master table.
///
/// Criticality is kept as text: catalogues use their own vocabularies and the
/// pipeline only carries it through to the canonical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReference {
    /// Unique key
    #[serde(alias = "code")]
    pub component_code: String,

    #[serde(alias = "component", alias = "name")]
    pub component_name: String,

    #[serde(default, alias = "ata")]
    pub ata_chapter: String,

    #[serde(default, alias = "component_type")]
    pub category: String,

    #[serde(default)]
    pub criticality: String,
}

impl ComponentReference {
    /// Lookup key used to match removal records that only carry a name
    pub fn name_key(&self) -> String {
        name_key(&self.component_name)
    }
}

/// Normalize a component name for matching (trimmed, lowercase)
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
