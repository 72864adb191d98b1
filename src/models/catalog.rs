use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::CatalogEntryType;

/// An entry in the admin-managed medication/supplement catalog.
///
/// Patient forms reference entries by id only; the catalog row is the single
/// source of truth for the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationCatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub notes: Option<String>,
    pub link: Option<String>,
    pub entry_type: CatalogEntryType,
}

impl MedicationCatalogEntry {
    /// Resolve a form-held reference against a catalog slice.
    ///
    /// References are stored as free strings; anything that does not match
    /// an entry id resolves to `None` rather than an error.
    pub fn resolve<'a>(
        catalog: &'a [MedicationCatalogEntry],
        reference: &str,
    ) -> Option<&'a MedicationCatalogEntry> {
        catalog.iter().find(|entry| entry.id.to_string() == reference)
    }
}
