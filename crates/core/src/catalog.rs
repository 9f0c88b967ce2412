//! Exercise catalog trait — the abstraction over the reference data store.
//!
//! The catalog is the ground truth for exercise identity: generated names
//! that cannot be resolved against it are flagged, never fabricated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A canonical catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExercise {
    /// Stable identifier used by persistence
    pub id: String,
    /// Canonical display name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
}

impl CatalogExercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_muscle: None,
            movement_pattern: None,
            equipment: Vec::new(),
        }
    }
}

/// The catalog lookup contract: exact-name access plus full iteration for
/// case-insensitive scans.
pub trait ExerciseCatalog: Send + Sync {
    /// Exact-name lookup.
    fn get_by_name(&self, name: &str) -> Option<CatalogExercise>;

    /// All entries, for scans the exact index cannot answer.
    fn all(&self) -> Vec<CatalogExercise>;
}

/// A simple in-memory catalog backed by a name index.
///
/// Suitable for tests and for callers that load the reference data up
/// front; production catalogs implement `ExerciseCatalog` over their own
/// store.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogExercise>,
    by_name: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same name.
    pub fn insert(&mut self, entry: CatalogExercise) {
        if let Some(&idx) = self.by_name.get(&entry.name) {
            self.entries[idx] = entry;
        } else {
            self.by_name.insert(entry.name.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogExercise> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = CatalogExercise>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

impl ExerciseCatalog for InMemoryCatalog {
    fn get_by_name(&self, name: &str) -> Option<CatalogExercise> {
        self.by_name.get(name).map(|&idx| self.entries[idx].clone())
    }

    fn all(&self) -> Vec<CatalogExercise> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup() {
        let catalog: InMemoryCatalog =
            [CatalogExercise::new("ex1", "Barbell Squat")].into_iter().collect();
        assert_eq!(catalog.get_by_name("Barbell Squat").unwrap().id, "ex1");
        assert!(catalog.get_by_name("barbell squat").is_none());
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(CatalogExercise::new("ex1", "Plank"));
        catalog.insert(CatalogExercise::new("ex2", "Plank"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_by_name("Plank").unwrap().id, "ex2");
    }
}
