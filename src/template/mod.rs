//! Interface template catalog.
//!
//! The catalog is a read-only store of interface and port-channel templates
//! keyed by (make, model). Resolution never mutates it; every consumer
//! clones the templates it edits.

pub mod types;
pub mod selector;

pub use types::{InterfaceKind, InterfaceTemplate, PortChannelTemplate, TemplateCatalog, COMMON_SET};
pub use selector::{select_variant, TemplateVariant};

use std::collections::HashMap;

/// Read-only source of template catalogs
pub trait CatalogSource {
    /// Catalog for a switch model; `Ok(None)` when no template exists
    fn catalog(&self, make: &str, model: &str) -> Result<Option<TemplateCatalog>, String>;
}

/// Catalogs held in memory, keyed by lower-cased (make, model)
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalogs: HashMap<(String, String), TemplateCatalog>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, make: &str, model: &str, catalog: TemplateCatalog) {
        self.catalogs.insert((make.to_lowercase(), model.to_lowercase()), catalog);
    }
}

impl CatalogSource for InMemoryCatalog {
    fn catalog(&self, make: &str, model: &str) -> Result<Option<TemplateCatalog>, String> {
        Ok(self.catalogs.get(&(make.to_lowercase(), model.to_lowercase())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lookup_ignores_case() {
        let mut source = InMemoryCatalog::new();
        source.insert("Cisco", "93180YC-FX", TemplateCatalog::default());
        assert!(source.catalog("cisco", "93180yc-fx").unwrap().is_some());
        assert!(source.catalog("dellemc", "s5248f-on").unwrap().is_none());
    }
}
