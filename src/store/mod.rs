//! Document stores: loading documents from files and saving them back.
//!
//! Normalization never touches the file system itself. A [`DocumentStore`]
//! turns a file into a [`Document`] and back, and the [`StoreRegistry`]
//! picks a store by file extension.
//!
//! # Example
//!
//! ```no_run
//! use cnpunct::store::StoreRegistry;
//! use std::path::Path;
//!
//! fn main() -> cnpunct::Result<()> {
//!     let registry = StoreRegistry::with_defaults();
//!     let store = registry.store_for(Path::new("report.json"))?;
//!     let doc = store.load(Path::new("report.json"))?;
//!     println!("{} paragraphs", doc.paragraph_count());
//!     Ok(())
//! }
//! ```

mod json;

pub use json::{from_json, to_json, JsonFormat, JsonStore};

use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for document stores.
///
/// Implement this trait to plug in a new container format.
pub trait DocumentStore: Send + Sync {
    /// Get the supported file extensions for this store.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this store.
    fn name(&self) -> &str;

    /// Load a document from the given path.
    fn load(&self, path: &Path) -> Result<Document>;

    /// Save a document to the given path.
    fn save(&self, document: &Document, path: &Path) -> Result<()>;

    /// Check if this store supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document stores, keyed by extension and by name.
pub struct StoreRegistry {
    stores: HashMap<String, Arc<dyn DocumentStore>>,
    by_name: HashMap<String, Arc<dyn DocumentStore>>,
}

impl StoreRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default stores (JSON).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonStore::new()));
        registry
    }

    /// Register a store for all its supported extensions.
    ///
    /// A later registration for the same extension replaces the earlier one.
    pub fn register(&mut self, store: Arc<dyn DocumentStore>) {
        for ext in store.supported_extensions() {
            self.stores.insert(ext.to_lowercase(), store.clone());
        }
        self.by_name.insert(store.name().to_lowercase(), store);
    }

    /// Get a store by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentStore>> {
        self.stores.get(&ext.to_lowercase()).cloned()
    }

    /// Get a store by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentStore>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.stores.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.stores.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Find the store responsible for `path`.
    pub fn store_for(&self, path: &Path) -> Result<Arc<dyn DocumentStore>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::MissingExtension(path.to_path_buf()))?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
    }

    /// Load a document with the store matching its extension.
    pub fn load(&self, path: &Path) -> Result<Document> {
        let store = self.store_for(path)?;
        log::info!("Loading {} with {} store", path.display(), store.name());
        store.load(path)
    }

    /// Save a document with the store matching the target extension.
    pub fn save(&self, document: &Document, path: &Path) -> Result<()> {
        let store = self.store_for(path)?;
        log::info!("Saving {} with {} store", path.display(), store.name());
        store.save(document, path)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
