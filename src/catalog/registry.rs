use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::{CatalogError, EventGenerator};
use crate::layout::LayoutConfig;
use crate::recorder::AvlRecorder;

/// Broad grouping shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmCategory {
    /// Sorting algorithms
    Sorting,
    /// Search algorithms
    Searching,
    /// Tree structures
    Trees,
    /// Graph algorithms
    Graphs,
}

impl AlgorithmCategory {
    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmCategory::Sorting => "sorting",
            AlgorithmCategory::Searching => "searching",
            AlgorithmCategory::Trees => "trees",
            AlgorithmCategory::Graphs => "graphs",
        }
    }
}

impl fmt::Display for AlgorithmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sorting" => Ok(AlgorithmCategory::Sorting),
            "searching" => Ok(AlgorithmCategory::Searching),
            "trees" => Ok(AlgorithmCategory::Trees),
            "graphs" => Ok(AlgorithmCategory::Graphs),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// Metadata describing a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Stable slug, e.g. `avl-tree`
    pub id: &'static str,
    pub name: &'static str,
    pub category: AlgorithmCategory,
    pub description: &'static str,
    /// Marked as subscriber-only; gating happens outside this crate.
    pub premium: bool,
}

/// Builds a generator for one catalog entry.
pub type GeneratorFactory = fn(LayoutConfig) -> Result<Box<dyn EventGenerator>, CatalogError>;

struct CatalogEntry {
    info: AlgorithmInfo,
    factory: Option<GeneratorFactory>,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("info", &self.info)
            .field("has_generator", &self.factory.is_some())
            .finish()
    }
}

fn avl_factory(layout: LayoutConfig) -> Result<Box<dyn EventGenerator>, CatalogError> {
    Ok(Box::new(AvlRecorder::with_layout(layout)?))
}

/// Registry of visualizable algorithms, in listing order.
#[derive(Debug, Default)]
pub struct AlgorithmCatalog {
    entries: Vec<CatalogEntry>,
}

impl AlgorithmCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Catalog with the built-in algorithms registered.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            AlgorithmInfo {
                id: "bubble-sort",
                name: "Bubble Sort",
                category: AlgorithmCategory::Sorting,
                description: "A simple sorting algorithm that repeatedly steps through the list.",
                premium: false,
            },
            None,
        );
        catalog.register(
            AlgorithmInfo {
                id: "binary-search",
                name: "Binary Search",
                category: AlgorithmCategory::Searching,
                description: "Efficient algorithm for finding an item in a sorted list.",
                premium: false,
            },
            None,
        );
        catalog.register(
            AlgorithmInfo {
                id: "avl-tree",
                name: "AVL Tree",
                category: AlgorithmCategory::Trees,
                description: "Self-balancing binary search tree with automatic rebalancing.",
                premium: true,
            },
            Some(avl_factory),
        );
        catalog
    }

    /// Register an entry, replacing any existing entry with the same id.
    pub fn register(&mut self, info: AlgorithmInfo, factory: Option<GeneratorFactory>) {
        let entry = CatalogEntry { info, factory };
        match self.entries.iter_mut().find(|e| e.info.id == entry.info.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look an entry up by id.
    pub fn get(&self, id: &str) -> Option<&AlgorithmInfo> {
        self.entries
            .iter()
            .find(|e| e.info.id == id)
            .map(|e| &e.info)
    }

    /// All entries in registration order.
    pub fn list(&self) -> Vec<&AlgorithmInfo> {
        self.entries.iter().map(|e| &e.info).collect()
    }

    /// Entries in one category.
    pub fn by_category(&self, category: AlgorithmCategory) -> Vec<&AlgorithmInfo> {
        self.entries
            .iter()
            .filter(|e| e.info.category == category)
            .map(|e| &e.info)
            .collect()
    }

    /// Entries flagged premium.
    pub fn premium(&self) -> Vec<&AlgorithmInfo> {
        self.entries
            .iter()
            .filter(|e| e.info.premium)
            .map(|e| &e.info)
            .collect()
    }

    /// Whether `id` can produce an event sequence.
    pub fn has_generator(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.info.id == id && e.factory.is_some())
    }

    /// Build a fresh generator for `id` using `layout`.
    pub fn generator(
        &self,
        id: &str,
        layout: LayoutConfig,
    ) -> Result<Box<dyn EventGenerator>, CatalogError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.info.id == id)
            .ok_or_else(|| CatalogError::UnknownAlgorithm(id.to_string()))?;
        let factory = entry
            .factory
            .ok_or_else(|| CatalogError::NoGenerator(id.to_string()))?;
        factory(layout)
    }
}
