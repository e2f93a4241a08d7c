//! Algorithm catalog: what can be visualized and which entries can
//! produce an event sequence.

mod api;
mod registry;

pub use api::EventGenerator;
pub use registry::{AlgorithmCatalog, AlgorithmCategory, AlgorithmInfo, GeneratorFactory};

use thiserror::Error;

use crate::layout::LayoutError;

/// Errors from catalog lookups.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No entry with this id
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Entry exists but has no event generator yet
    #[error("algorithm '{0}' does not have a visualization generator yet")]
    NoGenerator(String),

    /// Category name not recognised
    #[error("unknown category '{0}' (expected sorting, searching, trees or graphs)")]
    UnknownCategory(String),

    /// Generator rejected the layout
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
