//! Events module - raw feed records, loading and normalization.

mod coerce;
mod events_errors;
mod events_model;
pub mod loader;
mod normalizer;

pub use events_errors::{Feed, IngestionError, RecordLocation};
pub use events_model::*;
pub use loader::{InputFiles, RawInputs};
pub use normalizer::EventNormalizer;

#[cfg(test)]
mod normalizer_tests;
