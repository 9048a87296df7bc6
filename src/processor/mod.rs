//! Executable units produced by compiling step definitions.

pub mod enricher;

pub use enricher::Enricher;
