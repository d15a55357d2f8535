//! initparams - context init-parameter exporter
//!
//! Binds externalized settings onto a typed configuration tree and exports
//! that tree as a flat, ordered set of named string parameters.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod utils;

// Re-export commonly used types
pub use error::{InitParamsError, Result};
pub use export::{ConfigNode, ExportOptions, ParameterExporter, ParameterSet, ParameterSink};
