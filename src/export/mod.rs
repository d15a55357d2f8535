//! Parameter export module
//!
//! This module turns a typed configuration tree into a flat, ordered set of
//! named string parameters and installs that set into parameter sinks.

pub mod describe;
pub mod exporter;
pub mod parameters;
pub mod schema;
pub mod sink;
pub mod value;

pub use describe::*;
pub use exporter::*;
pub use parameters::*;
pub use schema::*;
pub use sink::*;
pub use value::*;
