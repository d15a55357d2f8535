//! Configuration management module
//!
//! This module defines the typed property tree and binds values onto it
//! from defaults, configuration files and environment variables.

pub mod properties;
pub mod settings;

pub use properties::*;
pub use settings::*;
