//! Parameter sinks
//!
//! A sink receives the exported parameters one `set_parameter` call at a
//! time, in traversal order.

use std::collections::{BTreeMap, HashMap};
use std::process::Command;
use tracing::{debug, warn};

/// Receiver of named string parameters
pub trait ParameterSink {
    /// Offer one parameter. Returns `false` if the sink refused it.
    fn set_parameter(&mut self, key: &str, value: &str) -> bool;
}

impl ParameterSink for BTreeMap<String, String> {
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.insert(key.to_string(), value.to_string());
        true
    }
}

impl ParameterSink for HashMap<String, String> {
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.insert(key.to_string(), value.to_string());
        true
    }
}

/// Installs parameters into the environment of a child process
impl ParameterSink for Command {
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.env(key, value);
        true
    }
}

/// Init-parameter store with servlet context semantics: the first value
/// set under a name wins and later attempts are refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitParameterContext {
    parameters: BTreeMap<String, String>,
}

impl InitParameterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a parameter, as a deployment descriptor would
    pub fn with_parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.parameters.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Set a parameter unless one with the same name already exists
    pub fn set_init_parameter(&mut self, name: &str, value: &str) -> bool {
        if self.parameters.contains_key(name) {
            return false;
        }
        self.parameters.insert(name.to_string(), value.to_string());
        true
    }

    pub fn get_init_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn init_parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl ParameterSink for InitParameterContext {
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.set_init_parameter(key, value)
    }
}

/// Outcome of installing a parameter set into a sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub installed: Vec<String>,
    pub refused: Vec<String>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.refused.is_empty()
    }

    pub(crate) fn record(&mut self, key: &str, accepted: bool) {
        if accepted {
            debug!("Installed parameter: {}", key);
            self.installed.push(key.to_string());
        } else {
            warn!("Sink kept its existing value for parameter: {}", key);
            self.refused.push(key.to_string());
        }
    }
}
