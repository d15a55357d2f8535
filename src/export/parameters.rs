//! Ordered, key-unique parameter set

use super::sink::{InstallReport, ParameterSink};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Ordered mapping from export key to string value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Returns `false` and leaves the set unchanged if
    /// the key is already present.
    pub(crate) fn push(&mut self, key: &str, value: String) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn to_btree_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    /// Offer every parameter to the sink, in order
    pub fn install_into(&self, sink: &mut dyn ParameterSink) -> InstallReport {
        let mut report = InstallReport::default();
        for (key, value) in self.iter() {
            let accepted = sink.set_parameter(key, value);
            report.record(key, accepted);
        }
        report
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
