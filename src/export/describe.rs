//! Schema introspection

use super::exporter::walk_leaves;
use super::schema::ConfigNode;
use super::value::ValueKind;
use crate::error::Result;

/// One leaf of a configuration tree, with its current value rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Dotted property path, including the prefix
    pub path: String,
    pub key: &'static str,
    pub kind: ValueKind,
    pub value: Option<String>,
    pub description: &'static str,
}

/// List every leaf of the tree in export order. Values are rendered the
/// way the exporter renders them, with empty strings kept.
pub fn describe_schema(root: &dyn ConfigNode, prefix: &str) -> Result<Vec<SchemaEntry>> {
    let mut entries = Vec::new();
    walk_leaves(root, prefix, &mut |leaf| {
        let value = match leaf.value {
            Some(value) => value.render(leaf.path, false)?,
            None => None,
        };
        entries.push(SchemaEntry {
            path: leaf.path.to_string(),
            key: leaf.key,
            kind: leaf.value_kind,
            value,
            description: leaf.description,
        });
        Ok(())
    })?;
    Ok(entries)
}
