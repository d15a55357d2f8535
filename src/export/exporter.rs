//! Tree to parameter set export
//!
//! The exporter walks a frozen configuration tree depth-first. On every node
//! the leaf fields come first, in declaration order, followed by the nested
//! children in declaration order. Each leaf is checked for key uniqueness
//! whether or not it holds a value; leaves without a value are left out.

use super::parameters::ParameterSet;
use super::schema::{ConfigNode, Field};
use super::sink::{InstallReport, ParameterSink};
use super::value::{LeafValue, ValueKind};
use crate::error::{InitParamsError, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Knobs for rendering leaf values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Treat empty strings like unset values and leave their keys out
    pub empty_is_unset: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            empty_is_unset: true,
        }
    }
}

/// A leaf as met during a walk
pub struct LeafVisit<'a> {
    /// Dotted property path from the walk root
    pub path: &'a str,
    pub key: &'static str,
    pub value_kind: ValueKind,
    pub description: &'static str,
    pub value: Option<&'a LeafValue>,
}

/// Walk all leaves of a tree in export order
pub fn walk_leaves<F>(root: &dyn ConfigNode, prefix: &str, visit: &mut F) -> Result<()>
where
    F: FnMut(LeafVisit<'_>) -> Result<()>,
{
    let fields = root.fields();
    let mut nested = Vec::new();

    for field in &fields {
        let path = join_path(prefix, field.name());
        match field {
            Field::Leaf {
                key,
                value_kind,
                description,
                value,
                ..
            } => visit(LeafVisit {
                path: &path,
                key: *key,
                value_kind: *value_kind,
                description: *description,
                value: value.as_ref(),
            })?,
            Field::Nested { node, .. } => nested.push((path, *node)),
        }
    }

    for (path, node) in nested {
        walk_leaves(node, &path, visit)?;
    }

    Ok(())
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Converts configuration trees into parameter sets
#[derive(Debug, Clone, Default)]
pub struct ParameterExporter {
    options: ExportOptions,
}

impl ParameterExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export every leaf holding a value under its declared key.
    ///
    /// Fails with `DuplicateKey` if two leaves declare the same key and with
    /// `UnsupportedValueType` if a value has no string form.
    pub fn export(&self, root: &dyn ConfigNode) -> Result<ParameterSet> {
        let mut parameters = ParameterSet::new();
        let mut origins: HashMap<&'static str, String> = HashMap::new();
        let mut omitted = 0usize;

        walk_leaves(root, "", &mut |leaf| {
            if let Some(first) = origins.get(leaf.key) {
                return Err(InitParamsError::duplicate_key(
                    leaf.key,
                    first.as_str(),
                    leaf.path,
                ));
            }
            origins.insert(leaf.key, leaf.path.to_string());

            let rendered = match leaf.value {
                Some(value) => value.render(leaf.path, self.options.empty_is_unset)?,
                None => None,
            };

            match rendered {
                Some(value) => {
                    debug!("Exporting {} as {}", leaf.path, leaf.key);
                    parameters.push(leaf.key, value);
                }
                None => {
                    debug!("Omitting unset {} ({})", leaf.path, leaf.key);
                    omitted += 1;
                }
            }
            Ok(())
        })?;

        info!(
            "Exported {} parameter(s), {} unset leaf(s) omitted",
            parameters.len(),
            omitted
        );
        Ok(parameters)
    }

    /// Export, then install into the sink. Nothing reaches the sink if the
    /// export fails.
    pub fn export_into(
        &self,
        root: &dyn ConfigNode,
        sink: &mut dyn ParameterSink,
    ) -> Result<InstallReport> {
        let parameters = self.export(root)?;
        Ok(parameters.install_into(sink))
    }
}
