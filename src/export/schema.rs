//! Explicit field schemas for configuration nodes
//!
//! A node type lists its fields once, in declaration order, as a static
//! table of [`FieldSpec`]s. Each entry names the field, and either carries
//! the export key and value accessor of a leaf or the accessor of a nested
//! child node. The table is the only metadata the exporter reads.

use super::value::{LeafValue, ValueKind};

/// One entry in a node type's schema table
pub struct FieldSpec<T: 'static> {
    /// Property name, used for binding and for diagnostic paths
    pub name: &'static str,
    /// Human readable description shown by `describe`
    pub description: &'static str,
    pub kind: FieldKind<T>,
}

/// Leaf or nested accessor for a field
pub enum FieldKind<T: 'static> {
    Leaf {
        key: &'static str,
        value_kind: ValueKind,
        get: fn(&T) -> Option<LeafValue>,
    },
    Nested {
        get: fn(&T) -> &dyn ConfigNode,
    },
}

impl<T: 'static> FieldSpec<T> {
    pub fn is_nested(&self) -> bool {
        matches!(self.kind, FieldKind::Nested { .. })
    }

    pub fn export_key(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Leaf { key, .. } => Some(key),
            FieldKind::Nested { .. } => None,
        }
    }

    /// Resolve this spec against a concrete node
    pub fn bind<'a>(&self, node: &'a T) -> Field<'a> {
        match &self.kind {
            FieldKind::Leaf {
                key,
                value_kind,
                get,
            } => Field::Leaf {
                name: self.name,
                description: self.description,
                key: *key,
                value_kind: *value_kind,
                value: get(node),
            },
            FieldKind::Nested { get } => Field::Nested {
                name: self.name,
                node: get(node),
            },
        }
    }
}

/// A field resolved against a node instance
pub enum Field<'a> {
    Leaf {
        name: &'static str,
        description: &'static str,
        key: &'static str,
        value_kind: ValueKind,
        value: Option<LeafValue>,
    },
    Nested {
        name: &'static str,
        node: &'a dyn ConfigNode,
    },
}

impl Field<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Leaf { name, .. } | Field::Nested { name, .. } => *name,
        }
    }
}

/// A node of a configuration tree, as seen by the exporter
pub trait ConfigNode {
    /// Fields of this node in declaration order
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Types that describe themselves with a static schema table
pub trait Schema: Sized + 'static {
    fn schema() -> &'static [FieldSpec<Self>];
}

impl<T: Schema> ConfigNode for T {
    fn fields(&self) -> Vec<Field<'_>> {
        T::schema().iter().map(|spec| spec.bind(self)).collect()
    }
}
