//! Resolved schema trees.
//!
//! A [`SchemaNode`] is built bottom-up by the resolver and owns its parent
//! and mandatory aspects outright. Two resolutions never share nodes.

use std::fmt;

use cmodel_foundation::{DeclarationKind, QualifiedName, Typology};
use cmodel_store::RawProperty;

/// A fully resolved and validated declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaNode {
    /// Namespace of the declaration.
    pub kind: DeclarationKind,
    /// Declaration name.
    pub name: QualifiedName,
    /// Human readable title.
    pub title: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
    /// Resolved parent.
    pub parent: Option<Box<SchemaNode>>,
    /// Resolved mandatory aspects, in declaration order.
    pub mandatory: Vec<SchemaNode>,
    /// Own properties, in declaration order.
    pub properties: Vec<PropertyNode>,
    /// True for the synthetic chain terminators.
    pub built_in: bool,
}

impl SchemaNode {
    /// Creates the node for a synthetic built-in declaration.
    #[must_use]
    pub fn built_in(kind: DeclarationKind, name: QualifiedName) -> Self {
        Self {
            kind,
            name,
            title: None,
            description: None,
            parent: None,
            mandatory: Vec::new(),
            properties: Vec::new(),
            built_in: true,
        }
    }

    /// Returns the parent chain names, nearest first, built-ins included.
    #[must_use]
    pub fn ancestor_names(&self) -> Vec<&QualifiedName> {
        let mut names = Vec::new();
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            names.push(&node.name);
            current = node.parent.as_deref();
        }
        names
    }

    /// Returns the names of the directly required aspects.
    #[must_use]
    pub fn mandatory_names(&self) -> Vec<&QualifiedName> {
        self.mandatory.iter().map(|m| &m.name).collect()
    }

    /// Returns the own property named `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyNode> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns every property visible from this node with its declaring node.
    ///
    /// Order is own properties, then the parent's visible properties, then
    /// each mandatory aspect's visible properties.
    #[must_use]
    pub fn visible_properties(&self) -> Vec<(&QualifiedName, &PropertyNode)> {
        let mut out = Vec::new();
        self.collect_visible(&mut out);
        out
    }

    fn collect_visible<'a>(&'a self, out: &mut Vec<(&'a QualifiedName, &'a PropertyNode)>) {
        out.extend(self.properties.iter().map(|p| (&self.name, p)));
        if let Some(parent) = &self.parent {
            parent.collect_visible(out);
        }
        for aspect in &self.mandatory {
            aspect.collect_visible(out);
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize, relation: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}{relation}{} {}", self.kind, self.name)?;
        if let Some(title) = &self.title {
            write!(f, " \"{title}\"")?;
        }
        if self.built_in {
            write!(f, " (built-in)")?;
        }
        writeln!(f)?;

        for property in &self.properties {
            writeln!(f, "{indent}  property {property}")?;
        }
        if let Some(parent) = &self.parent {
            parent.write_tree(f, depth + 1, "extends ")?;
        }
        for aspect in &self.mandatory {
            aspect.write_tree(f, depth + 1, "requires ")?;
        }
        Ok(())
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0, "")
    }
}

/// A resolved property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyNode {
    /// Property name.
    pub name: String,
    /// Human readable title.
    pub title: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
    /// Value typology.
    pub typology: Typology,
    /// Whether a value is required.
    pub mandatory: bool,
}

impl From<&RawProperty> for PropertyNode {
    fn from(raw: &RawProperty) -> Self {
        Self {
            name: raw.name.clone(),
            title: raw.title.clone(),
            description: raw.description.clone(),
            typology: raw.typology,
            mandatory: raw.mandatory,
        }
    }
}

impl fmt::Display for PropertyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.typology)?;
        if self.mandatory {
            write!(f, " (mandatory)")?;
        }
        Ok(())
    }
}
