//! Property shadowing detection.

use std::collections::HashMap;

use cmodel_foundation::{Error, QualifiedName, Result, Violation};

use crate::node::SchemaNode;

/// Checks that no property name is visible twice from one node.
///
/// The visible scope of a node is its own properties, then the visible
/// scope of its parent, then the visible scope of each mandatory aspect.
/// The first repeated name aborts the check.
pub struct PropertyCollisionChecker<'a> {
    seen: HashMap<&'a str, &'a QualifiedName>,
}

impl<'a> PropertyCollisionChecker<'a> {
    /// Checks the combined scope of `node`.
    ///
    /// # Errors
    ///
    /// Returns `PropertyCollision` naming the first and second declarers.
    pub fn check(node: &'a SchemaNode) -> Result<()> {
        let mut checker = Self {
            seen: HashMap::new(),
        };
        checker.visit(node)
    }

    fn visit(&mut self, node: &'a SchemaNode) -> Result<()> {
        for property in &node.properties {
            if let Some(first) = self.seen.insert(&property.name, &node.name) {
                return Err(Error::violation(Violation::PropertyCollision {
                    property: property.name.clone(),
                    first: first.clone(),
                    second: node.name.clone(),
                }));
            }
        }
        if let Some(parent) = &node.parent {
            self.visit(parent)?;
        }
        node.mandatory.iter().try_for_each(|aspect| self.visit(aspect))
    }
}
