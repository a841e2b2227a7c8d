//! Declaration resolution.
//!
//! The resolver turns raw declarations into [`SchemaNode`] trees, checking
//! every structural invariant on the way. It only reads from its store, and
//! each call builds a private tree.

use std::collections::HashSet;

use tracing::debug;

use cmodel_foundation::{DeclarationKind, Error, QualifiedName, Result, Violation};
use cmodel_store::SchemaStore;

use crate::ancestors::AncestorChain;
use crate::closure::MandatoryClosure;
use crate::collision::PropertyCollisionChecker;
use crate::config::ResolverConfig;
use crate::link::{LinkGuard, Relation};
use crate::node::{PropertyNode, SchemaNode};

/// Resolves declarations from a [`SchemaStore`].
pub struct Resolver<'s, S: SchemaStore + ?Sized> {
    store: &'s S,
    config: ResolverConfig,
}

impl<'s, S: SchemaStore + ?Sized> Resolver<'s, S> {
    /// Creates a resolver with the default terminators.
    #[must_use]
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            config: ResolverConfig::default(),
        }
    }

    /// Builder method to replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the store being read.
    #[must_use]
    pub fn store(&self) -> &'s S {
        self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `kind`/`name` into a validated tree.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the declaration does not exist, or the first
    /// violation found in it or anything it references. Each error carries
    /// the chain of declarations being resolved when it was raised.
    pub fn resolve(&self, kind: DeclarationKind, name: &QualifiedName) -> Result<SchemaNode> {
        let mut path = Vec::new();
        self.resolve_node(kind, name, &mut path)
    }

    /// Like [`Resolver::resolve`], but a missing declaration is `Ok(None)`.
    ///
    /// Only the top-level lookup is optional. A missing parent or mandatory
    /// aspect further down is still an error.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn find(&self, kind: DeclarationKind, name: &QualifiedName) -> Result<Option<SchemaNode>> {
        if !self.config.is_terminator(kind, name) && !self.store.contains(kind, name) {
            return Ok(None);
        }
        self.resolve(kind, name).map(Some)
    }

    /// Returns the ancestor chain of `kind`/`name`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DanglingReference` or `InheritanceCycle`.
    pub fn ancestors(&self, kind: DeclarationKind, name: &QualifiedName) -> Result<Vec<QualifiedName>> {
        AncestorChain::walk(self.store, &self.config, kind, name).map(|chain| chain.into_iter().collect())
    }

    /// Returns the mandatory-aspect closure of `kind`/`name`.
    ///
    /// # Errors
    ///
    /// Returns any error raised walking the ancestors or the closure.
    pub fn closure(&self, kind: DeclarationKind, name: &QualifiedName) -> Result<Vec<QualifiedName>> {
        let ancestors = AncestorChain::walk(self.store, &self.config, kind, name)?;
        MandatoryClosure::compute(self.store, &self.config, kind, name, &ancestors)
            .map(|closure| closure.into_iter().collect())
    }

    /// Resolves every declaration of both kinds in store order.
    ///
    /// A name declared twice is resolved once. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error found.
    pub fn validate_all(&self) -> Result<usize> {
        let mut checked = 0;
        for kind in DeclarationKind::ALL {
            let mut names = self.store.declaration_names(kind);
            let mut seen = HashSet::with_capacity(names.len());
            names.retain(|name| seen.insert(name.clone()));
            for name in &names {
                self.resolve(kind, name)?;
                checked += 1;
            }
        }
        debug!(checked, "model validated");
        Ok(checked)
    }

    /// Checks that `source` may gain a `relation` edge to `target`.
    ///
    /// # Errors
    ///
    /// Returns a resolution error for either endpoint, or the link refusal.
    pub fn can_link(
        &self,
        kind: DeclarationKind,
        source: &QualifiedName,
        target: &QualifiedName,
        relation: Relation,
    ) -> Result<()> {
        LinkGuard::new(self).can_link(kind, source, target, relation)
    }

    fn resolve_node(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        path: &mut Vec<(DeclarationKind, QualifiedName)>,
    ) -> Result<SchemaNode> {
        self.resolve_inner(kind, name, path)
            .map_err(|e| e.in_frame(format!("{kind} {name}")))
    }

    fn resolve_inner(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        path: &mut Vec<(DeclarationKind, QualifiedName)>,
    ) -> Result<SchemaNode> {
        if self.config.is_terminator(kind, name) {
            return Ok(SchemaNode::built_in(kind, name.clone()));
        }

        let declaration = self
            .store
            .declaration(kind, name)
            .ok_or_else(|| Error::not_found(kind, name.clone()))?;

        let count = self
            .store
            .declaration_names(kind)
            .iter()
            .filter(|n| *n == name)
            .count();
        if count > 1 {
            return Err(Error::violation(Violation::DuplicateDeclaration {
                kind,
                name: name.clone(),
                count,
            }));
        }

        // A parent reached again through a mandatory aspect.
        if path.iter().any(|(k, n)| *k == kind && n == name) {
            let mut chain: Vec<_> = path.iter().map(|(_, n)| n.clone()).collect();
            chain.push(name.clone());
            return Err(Error::violation(Violation::InheritanceCycle {
                kind,
                name: name.clone(),
                chain,
            }));
        }

        let ancestors = AncestorChain::walk(self.store, &self.config, kind, name)?;
        MandatoryClosure::compute(self.store, &self.config, kind, name, &ancestors)?;

        path.push((kind, name.clone()));
        let parent = declaration
            .parent
            .as_ref()
            .map(|parent| self.resolve_node(kind, parent, path).map(Box::new))
            .transpose()?;
        let mandatory = declaration
            .mandatory
            .iter()
            .map(|aspect| self.resolve_node(DeclarationKind::Aspect, aspect, path))
            .collect::<Result<Vec<_>>>()?;
        path.pop();

        let properties = declaration
            .properties
            .iter()
            .map(|property| {
                self.store
                    .property(kind, name, property)
                    .map(PropertyNode::from)
                    .ok_or_else(|| {
                        Error::violation(Violation::MissingProperty {
                            kind,
                            declaration: name.clone(),
                            property: property.clone(),
                        })
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let node = SchemaNode {
            kind,
            name: name.clone(),
            title: declaration.title.clone(),
            description: declaration.description.clone(),
            parent,
            mandatory,
            properties,
            built_in: false,
        };
        PropertyCollisionChecker::check(&node)?;

        debug!(
            %kind,
            %name,
            ancestors = ancestors.len(),
            mandatory = node.mandatory.len(),
            "resolved"
        );
        Ok(node)
    }
}
