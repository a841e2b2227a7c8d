//! Configuration for resolution.

use cmodel_foundation::{DeclarationKind, QualifiedName};

/// Configuration for the resolver.
///
/// Terminators are synthetic built-in declarations that end a parent chain.
/// They have no parent, no mandatory aspects and no properties, and they can
/// never be extended or annotated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Built-in chain terminators per namespace.
    terminators: Vec<(DeclarationKind, QualifiedName)>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ["folder", "content"]
            .into_iter()
            .filter_map(|local| QualifiedName::new(Self::BUILTIN_PREFIX, local).ok())
            .fold(Self::new(), |config, name| {
                config.with_terminator(DeclarationKind::Type, name)
            })
    }
}

impl ResolverConfig {
    /// Prefix of the built-in declarations.
    pub const BUILTIN_PREFIX: &'static str = "cm";

    /// Creates a configuration with no terminators at all.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminators: Vec::new(),
        }
    }

    /// Builder method to add a terminator.
    #[must_use]
    pub fn with_terminator(mut self, kind: DeclarationKind, name: QualifiedName) -> Self {
        if !self.is_terminator(kind, &name) {
            self.terminators.push((kind, name));
        }
        self
    }

    /// Returns true if `kind`/`name` is a built-in terminator.
    #[must_use]
    pub fn is_terminator(&self, kind: DeclarationKind, name: &QualifiedName) -> bool {
        self.terminators.iter().any(|(k, n)| *k == kind && n == name)
    }

    /// Iterates over the terminators of one kind.
    pub fn terminators(&self, kind: DeclarationKind) -> impl Iterator<Item = &QualifiedName> + '_ {
        self.terminators
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, n)| n)
    }
}
