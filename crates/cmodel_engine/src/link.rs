//! Pre-flight checks for new edges.
//!
//! A content model is only ever edited after [`LinkGuard::can_link`] has
//! accepted the edge. Both endpoints are checked, since an edge must not
//! make either one an ancestor and a requirement of the other.

use std::fmt;

use tracing::debug;

use cmodel_foundation::{DeclarationKind, Error, LinkViolation, QualifiedName, Result};
use cmodel_store::SchemaStore;

use crate::resolver::Resolver;

/// The relation a new edge would add.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Make the target the parent of the source.
    Extend,
    /// Add the target to the source's mandatory aspects.
    Mandatory,
}

impl Relation {
    /// Returns the namespace the target lives in.
    #[must_use]
    pub const fn target_kind(self, source_kind: DeclarationKind) -> DeclarationKind {
        match self {
            Self::Extend => source_kind,
            Self::Mandatory => DeclarationKind::Aspect,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extend => write!(f, "extend"),
            Self::Mandatory => write!(f, "mandatory"),
        }
    }
}

/// Validates proposed edges against a resolver's store.
pub struct LinkGuard<'r, 's, S: SchemaStore + ?Sized> {
    resolver: &'r Resolver<'s, S>,
}

impl<'r, 's, S: SchemaStore + ?Sized> LinkGuard<'r, 's, S> {
    /// Creates a guard reading through `resolver`.
    #[must_use]
    pub fn new(resolver: &'r Resolver<'s, S>) -> Self {
        Self { resolver }
    }

    /// Checks that `source` may gain a `relation` edge to `target`.
    ///
    /// # Errors
    ///
    /// - `BuiltIn` if `source` is a built-in terminator
    /// - any resolution error of either endpoint, unchanged
    /// - `WouldCreateCycle` if the edge would close an inheritance loop
    /// - `AlreadyAncestor` if one endpoint already inherits the other
    /// - `AlreadyMandatory` if one endpoint already requires the other
    pub fn can_link(
        &self,
        kind: DeclarationKind,
        source: &QualifiedName,
        target: &QualifiedName,
        relation: Relation,
    ) -> Result<()> {
        if self.resolver.config().is_terminator(kind, source) {
            return Err(Error::link(LinkViolation::BuiltIn {
                kind,
                name: source.clone(),
            }));
        }

        let target_kind = relation.target_kind(kind);
        self.resolver.resolve(kind, source)?;
        self.resolver.resolve(target_kind, target)?;

        if target_kind == kind && source == target {
            return Err(Error::link(LinkViolation::WouldCreateCycle {
                kind,
                source: source.clone(),
                target: target.clone(),
            }));
        }

        self.check_from(relation, (kind, source), (target_kind, target), false)?;
        self.check_from(relation, (target_kind, target), (kind, source), true)?;

        debug!(%kind, %source, %target, %relation, "link accepted");
        Ok(())
    }

    /// Checks `other` against the ancestors and closure of `from`.
    ///
    /// `reverse` is set when `from` is the target of the proposed edge.
    fn check_from(
        &self,
        relation: Relation,
        (from_kind, from): (DeclarationKind, &QualifiedName),
        (other_kind, other): (DeclarationKind, &QualifiedName),
        reverse: bool,
    ) -> Result<()> {
        if self.resolver.config().is_terminator(from_kind, from) {
            return Ok(());
        }

        let ancestors = self.resolver.ancestors(from_kind, from)?;
        if other_kind == from_kind && ancestors.contains(other) {
            let violation = if relation == Relation::Extend && reverse {
                LinkViolation::WouldCreateCycle {
                    kind: other_kind,
                    source: other.clone(),
                    target: from.clone(),
                }
            } else {
                LinkViolation::AlreadyAncestor {
                    kind: from_kind,
                    declaration: from.clone(),
                    ancestor: other.clone(),
                }
            };
            return Err(Error::link(violation));
        }

        if other_kind == DeclarationKind::Aspect {
            let closure = self.resolver.closure(from_kind, from)?;
            if closure.contains(other) {
                return Err(Error::link(LinkViolation::AlreadyMandatory {
                    kind: from_kind,
                    declaration: from.clone(),
                    aspect: other.clone(),
                }));
            }
        }
        Ok(())
    }
}
