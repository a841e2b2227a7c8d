//! Mandatory-aspect closures.
//!
//! The closure of a declaration is every aspect that must accompany it:
//! its own mandatory aspects, the mandatory aspects inherited from each
//! ancestor, and transitively the mandatory aspects of those aspects. When
//! the declaration has ancestors, each required aspect also brings its own
//! ancestors along.
//!
//! Each name is checked before it is appended, so the closure never holds a
//! name twice and never holds an ancestor of an aspect declaration.

use im::Vector;
use tracing::trace;

use cmodel_foundation::{DeclarationKind, Error, QualifiedName, Result, Violation};
use cmodel_store::SchemaStore;

use crate::ancestors::AncestorChain;
use crate::config::ResolverConfig;

/// Computes mandatory-aspect closures.
pub struct MandatoryClosure<'a, S: SchemaStore + ?Sized> {
    store: &'a S,
    config: &'a ResolverConfig,
    kind: DeclarationKind,
    start: &'a QualifiedName,
    ancestors: &'a Vector<QualifiedName>,
}

impl<'a, S: SchemaStore + ?Sized> MandatoryClosure<'a, S> {
    /// Computes the closure of `start`, given its ancestor chain.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `start` is not declared
    /// - `DanglingMandatory` if a required aspect is not declared
    /// - `MandatoryAncestorConflict` if a required aspect is an ancestor
    /// - `DuplicateMandatory` if an aspect is required twice
    /// - any error raised walking a required aspect's own ancestors
    pub fn compute(
        store: &'a S,
        config: &'a ResolverConfig,
        kind: DeclarationKind,
        start: &'a QualifiedName,
        ancestors: &'a Vector<QualifiedName>,
    ) -> Result<Vector<QualifiedName>> {
        if config.is_terminator(kind, start) {
            return Ok(Vector::new());
        }
        let declaration = store
            .declaration(kind, start)
            .ok_or_else(|| Error::not_found(kind, start.clone()))?;

        let walker = Self {
            store,
            config,
            kind,
            start,
            ancestors,
        };

        let inherited = ancestors.iter().filter_map(|ancestor| {
            store
                .declaration(kind, ancestor)
                .map(|decl| (&decl.name, &decl.mandatory))
        });

        std::iter::once((&declaration.name, &declaration.mandatory))
            .chain(inherited)
            .flat_map(|(owner, required)| required.iter().map(move |aspect| (owner, aspect)))
            .try_fold(Vector::new(), |closure, (owner, aspect)| {
                walker.expand(kind, owner, aspect, closure)
            })
    }

    /// Appends `aspect`, required by `owner`, and everything it brings.
    fn expand(
        &self,
        owner_kind: DeclarationKind,
        owner: &QualifiedName,
        aspect: &QualifiedName,
        closure: Vector<QualifiedName>,
    ) -> Result<Vector<QualifiedName>> {
        let declaration = self
            .store
            .declaration(DeclarationKind::Aspect, aspect)
            .ok_or_else(|| {
                Error::violation(Violation::DanglingMandatory {
                    kind: owner_kind,
                    declaration: owner.clone(),
                    aspect: aspect.clone(),
                })
            })?;

        let mut closure = self.admit(aspect, owner, closure)?;

        if !self.ancestors.is_empty() {
            let inherited =
                AncestorChain::walk(self.store, self.config, DeclarationKind::Aspect, aspect)?;
            for ancestor in &inherited {
                closure = self.admit(ancestor, aspect, closure)?;
            }
        }

        declaration
            .mandatory
            .iter()
            .try_fold(closure, |closure, nested| {
                self.expand(DeclarationKind::Aspect, aspect, nested, closure)
            })
    }

    /// Checks `aspect` against the ancestors and the closure so far, then
    /// returns the closure with `aspect` appended.
    fn admit(
        &self,
        aspect: &QualifiedName,
        via: &QualifiedName,
        mut closure: Vector<QualifiedName>,
    ) -> Result<Vector<QualifiedName>> {
        // Type ancestors live in the other namespace.
        if self.kind == DeclarationKind::Aspect && self.ancestors.contains(aspect) {
            return Err(Error::violation(Violation::MandatoryAncestorConflict {
                kind: self.kind,
                declaration: self.start.clone(),
                aspect: aspect.clone(),
            }));
        }
        if closure.contains(aspect) {
            return Err(Error::violation(Violation::DuplicateMandatory {
                kind: self.kind,
                declaration: self.start.clone(),
                aspect: aspect.clone(),
                via: via.clone(),
            }));
        }
        trace!(kind = %self.kind, start = %self.start, %aspect, %via, "mandatory");
        closure.push_back(aspect.clone());
        Ok(closure)
    }
}
