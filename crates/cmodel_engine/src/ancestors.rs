//! Single-parent chain walking.
//!
//! The chain of a declaration lists everything above it, nearest first. The
//! declaration itself is never part of its own chain, and built-in
//! terminators end the walk without being listed.

use im::Vector;
use tracing::trace;

use cmodel_foundation::{DeclarationKind, Error, QualifiedName, Result, Violation};
use cmodel_store::SchemaStore;

use crate::config::ResolverConfig;

/// Computes ancestor chains.
pub struct AncestorChain;

impl AncestorChain {
    /// Walks the parent links of `start`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `start` is not declared
    /// - `DanglingReference` if a parent is not declared under `kind`
    /// - `InheritanceCycle` if a name is reached twice, `start` included
    pub fn walk<S: SchemaStore + ?Sized>(
        store: &S,
        config: &ResolverConfig,
        kind: DeclarationKind,
        start: &QualifiedName,
    ) -> Result<Vector<QualifiedName>> {
        let mut chain = Vector::new();
        if config.is_terminator(kind, start) {
            return Ok(chain);
        }

        let mut current = store
            .declaration(kind, start)
            .ok_or_else(|| Error::not_found(kind, start.clone()))?;

        while let Some(parent) = &current.parent {
            if config.is_terminator(kind, parent) {
                break;
            }

            let next = store.declaration(kind, parent).ok_or_else(|| {
                Error::violation(Violation::DanglingReference {
                    kind,
                    child: current.name.clone(),
                    parent: parent.clone(),
                })
            })?;

            if parent == start || chain.contains(parent) {
                let mut walked: Vec<_> = std::iter::once(start.clone())
                    .chain(chain.iter().cloned())
                    .collect();
                walked.push(parent.clone());
                return Err(Error::violation(Violation::InheritanceCycle {
                    kind,
                    name: parent.clone(),
                    chain: walked,
                }));
            }

            trace!(%kind, %start, ancestor = %parent, "ancestor");
            chain.push_back(parent.clone());
            current = next;
        }

        Ok(chain)
    }
}
