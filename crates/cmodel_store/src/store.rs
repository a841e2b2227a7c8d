//! The read-only store interface consumed by resolution.

use cmodel_foundation::{DeclarationKind, QualifiedName};

use crate::declaration::{RawDeclaration, RawProperty};

/// Lookup of raw declarations by namespace and name.
///
/// Resolution only ever reads through this trait. Implementations must not
/// change while a resolution borrowing them is in flight.
pub trait SchemaStore {
    /// Returns the first declaration named `name` in `kind`.
    fn declaration(&self, kind: DeclarationKind, name: &QualifiedName) -> Option<&RawDeclaration>;

    /// Returns every declared name in `kind`, in store order.
    ///
    /// A name declared twice appears twice.
    fn declaration_names(&self, kind: DeclarationKind) -> Vec<QualifiedName>;

    /// Returns the definition of `property` owned by `kind`/`name`.
    fn property(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        property: &str,
    ) -> Option<&RawProperty>;

    /// Returns true if `kind`/`name` is declared at least once.
    fn contains(&self, kind: DeclarationKind, name: &QualifiedName) -> bool {
        self.declaration(kind, name).is_some()
    }
}

impl<S: SchemaStore + ?Sized> SchemaStore for &S {
    fn declaration(&self, kind: DeclarationKind, name: &QualifiedName) -> Option<&RawDeclaration> {
        (**self).declaration(kind, name)
    }

    fn declaration_names(&self, kind: DeclarationKind) -> Vec<QualifiedName> {
        (**self).declaration_names(kind)
    }

    fn property(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        property: &str,
    ) -> Option<&RawProperty> {
        (**self).property(kind, name, property)
    }
}
