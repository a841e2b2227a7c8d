//! Content model storage with immutable snapshots.
//!
//! A [`ContentModel`] keeps its declarations and property definitions in
//! persistent vectors. Every edit returns a new model that shares structure
//! with the old one, so a caller can apply an edit to a copy, validate the
//! copy, and only then replace the original.

use im::Vector;
use tracing::debug;

use cmodel_foundation::{DeclarationKind, Error, ErrorKind, QualifiedName, Result};

use crate::declaration::{RawDeclaration, RawProperty};
use crate::store::SchemaStore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A property definition together with the declaration that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyEntry {
    /// Namespace of the owner.
    pub kind: DeclarationKind,
    /// Owning declaration.
    pub owner: QualifiedName,
    /// The definition.
    pub property: RawProperty,
}

/// An in-memory content model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentModel {
    /// Model name; its prefix qualifies every declaration created in it.
    name: QualifiedName,
    /// Declarations in declaration order. Duplicates are kept as written.
    declarations: Vector<RawDeclaration>,
    /// Property definitions in declaration order.
    properties: Vector<PropertyEntry>,
}

impl ContentModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            declarations: Vector::new(),
            properties: Vector::new(),
        }
    }

    /// Appends a declaration without any checks.
    ///
    /// Used when loading a model as written; a name declared twice is kept
    /// twice and reported when it is resolved.
    #[must_use]
    pub fn with_declaration(mut self, declaration: RawDeclaration) -> Self {
        self.declarations.push_back(declaration);
        self
    }

    /// Appends a property definition without any checks.
    #[must_use]
    pub fn with_property(
        mut self,
        kind: DeclarationKind,
        owner: QualifiedName,
        property: RawProperty,
    ) -> Self {
        self.properties.push_back(PropertyEntry {
            kind,
            owner,
            property,
        });
        self
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Returns the prefix used to qualify new declarations.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.name.prefix()
    }

    /// Returns the number of declarations, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over the declarations of one kind.
    pub fn declarations(&self, kind: DeclarationKind) -> impl Iterator<Item = &RawDeclaration> + '_ {
        self.declarations.iter().filter(move |d| d.kind == kind)
    }

    /// Iterates over every property definition.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyEntry> + '_ {
        self.properties.iter()
    }

    /// Returns true if any declaration defines a property named `name`.
    #[must_use]
    pub fn has_property_named(&self, name: &str) -> bool {
        self.properties.iter().any(|e| e.property.name == name)
    }

    /// Adds a new declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already declared under the same kind.
    pub fn declare(&self, declaration: RawDeclaration) -> Result<ContentModel> {
        if self.contains(declaration.kind, &declaration.name) {
            return Err(Error::new(ErrorKind::AlreadyDeclared {
                kind: declaration.kind,
                name: declaration.name,
            }));
        }
        debug!(kind = %declaration.kind, name = %declaration.name, "declaring");
        Ok(self.clone().with_declaration(declaration))
    }

    /// Sets the parent of `source`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not declared.
    pub fn extend(
        &self,
        kind: DeclarationKind,
        source: &QualifiedName,
        parent: QualifiedName,
    ) -> Result<ContentModel> {
        debug!(%kind, %source, %parent, "extending");
        self.update(kind, source, |decl| decl.parent = Some(parent))
    }

    /// Appends `aspect` to the mandatory aspects of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not declared.
    pub fn require(
        &self,
        kind: DeclarationKind,
        source: &QualifiedName,
        aspect: QualifiedName,
    ) -> Result<ContentModel> {
        debug!(%kind, %source, %aspect, "adding mandatory aspect");
        self.update(kind, source, |decl| decl.mandatory.push(aspect))
    }

    /// Adds a property to `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if `owner` is not declared or a property with the
    /// same name exists anywhere in the model.
    pub fn add_property(
        &self,
        kind: DeclarationKind,
        owner: &QualifiedName,
        property: RawProperty,
    ) -> Result<ContentModel> {
        if self.has_property_named(&property.name) {
            return Err(Error::new(ErrorKind::DuplicateProperty(property.name)));
        }
        debug!(%kind, %owner, property = %property.name, "adding property");
        let name = property.name.clone();
        let model = self.update(kind, owner, |decl| decl.properties.push(name))?;
        Ok(model.with_property(kind, owner.clone(), property))
    }

    /// Applies `edit` to the first declaration of `kind`/`name`.
    fn update(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        edit: impl FnOnce(&mut RawDeclaration),
    ) -> Result<ContentModel> {
        let index = self
            .declarations
            .iter()
            .position(|d| d.is(kind, name))
            .ok_or_else(|| Error::not_found(kind, name.clone()))?;

        let mut model = self.clone();
        if let Some(decl) = model.declarations.get_mut(index) {
            edit(decl);
        }
        Ok(model)
    }
}

impl SchemaStore for ContentModel {
    fn declaration(&self, kind: DeclarationKind, name: &QualifiedName) -> Option<&RawDeclaration> {
        self.declarations.iter().find(|d| d.is(kind, name))
    }

    fn declaration_names(&self, kind: DeclarationKind) -> Vec<QualifiedName> {
        self.declarations(kind).map(|d| d.name.clone()).collect()
    }

    fn property(
        &self,
        kind: DeclarationKind,
        name: &QualifiedName,
        property: &str,
    ) -> Option<&RawProperty> {
        self.properties
            .iter()
            .find(|e| e.kind == kind && &e.owner == name && e.property.name == property)
            .map(|e| &e.property)
    }
}
