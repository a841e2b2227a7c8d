//! Raw declarations as they are written in a content model.
//!
//! Nothing here is validated beyond its shape: parents and mandatory aspects
//! may dangle, loop or repeat. Resolution is where those are caught.

use cmodel_foundation::{DeclarationKind, QualifiedName, Typology};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An aspect or type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawDeclaration {
    /// Namespace of the declaration.
    pub kind: DeclarationKind,
    /// Declaration name.
    pub name: QualifiedName,
    /// Human readable title.
    pub title: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
    /// Single inheritance parent.
    pub parent: Option<QualifiedName>,
    /// Aspects that always accompany this declaration, in declaration order.
    pub mandatory: Vec<QualifiedName>,
    /// Names of the properties this declaration defines itself.
    pub properties: Vec<String>,
}

impl RawDeclaration {
    /// Creates a declaration with no parent, mandatory aspects or properties.
    #[must_use]
    pub fn new(kind: DeclarationKind, name: QualifiedName) -> Self {
        Self {
            kind,
            name,
            title: None,
            description: None,
            parent: None,
            mandatory: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Creates an aspect declaration.
    #[must_use]
    pub fn aspect(name: QualifiedName) -> Self {
        Self::new(DeclarationKind::Aspect, name)
    }

    /// Creates a type declaration.
    #[must_use]
    pub fn content_type(name: QualifiedName) -> Self {
        Self::new(DeclarationKind::Type, name)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parent.
    #[must_use]
    pub fn with_parent(mut self, parent: QualifiedName) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends a mandatory aspect.
    #[must_use]
    pub fn with_mandatory(mut self, aspect: QualifiedName) -> Self {
        self.mandatory.push(aspect);
        self
    }

    /// Appends an own property name.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.push(property.into());
        self
    }

    /// Returns true if this declaration is `kind`/`name`.
    #[must_use]
    pub fn is(&self, kind: DeclarationKind, name: &QualifiedName) -> bool {
        self.kind == kind && &self.name == name
    }
}

/// A property definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawProperty {
    /// Property name, unique within its owner.
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

impl RawProperty {
    /// Creates an optional property with no title or description.
    #[must_use]
    pub fn new(name: impl Into<String>, typology: Typology) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            typology,
            mandatory: false,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the property as requiring a value.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.mandatory = true;
        self
    }
}
