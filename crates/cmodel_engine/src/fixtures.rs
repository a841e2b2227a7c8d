//! Shared builders for engine unit tests.

use cmodel_foundation::{QualifiedName, Typology};
use cmodel_store::{ContentModel, RawDeclaration, RawProperty};

/// Parses a name, qualifying bare names with `acme`.
pub(crate) fn qn(s: &str) -> QualifiedName {
    QualifiedName::parse_or_qualify(s, "acme").unwrap()
}

pub(crate) fn aspect(name: &str) -> RawDeclaration {
    RawDeclaration::aspect(qn(name))
}

pub(crate) fn doc_type(name: &str) -> RawDeclaration {
    RawDeclaration::content_type(qn(name))
}

/// Builds a model as written, defining every listed property as text.
pub(crate) fn model(declarations: impl IntoIterator<Item = RawDeclaration>) -> ContentModel {
    let mut model = ContentModel::new(qn("acme:model"));
    for decl in declarations {
        for property in &decl.properties {
            model = model.with_property(
                decl.kind,
                decl.name.clone(),
                RawProperty::new(property.clone(), Typology::Text),
            );
        }
        model = model.with_declaration(decl);
    }
    model
}
