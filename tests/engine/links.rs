//! Integration tests for link checks
//!
//! Every accepted edge is written to the model before the next check, the
//! way an editing session uses the guard.

use cmodel_engine::{Relation, Resolver};
use cmodel_foundation::{DeclarationKind, LinkViolation, QualifiedName, Result};
use cmodel_store::{ContentModel, RawDeclaration};

fn qn(s: &str) -> QualifiedName {
    QualifiedName::parse(s).unwrap()
}

/// Checks and then applies an edge, returning the edited model.
fn link(
    model: &ContentModel,
    kind: DeclarationKind,
    source: &str,
    target: &str,
    relation: Relation,
) -> Result<ContentModel> {
    let (source, target) = (qn(source), qn(target));
    Resolver::new(model).can_link(kind, &source, &target, relation)?;
    match relation {
        Relation::Extend => model.extend(kind, &source, target),
        Relation::Mandatory => model.require(kind, &source, target),
    }
}

fn refusal(result: Result<ContentModel>) -> LinkViolation {
    match result {
        Ok(_) => panic!("link was accepted"),
        Err(err) => err
            .as_link()
            .cloned()
            .unwrap_or_else(|| panic!("not a link refusal: {err}")),
    }
}

fn documents() -> ContentModel {
    ContentModel::new(qn("acme:model"))
        .declare(RawDeclaration::content_type(qn("acme:baseDoc")).with_parent(qn("cm:content")))
        .unwrap()
        .declare(RawDeclaration::content_type(qn("acme:folderDoc")))
        .unwrap()
        .declare(RawDeclaration::aspect(qn("acme:audit")))
        .unwrap()
        .declare(RawDeclaration::aspect(qn("acme:locked")))
        .unwrap()
}

#[test]
fn reverse_extend_after_persisting_is_a_cycle() {
    let model = link(
        &documents(),
        DeclarationKind::Type,
        "acme:folderDoc",
        "acme:baseDoc",
        Relation::Extend,
    )
    .unwrap();

    assert_eq!(
        refusal(link(
            &model,
            DeclarationKind::Type,
            "acme:baseDoc",
            "acme:folderDoc",
            Relation::Extend,
        )),
        LinkViolation::WouldCreateCycle {
            kind: DeclarationKind::Type,
            source: qn("acme:baseDoc"),
            target: qn("acme:folderDoc"),
        }
    );
}

#[test]
fn extending_an_existing_ancestor_again_is_refused() {
    let model = link(
        &documents(),
        DeclarationKind::Type,
        "acme:folderDoc",
        "acme:baseDoc",
        Relation::Extend,
    )
    .unwrap();

    assert!(matches!(
        refusal(link(
            &model,
            DeclarationKind::Type,
            "acme:folderDoc",
            "acme:baseDoc",
            Relation::Extend,
        )),
        LinkViolation::AlreadyAncestor { .. }
    ));
}

#[test]
fn requiring_an_inherited_requirement_is_refused() {
    let model = documents();
    let model = link(&model, DeclarationKind::Type, "acme:baseDoc", "acme:audit", Relation::Mandatory)
        .unwrap();
    let model = link(&model, DeclarationKind::Type, "acme:folderDoc", "acme:baseDoc", Relation::Extend)
        .unwrap();

    assert_eq!(
        refusal(link(
            &model,
            DeclarationKind::Type,
            "acme:folderDoc",
            "acme:audit",
            Relation::Mandatory,
        )),
        LinkViolation::AlreadyMandatory {
            kind: DeclarationKind::Type,
            declaration: qn("acme:folderDoc"),
            aspect: qn("acme:audit"),
        }
    );
}

#[test]
fn an_aspect_cannot_require_its_own_descendant() {
    let model = link(
        &documents(),
        DeclarationKind::Aspect,
        "acme:locked",
        "acme:audit",
        Relation::Extend,
    )
    .unwrap();

    assert_eq!(
        refusal(link(
            &model,
            DeclarationKind::Aspect,
            "acme:audit",
            "acme:locked",
            Relation::Mandatory,
        )),
        LinkViolation::AlreadyAncestor {
            kind: DeclarationKind::Aspect,
            declaration: qn("acme:locked"),
            ancestor: qn("acme:audit"),
        }
    );
}

#[test]
fn builtins_take_no_edges_but_can_be_targets() {
    let model = documents();
    assert!(matches!(
        refusal(link(&model, DeclarationKind::Type, "cm:folder", "acme:baseDoc", Relation::Extend)),
        LinkViolation::BuiltIn { .. }
    ));
    assert!(link(&model, DeclarationKind::Type, "acme:folderDoc", "cm:folder", Relation::Extend).is_ok());
}

#[test]
fn unknown_endpoints_are_not_found() {
    let model = documents();
    let err = link(&model, DeclarationKind::Type, "acme:folderDoc", "acme:ghost", Relation::Mandatory)
        .unwrap_err();
    assert!(err.is_not_found());

    // A type is not an aspect.
    let err = link(&model, DeclarationKind::Type, "acme:folderDoc", "acme:baseDoc", Relation::Mandatory)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn accepted_edges_keep_the_model_valid() {
    let mut model = documents();
    for (kind, source, target, relation) in [
        (DeclarationKind::Aspect, "acme:locked", "acme:audit", Relation::Mandatory),
        (DeclarationKind::Type, "acme:baseDoc", "acme:locked", Relation::Mandatory),
        (DeclarationKind::Type, "acme:folderDoc", "acme:baseDoc", Relation::Extend),
    ] {
        model = link(&model, kind, source, target, relation).unwrap();
    }

    let resolver = Resolver::new(&model);
    assert_eq!(resolver.validate_all().unwrap(), 4);
    assert_eq!(
        resolver.closure(DeclarationKind::Type, &qn("acme:folderDoc")).unwrap(),
        vec![qn("acme:locked"), qn("acme:audit")]
    );
}
