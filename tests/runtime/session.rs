//! Integration tests for editing sessions
//!
//! Builds a model through the session API, saves it, reopens it and checks
//! that refused edits never reach the file.

use std::path::PathBuf;

use cmodel_foundation::{DeclarationKind, ErrorKind, LinkViolation, QualifiedName, Violation};
use cmodel_runtime::{Session, SessionConfig, load_from_file, save_to_file};
use cmodel_store::{ContentModel, RawDeclaration};

fn qn(s: &str) -> QualifiedName {
    QualifiedName::parse(s).unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cmodel_it_{name}.cmodel"))
}

fn legal_model(session: &mut Session) {
    session.new_declaration(DeclarationKind::Aspect, "audit", Some("Audit"), None).unwrap();
    session
        .new_property("audit", "auditor", "text", true, None, None)
        .unwrap();
    session.new_declaration(DeclarationKind::Aspect, "locked", None, None).unwrap();
    session.require(DeclarationKind::Aspect, "locked", "audit").unwrap();
    session.new_declaration(DeclarationKind::Type, "legalDoc", None, None).unwrap();
    session.extend(DeclarationKind::Type, "legalDoc", "cm:content").unwrap();
    session.require(DeclarationKind::Type, "legalDoc", "locked").unwrap();
    session
        .new_property("legalDoc", "caseNumber", "long", false, Some("Case number"), None)
        .unwrap();
}

#[test]
fn built_model_survives_a_file_roundtrip() {
    let path = temp_path("roundtrip");
    let config = SessionConfig::new().with_model_path(&path);

    let mut session = Session::create(qn("acme:legal"), config.clone());
    legal_model(&mut session);
    session.save().unwrap();

    let reopened = Session::open(config).unwrap();
    assert_eq!(reopened.model(), session.model());
    assert_eq!(reopened.check().unwrap(), 3);

    let node = reopened.resolve(DeclarationKind::Type, "legalDoc").unwrap();
    let visible: Vec<_> = node
        .visible_properties()
        .into_iter()
        .map(|(owner, p)| format!("{owner}/{}", p.name))
        .collect();
    assert_eq!(visible, vec!["acme:legalDoc/caseNumber", "acme:audit/auditor"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn refused_edits_leave_model_and_file_unchanged() {
    let path = temp_path("refused");
    let config = SessionConfig::new().with_model_path(&path).with_autosave(true);

    let mut session = Session::create(qn("acme:legal"), config);
    legal_model(&mut session);
    let saved = load_from_file(&path).unwrap();
    assert_eq!(&saved, session.model());

    let err = session
        .require(DeclarationKind::Type, "legalDoc", "audit")
        .unwrap_err();
    assert!(matches!(err.as_link(), Some(LinkViolation::AlreadyMandatory { .. })));

    let err = session
        .extend(DeclarationKind::Aspect, "audit", "locked")
        .unwrap_err();
    assert!(matches!(err.as_link(), Some(LinkViolation::AlreadyMandatory { .. })));

    let err = session
        .new_property("locked", "auditor", "text", false, None, None)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateProperty(_)));

    assert_eq!(&load_from_file(&path).unwrap(), session.model());
    assert_eq!(&saved, session.model());
    assert!(!session.is_dirty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn loaded_models_are_checked_not_trusted() {
    let path = temp_path("broken");
    let broken = ContentModel::new(qn("acme:legal"))
        .with_declaration(RawDeclaration::aspect(qn("acme:audit")))
        .with_declaration(
            RawDeclaration::content_type(qn("acme:doc"))
                .with_mandatory(qn("acme:audit"))
                .with_mandatory(qn("acme:audit")),
        );
    save_to_file(&broken, &path).unwrap();

    let session = Session::open(SessionConfig::new().with_model_path(&path)).unwrap();
    let err = session.check().unwrap_err();
    assert!(matches!(
        err.as_violation(),
        Some(Violation::DuplicateMandatory { .. })
    ));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some(path.display().to_string().as_str()));
    assert_eq!(context.stack, vec!["type acme:doc"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn opening_a_missing_file_is_an_io_error() {
    let err = Session::open(SessionConfig::new().with_model_path(temp_path("missing"))).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[test]
fn edits_that_break_other_declarations_are_refused() {
    let path = temp_path("dependents");
    let config = SessionConfig::new().with_model_path(&path).with_autosave(true);
    let mut session = Session::create(qn("acme:legal"), config);

    // x requires a and b, b requires c: a may not start requiring c.
    for aspect in ["c", "a", "b", "x"] {
        session.new_declaration(DeclarationKind::Aspect, aspect, None, None).unwrap();
    }
    session.require(DeclarationKind::Aspect, "b", "c").unwrap();
    session.require(DeclarationKind::Aspect, "x", "a").unwrap();
    session.require(DeclarationKind::Aspect, "x", "b").unwrap();

    // child extends base and requires m: base may not start requiring m.
    for aspect in ["m", "base", "child"] {
        session.new_declaration(DeclarationKind::Aspect, aspect, None, None).unwrap();
    }
    session.extend(DeclarationKind::Aspect, "child", "base").unwrap();
    session.require(DeclarationKind::Aspect, "child", "m").unwrap();

    let saved = load_from_file(&path).unwrap();
    assert_eq!(&saved, session.model());

    let err = session.require(DeclarationKind::Aspect, "a", "c").unwrap_err();
    assert!(matches!(
        err.as_violation(),
        Some(Violation::DuplicateMandatory { declaration, aspect, .. })
            if *declaration == qn("acme:x") && *aspect == qn("acme:c")
    ));

    let err = session.require(DeclarationKind::Aspect, "base", "m").unwrap_err();
    assert!(matches!(
        err.as_violation(),
        Some(Violation::DuplicateMandatory { declaration, aspect, .. })
            if *declaration == qn("acme:child") && *aspect == qn("acme:m")
    ));

    assert_eq!(session.check().unwrap(), 7);
    assert_eq!(&load_from_file(&path).unwrap(), session.model());

    let _ = std::fs::remove_file(&path);
}
