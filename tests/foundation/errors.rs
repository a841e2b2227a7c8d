//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use cmodel_foundation::{
    DeclarationKind, Error, ErrorContext, ErrorKind, LinkViolation, QualifiedName, Violation,
};

fn qn(s: &str) -> QualifiedName {
    QualifiedName::parse(s).unwrap()
}

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_not_found() {
    let err = Error::not_found(DeclarationKind::Aspect, qn("acme:ghost"));
    assert!(err.is_not_found());
    assert!(err.as_violation().is_none());
    assert_eq!(err.to_string(), "aspect 'acme:ghost' does not exist");
}

#[test]
fn error_violation_accessor() {
    let err = Error::violation(Violation::DuplicateDeclaration {
        kind: DeclarationKind::Type,
        name: qn("acme:doc"),
        count: 2,
    });
    assert!(!err.is_not_found());
    assert!(matches!(
        err.as_violation(),
        Some(Violation::DuplicateDeclaration { count: 2, .. })
    ));
    assert!(err.as_link().is_none());
}

#[test]
fn error_link_accessor() {
    let err = Error::link(LinkViolation::BuiltIn {
        kind: DeclarationKind::Type,
        name: qn("cm:folder"),
    });
    assert!(matches!(err.kind, ErrorKind::Link(_)));
    assert!(err.to_string().contains("built-in type 'cm:folder'"));
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn violations_embed_the_offending_names() {
    let cycle = Violation::InheritanceCycle {
        kind: DeclarationKind::Aspect,
        name: qn("acme:a"),
        chain: vec![qn("acme:a"), qn("acme:b"), qn("acme:a")],
    };
    assert_eq!(
        cycle.to_string(),
        "inheritance problem: aspect 'acme:a' appears twice in its own ancestors: acme:a -> acme:b -> acme:a"
    );

    let duplicate = Violation::DuplicateMandatory {
        kind: DeclarationKind::Type,
        declaration: qn("acme:doc"),
        aspect: qn("acme:audit"),
        via: qn("acme:locked"),
    };
    let msg = duplicate.to_string();
    assert!(msg.contains("acme:audit"));
    assert!(msg.contains("through 'acme:locked'"));

    let collision = Violation::PropertyCollision {
        property: "code".to_string(),
        first: qn("acme:child"),
        second: qn("acme:base"),
    };
    assert_eq!(
        collision.to_string(),
        "property 'code' is defined twice: in 'acme:child' and in 'acme:base'"
    );
}

#[test]
fn link_violations_embed_the_offending_names() {
    let err = LinkViolation::WouldCreateCycle {
        kind: DeclarationKind::Type,
        source: qn("acme:baseDoc"),
        target: qn("acme:folderDoc"),
    };
    let msg = err.to_string();
    assert!(msg.contains("acme:baseDoc"));
    assert!(msg.contains("acme:folderDoc"));
    assert!(msg.contains("cycle"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn frames_accumulate_innermost_first() {
    let err = Error::not_found(DeclarationKind::Aspect, qn("acme:ghost"))
        .in_frame("aspect acme:inner")
        .in_frame("type acme:outer");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["aspect acme:inner", "type acme:outer"]);
    assert!(context.source.is_none());
}

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_source("acme.cmodel")
        .with_frame("type acme:doc");
    let shown = context.to_string();
    assert!(shown.starts_with("in acme.cmodel"));
    assert!(shown.contains("while resolving type acme:doc"));
}
