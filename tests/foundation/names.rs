//! Integration tests for names, kinds and typologies

use cmodel_foundation::{
    DeclarationKind, ErrorKind, QualifiedName, Typology, validate_local_name,
};

// =============================================================================
// Qualified Names
// =============================================================================

#[test]
fn qualified_name_parts() {
    let name: QualifiedName = "acme:legalDoc".parse().unwrap();
    assert_eq!(name.prefix(), "acme");
    assert_eq!(name.local(), "legalDoc");
    assert_eq!(name.to_string(), "acme:legalDoc");
    assert_eq!(name, QualifiedName::new("acme", "legalDoc").unwrap());
}

#[test]
fn bare_names_take_the_default_prefix() {
    let name = QualifiedName::parse_or_qualify("doc", "acme").unwrap();
    assert_eq!(name.to_string(), "acme:doc");

    let name = QualifiedName::parse_or_qualify("cm:content", "acme").unwrap();
    assert_eq!(name.prefix(), "cm");
}

#[test]
fn malformed_qualified_names() {
    for bad in ["doc", ":doc", "acme:", ""] {
        let err = QualifiedName::parse(bad).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidName(_)), "{bad}");
    }
}

#[test]
fn names_order_by_prefix_then_local() {
    let mut names = vec![
        QualifiedName::parse("b:a").unwrap(),
        QualifiedName::parse("a:z").unwrap(),
        QualifiedName::parse("a:b").unwrap(),
    ];
    names.sort();
    let rendered: Vec<_> = names.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["a:b", "a:z", "b:a"]);
}

// =============================================================================
// Local Name Rules
// =============================================================================

#[test]
fn local_name_rules() {
    assert!(validate_local_name("aspect", "securityClassified").is_ok());
    assert!(validate_local_name("aspect", "v2").is_ok());

    let empty = validate_local_name("aspect", "").unwrap_err();
    assert!(empty.to_string().contains("cannot be empty"));

    let spaced = validate_local_name("type", "legal doc").unwrap_err();
    assert!(spaced.to_string().contains("spaces"));

    let special = validate_local_name("property", "legal_doc").unwrap_err();
    assert!(special.to_string().contains("special characters"));
    assert!(special.to_string().contains("property"));
}

// =============================================================================
// Kinds and Typologies
// =============================================================================

#[test]
fn declaration_kinds_roundtrip_through_text() {
    for kind in DeclarationKind::ALL {
        assert_eq!(kind.to_string().parse::<DeclarationKind>().unwrap(), kind);
    }
    assert!("folder".parse::<DeclarationKind>().is_err());
}

#[test]
fn typologies_are_a_closed_set() {
    assert_eq!(Typology::ALL.len(), 10);
    for typology in Typology::ALL {
        assert_eq!(typology.name().parse::<Typology>().unwrap(), typology);
    }
    let err = "string".parse::<Typology>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidTypology(ref s) if s == "string"));
    assert!(err.to_string().contains("noderef"));
}
