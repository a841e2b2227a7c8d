//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: QualifiedName, DeclarationKind, Typology, and Error.

mod errors;
mod names;
