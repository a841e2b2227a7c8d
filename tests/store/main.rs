//! Integration tests for Layer 1: Store
//!
//! Tests for raw declarations, the content model and the SchemaStore trait.
