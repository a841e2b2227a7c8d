//! Integration tests for Layer 2: Engine
//!
//! Tests for resolution, ancestor chains, mandatory closures, property
//! collisions and link checks against a real content model.

mod links;
