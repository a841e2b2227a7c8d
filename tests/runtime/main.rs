//! Integration tests for Layer 3: Runtime
//!
//! Tests for editing sessions, the shell and model files.

mod session;
mod shell;
