//! Schema store interface and content-model storage for cmodel.
//!
//! This crate provides:
//! - [`SchemaStore`] - Read-only lookup of raw declarations and properties
//! - [`RawDeclaration`] / [`RawProperty`] - Declarations exactly as written
//! - [`ContentModel`] - Persistent in-memory store with structural sharing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod declaration;
pub mod model;
pub mod store;

pub use declaration::{RawDeclaration, RawProperty};
pub use model::{ContentModel, PropertyEntry};
pub use store::SchemaStore;
