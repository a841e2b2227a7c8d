//! Core types and errors for cmodel.
//!
//! This crate provides:
//! - [`QualifiedName`] - `prefix:local` identifiers for declarations
//! - [`DeclarationKind`] - The aspect and type namespaces
//! - [`Typology`] - The closed set of property value typologies
//! - [`Error`] - Rich error types with resolution context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod name;
pub mod typology;

pub use error::{Error, ErrorContext, ErrorKind, LinkViolation, Result, Violation};
pub use name::{DeclarationKind, QualifiedName, validate_local_name};
pub use typology::Typology;
