//! Resolution and constraint checking for cmodel content models.
//!
//! This crate provides:
//! - [`Resolver`] - Builds validated [`SchemaNode`] trees from a store
//! - [`AncestorChain`] - Single-parent chain walking with cycle detection
//! - [`MandatoryClosure`] - Flattened mandatory-aspect sets
//! - [`PropertyCollisionChecker`] - Property shadowing detection
//! - [`LinkGuard`] - Pre-flight checks for new inheritance and inclusion edges

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ancestors;
pub mod closure;
pub mod collision;
pub mod config;
pub mod link;
pub mod node;
pub mod resolver;

#[cfg(test)]
mod fixtures;

pub use ancestors::AncestorChain;
pub use closure::MandatoryClosure;
pub use collision::PropertyCollisionChecker;
pub use config::ResolverConfig;
pub use link::{LinkGuard, Relation};
pub use node::{PropertyNode, SchemaNode};
pub use resolver::Resolver;
