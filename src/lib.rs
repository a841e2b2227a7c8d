//! cmodel - Content model resolution and checking
//!
//! This crate re-exports all layers of the cmodel system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: cmodel_runtime    Session, shell, CLI, persistence
//! Layer 2: cmodel_engine     Resolver, ancestor chains, mandatory closure,
//!                            property collisions, link guard
//! Layer 1: cmodel_store      SchemaStore trait, raw declarations, ContentModel
//! Layer 0: cmodel_foundation Core types (QualifiedName, Typology, Error)
//! ```

pub use cmodel_engine as engine;
pub use cmodel_foundation as foundation;
pub use cmodel_runtime as runtime;
pub use cmodel_store as store;
