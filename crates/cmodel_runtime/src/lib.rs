//! Session, shell, CLI, and persistence for cmodel.
//!
//! This crate provides:
//! - [`Session`] - Validate-then-commit editing of one content model
//! - [`Repl`] - Interactive shell over a session
//! - [`Command`] - The shell command language
//! - Model serialization and deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use command::Command;
pub use config::SessionConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Outcome, Repl, print_error};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::Session;
