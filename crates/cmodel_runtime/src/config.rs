//! Configuration for a shell session.

use std::path::{Path, PathBuf};

use cmodel_engine::ResolverConfig;

/// Configuration for a [`Session`](crate::Session).
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// File the model is loaded from and saved to.
    pub model_path: Option<PathBuf>,

    /// Resolver settings, built-in terminators included.
    pub resolver: ResolverConfig,

    /// Save after every accepted edit.
    pub autosave: bool,
}

impl SessionConfig {
    /// Creates a configuration with no model file and default resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the model file.
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Builder method to replace the resolver settings.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builder method to set autosave.
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Returns the model file, if any.
    #[must_use]
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}
