//! Session state for the shell.
//!
//! A session owns the content model being edited. Every edit is checked
//! before anything is written: link edits go through the link guard, then
//! the edit is applied to a copy of the model. The copy replaces the current
//! model only if the edited declaration resolves in it, along with every
//! declaration that resolved before the edit.

use std::path::Path;

use tracing::{debug, info, warn};

use cmodel_engine::{Relation, Resolver, SchemaNode};
use cmodel_foundation::{
    DeclarationKind, Error, ErrorContext, LinkViolation, QualifiedName, Result, Typology,
    validate_local_name,
};
use cmodel_store::{ContentModel, RawDeclaration, RawProperty, SchemaStore};

use crate::config::SessionConfig;
use crate::serialize;

/// An editing session over one content model.
#[derive(Debug)]
pub struct Session {
    /// The current, always valid, model.
    model: ContentModel,

    /// Session configuration.
    config: SessionConfig,

    /// Whether the model changed since it was last saved.
    dirty: bool,
}

impl Session {
    /// Creates a session over `model` with the default configuration.
    #[must_use]
    pub fn new(model: ContentModel) -> Self {
        Self {
            model,
            config: SessionConfig::default(),
            dirty: false,
        }
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a session over a new, empty model named `name`.
    ///
    /// The model is unsaved until [`Session::save`] is called.
    #[must_use]
    pub fn create(name: QualifiedName, config: SessionConfig) -> Self {
        let mut session = Self::new(ContentModel::new(name)).with_config(config);
        session.dirty = true;
        session
    }

    /// Opens the model file named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is configured or it cannot be loaded.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let path = config
            .model_path()
            .ok_or_else(|| Error::io("no model file configured"))?;
        let model = serialize::load_from_file(path)?;
        Ok(Self::new(model).with_config(config))
    }

    /// Returns the current model.
    #[must_use]
    pub const fn model(&self) -> &ContentModel {
        &self.model
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns true if there are unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns a resolver over the current model.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_, ContentModel> {
        Resolver::new(&self.model).with_config(self.config.resolver.clone())
    }

    /// Parses `name`, qualifying a bare local name with the model prefix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name is malformed.
    pub fn qualify(&self, name: &str) -> Result<QualifiedName> {
        QualifiedName::parse_or_qualify(name, self.model.prefix())
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Declares a new aspect or type named `local` in the model's prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the name breaks the naming rules, is already
    /// declared under `kind`, or is a built-in.
    pub fn new_declaration(
        &mut self,
        kind: DeclarationKind,
        local: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<QualifiedName> {
        let (name, model) = self
            .declared(kind, local, title, description)
            .map_err(|e| self.refused("new", e))?;
        self.commit(model)?;
        Ok(name)
    }

    fn declared(
        &self,
        kind: DeclarationKind,
        local: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<(QualifiedName, ContentModel)> {
        validate_local_name(kind.label(), local)?;
        let name = QualifiedName::new(self.model.prefix(), local)?;
        if self.config.resolver.is_terminator(kind, &name) {
            return Err(Error::link(LinkViolation::BuiltIn { kind, name }));
        }

        let mut declaration = RawDeclaration::new(kind, name.clone());
        declaration.title = title.map(str::to_string);
        declaration.description = description.map(str::to_string);
        let model = self.model.declare(declaration)?;
        Ok((name, model))
    }

    /// Makes `parent` the parent of `source`.
    ///
    /// # Errors
    ///
    /// Returns the link refusal or resolution error; the model is unchanged.
    pub fn extend(&mut self, kind: DeclarationKind, source: &str, parent: &str) -> Result<()> {
        let model = self
            .linked(kind, source, parent, Relation::Extend)
            .map_err(|e| self.refused("extend", e))?;
        self.commit(model)
    }

    /// Adds `aspect` to the mandatory aspects of `source`.
    ///
    /// # Errors
    ///
    /// Returns the link refusal or resolution error; the model is unchanged.
    pub fn require(&mut self, kind: DeclarationKind, source: &str, aspect: &str) -> Result<()> {
        let model = self
            .linked(kind, source, aspect, Relation::Mandatory)
            .map_err(|e| self.refused("mandatory", e))?;
        self.commit(model)
    }

    fn linked(
        &self,
        kind: DeclarationKind,
        source: &str,
        target: &str,
        relation: Relation,
    ) -> Result<ContentModel> {
        let source = self.qualify(source)?;
        let target = self.qualify(target)?;
        self.resolver().can_link(kind, &source, &target, relation)?;

        let edited = match relation {
            Relation::Extend => self.model.extend(kind, &source, target)?,
            Relation::Mandatory => self.model.require(kind, &source, target)?,
        };
        self.still_resolves(&edited, kind, &source)?;
        Ok(edited)
    }

    /// Adds a property named `local` to `owner`.
    ///
    /// The owner is looked up as an aspect first, then as a type.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist, the name or typology is
    /// invalid, the name is already used in the model, or the owner no longer
    /// resolves with the new property.
    pub fn new_property(
        &mut self,
        owner: &str,
        local: &str,
        typology: &str,
        mandatory: bool,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let model = self
            .property_added(owner, local, typology, mandatory, title, description)
            .map_err(|e| self.refused("property", e))?;
        self.commit(model)
    }

    fn property_added(
        &self,
        owner: &str,
        local: &str,
        typology: &str,
        mandatory: bool,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<ContentModel> {
        let owner = self.qualify(owner)?;
        let resolver = self.resolver();
        let kind = if resolver.find(DeclarationKind::Aspect, &owner)?.is_some() {
            DeclarationKind::Aspect
        } else if resolver.find(DeclarationKind::Type, &owner)?.is_some() {
            DeclarationKind::Type
        } else {
            return Err(Error::not_found(DeclarationKind::Type, owner));
        };
        if self.config.resolver.is_terminator(kind, &owner) {
            return Err(Error::link(LinkViolation::BuiltIn { kind, name: owner }));
        }

        validate_local_name("property", local)?;
        let mut property = RawProperty::new(local, typology.parse::<Typology>()?);
        property.title = title.map(str::to_string);
        property.description = description.map(str::to_string);
        property.mandatory = mandatory;

        let edited = self.model.add_property(kind, &owner, property)?;
        self.still_resolves(&edited, kind, &owner)?;
        Ok(edited)
    }

    /// Descendants of the edited declaration and anything that requires it
    /// can break even when the edited declaration itself still resolves.
    fn still_resolves(
        &self,
        edited: &ContentModel,
        kind: DeclarationKind,
        name: &QualifiedName,
    ) -> Result<()> {
        let before = self.resolver();
        let after = Resolver::new(edited).with_config(self.config.resolver.clone());
        after.resolve(kind, name)?;

        let mut rechecked = 0;
        for other_kind in DeclarationKind::ALL {
            for other in self.model.declaration_names(other_kind) {
                if before.resolve(other_kind, &other).is_ok() {
                    after.resolve(other_kind, &other)?;
                    rechecked += 1;
                }
            }
        }
        debug!(%kind, %name, rechecked, "edit keeps the model resolvable");
        Ok(())
    }

    /// Replaces the current model with a validated edit.
    fn commit(&mut self, model: ContentModel) -> Result<()> {
        self.model = model;
        self.dirty = true;
        if self.config.autosave && self.config.model_path.is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn refused(&self, edit: &str, error: Error) -> Error {
        warn!(edit, error = %error, "edit refused");
        self.located(error)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Resolves `name` under `kind`.
    ///
    /// # Errors
    ///
    /// Returns the resolution error.
    pub fn resolve(&self, kind: DeclarationKind, name: &str) -> Result<SchemaNode> {
        let name = self.qualify(name)?;
        self.resolver()
            .resolve(kind, &name)
            .map_err(|e| self.located(e))
    }

    /// Returns the ancestors of `name`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns the resolution error.
    pub fn ancestors(&self, kind: DeclarationKind, name: &str) -> Result<Vec<QualifiedName>> {
        let name = self.qualify(name)?;
        self.resolver()
            .ancestors(kind, &name)
            .map_err(|e| self.located(e))
    }

    /// Returns the mandatory-aspect closure of `name`.
    ///
    /// # Errors
    ///
    /// Returns the resolution error.
    pub fn closure(&self, kind: DeclarationKind, name: &str) -> Result<Vec<QualifiedName>> {
        let name = self.qualify(name)?;
        self.resolver()
            .closure(kind, &name)
            .map_err(|e| self.located(e))
    }

    /// Resolves every declaration and returns how many were checked.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self) -> Result<usize> {
        self.resolver().validate_all().map_err(|e| self.located(e))
    }

    /// Returns the declared names of `kind`, in declaration order.
    #[must_use]
    pub fn list(&self, kind: DeclarationKind) -> Vec<QualifiedName> {
        self.model.declaration_names(kind)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Saves to the configured model file.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is configured or writing fails.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .config
            .model_path
            .clone()
            .ok_or_else(|| Error::io("no model file configured; use 'save PATH'"))?;
        self.save_as(path)
    }

    /// Saves to `path` and makes it the model file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        serialize::save_to_file(&self.model, path)?;
        self.config.model_path = Some(path.to_path_buf());
        self.dirty = false;
        info!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Names the model file, or the model itself, as the error source.
    fn located(&self, mut error: Error) -> Error {
        let source = self.config.model_path().map_or_else(
            || self.model.name().to_string(),
            |path| path.display().to_string(),
        );
        let context = error.context.take().unwrap_or_else(ErrorContext::new);
        error.with_context(ErrorContext {
            source: Some(source),
            ..context
        })
    }
}
