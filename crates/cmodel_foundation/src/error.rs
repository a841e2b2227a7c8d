//! Error types for cmodel.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every violation embeds the offending names so it can be shown verbatim.

use std::fmt;

use thiserror::Error;

use crate::name::{DeclarationKind, QualifiedName};

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for cmodel operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records that this error passed through `frame` while unwinding.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::new)
            .stack
            .push(frame.into());
        self
    }

    /// Creates a declaration not found error.
    #[must_use]
    pub fn not_found(kind: DeclarationKind, name: QualifiedName) -> Self {
        Self::new(ErrorKind::NotFound { kind, name })
    }

    /// Creates a schema violation error.
    #[must_use]
    pub fn violation(violation: Violation) -> Self {
        Self::new(ErrorKind::Violation(violation))
    }

    /// Creates a link refusal error.
    #[must_use]
    pub fn link(violation: LinkViolation) -> Self {
        Self::new(ErrorKind::Link(violation))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Returns true if the error is a missing top-level declaration.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns the schema violation, if this is one.
    #[must_use]
    pub fn as_violation(&self) -> Option<&Violation> {
        match &self.kind {
            ErrorKind::Violation(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the link refusal, if this is one.
    #[must_use]
    pub fn as_link(&self) -> Option<&LinkViolation> {
        match &self.kind {
            ErrorKind::Link(v) => Some(v),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The requested declaration does not exist.
    #[error("{kind} '{name}' does not exist")]
    NotFound {
        /// Namespace that was searched.
        kind: DeclarationKind,
        /// The missing name.
        name: QualifiedName,
    },

    /// The content model breaks a structural invariant.
    #[error("schema violation: {0}")]
    Violation(Violation),

    /// A proposed edge was refused before anything was written.
    #[error("link refused: {0}")]
    Link(LinkViolation),

    /// A name does not follow the naming rules.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A property typology is not one of the accepted values.
    #[error(
        "invalid property typology '{0}': must be one of text, int, long, float, double, date, datetime, boolean, encrypted or noderef"
    )]
    InvalidTypology(String),

    /// A declaration with this name already exists.
    #[error("{kind} '{name}' is already declared in the content model")]
    AlreadyDeclared {
        /// Namespace of the existing declaration.
        kind: DeclarationKind,
        /// The clashing name.
        name: QualifiedName,
    },

    /// A property with this name already exists somewhere in the model.
    #[error("there is already a property named '{0}' in the content model")]
    DuplicateProperty(String),

    /// A shell command could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Reading or writing a model file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Encoding or decoding a model failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Structural invariant breaches found while resolving a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The same name is declared more than once under one kind.
    DuplicateDeclaration {
        /// Namespace of the duplicates.
        kind: DeclarationKind,
        /// The duplicated name.
        name: QualifiedName,
        /// How many times it is declared.
        count: usize,
    },
    /// A declaration's parent does not exist.
    DanglingReference {
        /// Namespace of the chain.
        kind: DeclarationKind,
        /// The declaration naming the parent.
        child: QualifiedName,
        /// The missing parent.
        parent: QualifiedName,
    },
    /// A mandatory aspect does not exist.
    DanglingMandatory {
        /// Namespace of the requiring declaration.
        kind: DeclarationKind,
        /// The declaration requiring the aspect.
        declaration: QualifiedName,
        /// The missing aspect.
        aspect: QualifiedName,
    },
    /// The parent chain revisits a name.
    InheritanceCycle {
        /// Namespace of the chain.
        kind: DeclarationKind,
        /// The name that appears twice.
        name: QualifiedName,
        /// The chain walked so far, starting at the resolved declaration.
        chain: Vec<QualifiedName>,
    },
    /// The same aspect is required twice, directly or transitively.
    DuplicateMandatory {
        /// Namespace of the starting declaration.
        kind: DeclarationKind,
        /// The declaration whose closure was computed.
        declaration: QualifiedName,
        /// The aspect required twice.
        aspect: QualifiedName,
        /// The declaration whose requirement introduced the second copy.
        via: QualifiedName,
    },
    /// An aspect is both an ancestor and a mandatory aspect.
    MandatoryAncestorConflict {
        /// Namespace of the starting declaration.
        kind: DeclarationKind,
        /// The declaration whose closure was computed.
        declaration: QualifiedName,
        /// The aspect found in both relations.
        aspect: QualifiedName,
    },
    /// The same property name is visible twice in one combined scope.
    PropertyCollision {
        /// The property name.
        property: String,
        /// Declaration where the property was seen first.
        first: QualifiedName,
        /// Declaration redeclaring it.
        second: QualifiedName,
    },
    /// A declaration lists a property the store has no definition for.
    MissingProperty {
        /// Namespace of the owner.
        kind: DeclarationKind,
        /// The owning declaration.
        declaration: QualifiedName,
        /// The undefined property.
        property: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDeclaration { kind, name, count } => {
                write!(f, "{kind} '{name}' was declared {count} times")
            }
            Self::DanglingReference {
                kind,
                child,
                parent,
            } => write!(
                f,
                "inheritance problem: {kind} '{child}' inherits {kind} '{parent}' which does not exist"
            ),
            Self::DanglingMandatory {
                kind,
                declaration,
                aspect,
            } => write!(
                f,
                "{kind} '{declaration}' has a mandatory aspect '{aspect}' which does not exist"
            ),
            Self::InheritanceCycle { kind, name, chain } => {
                write!(
                    f,
                    "inheritance problem: {kind} '{name}' appears twice in its own ancestors"
                )?;
                if !chain.is_empty() {
                    let joined: Vec<String> = chain.iter().map(ToString::to_string).collect();
                    write!(f, ": {}", joined.join(" -> "))?;
                }
                Ok(())
            }
            Self::DuplicateMandatory {
                kind,
                declaration,
                aspect,
                via,
            } => {
                write!(
                    f,
                    "aspect '{aspect}' appears twice in the mandatory aspects of {kind} '{declaration}' (by inheritance or directly)"
                )?;
                if via != declaration {
                    write!(f, " through '{via}'")?;
                }
                Ok(())
            }
            Self::MandatoryAncestorConflict {
                kind,
                declaration,
                aspect,
            } => write!(
                f,
                "aspect '{aspect}' is an ancestor of {kind} '{declaration}' and cannot also be one of its mandatory aspects"
            ),
            Self::PropertyCollision {
                property,
                first,
                second,
            } => write!(
                f,
                "property '{property}' is defined twice: in '{first}' and in '{second}'"
            ),
            Self::MissingProperty {
                kind,
                declaration,
                property,
            } => write!(
                f,
                "{kind} '{declaration}' lists property '{property}' which is not defined"
            ),
        }
    }
}

/// Reasons a proposed inheritance or inclusion edge is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    /// The edge would close an inheritance loop.
    WouldCreateCycle {
        /// Namespace of the edge.
        kind: DeclarationKind,
        /// The declaration that would gain the edge.
        source: QualifiedName,
        /// The proposed parent or aspect.
        target: QualifiedName,
    },
    /// The target is already an ancestor of the other endpoint.
    AlreadyAncestor {
        /// Namespace of the checked declaration.
        kind: DeclarationKind,
        /// The declaration whose ancestors were checked.
        declaration: QualifiedName,
        /// The ancestor.
        ancestor: QualifiedName,
    },
    /// The target is already in the other endpoint's mandatory closure.
    AlreadyMandatory {
        /// Namespace of the checked declaration.
        kind: DeclarationKind,
        /// The declaration whose closure was checked.
        declaration: QualifiedName,
        /// The aspect already required.
        aspect: QualifiedName,
    },
    /// Built-in declarations can never be extended or annotated.
    BuiltIn {
        /// Namespace of the built-in.
        kind: DeclarationKind,
        /// The built-in name.
        name: QualifiedName,
    },
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldCreateCycle {
                kind,
                source,
                target,
            } => write!(
                f,
                "linking {kind} '{source}' to '{target}' would create an inheritance cycle"
            ),
            Self::AlreadyAncestor {
                kind,
                declaration,
                ancestor,
            } => write!(
                f,
                "{kind} '{declaration}' already has '{ancestor}' for ancestor"
            ),
            Self::AlreadyMandatory {
                kind,
                declaration,
                aspect,
            } => write!(
                f,
                "{kind} '{declaration}' already has '{aspect}' in its mandatory aspects (by inheritance or directly)"
            ),
            Self::BuiltIn { kind, name } => {
                write!(f, "built-in {kind} '{name}' cannot be modified")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Content model file or model name.
    pub source: Option<String>,
    /// Declarations being resolved, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  while resolving {frame}")?;
            }
        }
        Ok(())
    }
}
