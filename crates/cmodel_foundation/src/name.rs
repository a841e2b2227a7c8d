//! Qualified names and declaration namespaces.
//!
//! Every declaration in a content model is identified by a [`QualifiedName`]
//! (`prefix:local`) inside one [`DeclarationKind`] namespace. The same
//! qualified name may exist once as an aspect and once as a type.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// The namespace a declaration lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeclarationKind {
    /// A reusable facet composable onto types.
    Aspect,
    /// A concrete document or folder shape.
    Type,
}

impl DeclarationKind {
    /// Both kinds, aspects first.
    pub const ALL: [DeclarationKind; 2] = [DeclarationKind::Aspect, DeclarationKind::Type];

    /// Returns the lower-case label used in messages and commands.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aspect => "aspect",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeclarationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aspect" => Ok(Self::Aspect),
            "type" => Ok(Self::Type),
            other => Err(Error::new(ErrorKind::InvalidName(format!(
                "unknown declaration kind '{other}' (expected 'aspect' or 'type')"
            )))),
        }
    }
}

/// A `prefix:local` identifier.
///
/// The prefix names the content model namespace (`cm`, `acme`), the local
/// part names the declaration inside it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualifiedName {
    prefix: String,
    local: String,
}

impl QualifiedName {
    /// Creates a qualified name from its two parts.
    ///
    /// # Errors
    ///
    /// Returns an error if either part is empty or the prefix contains a colon.
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let local = local.into();
        if prefix.is_empty() || local.is_empty() || prefix.contains(':') {
            return Err(Error::new(ErrorKind::InvalidName(format!(
                "'{prefix}:{local}' is not a valid qualified name; it must be formed as prefix:name"
            ))));
        }
        Ok(Self { prefix, local })
    }

    /// Parses `prefix:local`, splitting on the last colon.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no colon or either side is empty.
    pub fn parse(value: &str) -> Result<Self> {
        match value.rsplit_once(':') {
            Some((prefix, local)) => Self::new(prefix, local),
            None => Err(Error::new(ErrorKind::InvalidName(format!(
                "'{value}' is not a valid qualified name; it must be formed as prefix:name"
            )))),
        }
    }

    /// Parses `value` as a qualified name, or qualifies a bare local name
    /// with `default_prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting name is invalid.
    pub fn parse_or_qualify(value: &str, default_prefix: &str) -> Result<Self> {
        if value.contains(':') {
            Self::parse(value)
        } else {
            Self::new(default_prefix, value)
        }
    }

    /// Returns the namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the local part.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({self})")
    }
}

impl FromStr for QualifiedName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Checks a local name given when creating a declaration or property.
///
/// Names must be non-empty, contain no whitespace and consist of ASCII
/// letters and digits only. `what` is the thing being named (`aspect`,
/// `property`) and only shapes the message.
///
/// # Errors
///
/// Returns an [`ErrorKind::InvalidName`] describing the first rule broken.
pub fn validate_local_name(what: &str, value: &str) -> Result<()> {
    let message = if value.is_empty() {
        format!("the {what} name cannot be empty")
    } else if value.chars().any(char::is_whitespace) {
        format!("the {what} name cannot contain spaces")
    } else if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!(
            "the {what} name cannot contain special characters (example of a valid name: 'securityClassified')"
        )
    } else {
        return Ok(());
    };
    Err(Error::new(ErrorKind::InvalidName(message)))
}
