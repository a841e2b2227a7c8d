//! Property value typologies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// The typology of a property value.
///
/// This is a label only; values are never checked against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Typology {
    /// Free text.
    Text,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Boolean flag.
    Boolean,
    /// Encrypted text.
    Encrypted,
    /// Reference to another node.
    NodeRef,
}

impl Typology {
    /// Every typology, in canonical order.
    pub const ALL: [Typology; 10] = [
        Typology::Text,
        Typology::Int,
        Typology::Long,
        Typology::Float,
        Typology::Double,
        Typology::Date,
        Typology::DateTime,
        Typology::Boolean,
        Typology::Encrypted,
        Typology::NodeRef,
    ];

    /// Returns the lower-case name of this typology.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
            Self::Encrypted => "encrypted",
            Self::NodeRef => "noderef",
        }
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Typology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::new(ErrorKind::InvalidTypology(s.to_string())))
    }
}
