//! The shell command language.
//!
//! One command per line. Words are separated by whitespace; double quotes
//! group words and `\"` escapes a quote inside them. A line starting with
//! `#` is a comment.

use std::path::PathBuf;

use cmodel_foundation::{DeclarationKind, Error, ErrorKind, Result};

/// Command words, for completion and help.
pub const COMMANDS: &[&str] = &[
    "new",
    "property",
    "extend",
    "mandatory",
    "show",
    "ancestors",
    "closure",
    "check",
    "list",
    "save",
    "help",
    "quit",
];

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `new KIND NAME [TITLE [DESCRIPTION]]`
    New {
        /// Namespace of the new declaration.
        kind: DeclarationKind,
        /// Local name.
        name: String,
        /// Optional title.
        title: Option<String>,
        /// Optional description.
        description: Option<String>,
    },
    /// `property OWNER NAME TYPOLOGY [mandatory] [TITLE [DESCRIPTION]]`
    Property {
        /// Owning aspect or type.
        owner: String,
        /// Local name.
        name: String,
        /// Typology name.
        typology: String,
        /// Whether a value is required.
        mandatory: bool,
        /// Optional title.
        title: Option<String>,
        /// Optional description.
        description: Option<String>,
    },
    /// `extend KIND SOURCE PARENT`
    Extend {
        /// Namespace of both ends.
        kind: DeclarationKind,
        /// Declaration gaining the parent.
        source: String,
        /// New parent.
        parent: String,
    },
    /// `mandatory KIND SOURCE ASPECT`
    Mandatory {
        /// Namespace of the source.
        kind: DeclarationKind,
        /// Declaration gaining the aspect.
        source: String,
        /// Required aspect.
        aspect: String,
    },
    /// `show KIND NAME`
    Show {
        /// Namespace.
        kind: DeclarationKind,
        /// Name.
        name: String,
    },
    /// `ancestors KIND NAME`
    Ancestors {
        /// Namespace.
        kind: DeclarationKind,
        /// Name.
        name: String,
    },
    /// `closure KIND NAME`
    Closure {
        /// Namespace.
        kind: DeclarationKind,
        /// Name.
        name: String,
    },
    /// `check`
    Check,
    /// `list [KIND]`
    List(Option<DeclarationKind>),
    /// `save [PATH]`
    Save(Option<PathBuf>),
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and comments are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` with a usage hint if the line is malformed.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens = tokenize(line)?;
        let Some((word, args)) = tokens.split_first() else {
            return Ok(None);
        };
        if word.starts_with('#') {
            return Ok(None);
        }

        let command = match word.as_str() {
            "new" => {
                let [kind, name, rest @ ..] = args else {
                    return Err(usage("new aspect|type NAME [TITLE [DESCRIPTION]]"));
                };
                let (title, description) = texts(rest, "new")?;
                Self::New {
                    kind: kind.parse()?,
                    name: name.clone(),
                    title,
                    description,
                }
            }
            "property" => {
                let [owner, name, typology, rest @ ..] = args else {
                    return Err(usage(
                        "property OWNER NAME TYPOLOGY [mandatory] [TITLE [DESCRIPTION]]",
                    ));
                };
                let (mandatory, rest) = match rest.split_first() {
                    Some((flag, rest)) if flag == "mandatory" => (true, rest),
                    _ => (false, rest),
                };
                let (title, description) = texts(rest, "property")?;
                Self::Property {
                    owner: owner.clone(),
                    name: name.clone(),
                    typology: typology.clone(),
                    mandatory,
                    title,
                    description,
                }
            }
            "extend" => {
                let [kind, source, parent] = args else {
                    return Err(usage("extend aspect|type SOURCE PARENT"));
                };
                Self::Extend {
                    kind: kind.parse()?,
                    source: source.clone(),
                    parent: parent.clone(),
                }
            }
            "mandatory" => {
                let [kind, source, aspect] = args else {
                    return Err(usage("mandatory aspect|type SOURCE ASPECT"));
                };
                Self::Mandatory {
                    kind: kind.parse()?,
                    source: source.clone(),
                    aspect: aspect.clone(),
                }
            }
            "show" | "ancestors" | "closure" => {
                let [kind, name] = args else {
                    return Err(usage(&format!("{word} aspect|type NAME")));
                };
                let kind = kind.parse()?;
                let name = name.clone();
                match word.as_str() {
                    "show" => Self::Show { kind, name },
                    "ancestors" => Self::Ancestors { kind, name },
                    _ => Self::Closure { kind, name },
                }
            }
            "check" => {
                no_arguments(args, "check")?;
                Self::Check
            }
            "list" => match args {
                [] => Self::List(None),
                [kind] => Self::List(Some(kind.parse()?)),
                _ => return Err(usage("list [aspect|type]")),
            },
            "save" => match args {
                [] => Self::Save(None),
                [path] => Self::Save(Some(PathBuf::from(path))),
                _ => return Err(usage("save [PATH]")),
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => {
                no_arguments(args, "quit")?;
                Self::Quit
            }
            other => {
                return Err(Error::new(ErrorKind::InvalidCommand(format!(
                    "unknown command '{other}', type 'help' for the list of commands"
                ))));
            }
        };
        Ok(Some(command))
    }
}

/// Splits a line into words, honouring double quotes.
///
/// # Errors
///
/// Returns `InvalidCommand` if a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::new(ErrorKind::InvalidCommand(
            "unterminated quote".to_string(),
        )));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Returns the help text listing every command.
#[must_use]
pub fn help() -> &'static str {
    "Commands:
    new aspect|type NAME [TITLE [DESCRIPTION]]
                              Declare an aspect or type
    property OWNER NAME TYPOLOGY [mandatory] [TITLE [DESCRIPTION]]
                              Add a property to an aspect or type
    extend aspect|type SOURCE PARENT
                              Set the parent of SOURCE
    mandatory aspect|type SOURCE ASPECT
                              Require ASPECT alongside SOURCE
    show aspect|type NAME     Resolve and print a declaration
    ancestors aspect|type NAME
                              Print the parent chain, nearest first
    closure aspect|type NAME  Print every required aspect
    check                     Resolve every declaration
    list [aspect|type]        List declared names
    save [PATH]               Save the model
    help                      Show this help
    quit                      Leave the shell

Names without a prefix use the model prefix.
Typologies: text, int, long, float, double, date, datetime, boolean, encrypted, noderef."
}

fn usage(form: &str) -> Error {
    Error::new(ErrorKind::InvalidCommand(format!("usage: {form}")))
}

fn no_arguments(args: &[String], word: &str) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(usage(word))
    }
}

fn texts(rest: &[String], word: &str) -> Result<(Option<String>, Option<String>)> {
    match rest {
        [] => Ok((None, None)),
        [title] => Ok((Some(title.clone()), None)),
        [title, description] => Ok((Some(title.clone()), Some(description.clone()))),
        _ => Err(Error::new(ErrorKind::InvalidCommand(format!(
            "too many arguments to '{word}'; quote titles and descriptions that contain spaces"
        )))),
    }
}
