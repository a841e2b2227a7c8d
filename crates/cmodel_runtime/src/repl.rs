//! The interactive shell.

use std::io::{self, Write};

use cmodel_foundation::{DeclarationKind, Error, QualifiedName, Result};

use crate::command::{self, Command};
use crate::editor::{LineEditor, ReadResult, RustylineEditor, default_keywords};
use crate::session::Session;

/// What a command produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the user.
    Output(String),
    /// The user asked to leave.
    Quit,
}

/// The interactive shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The session being edited.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a shell over `session` with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        let prompt = format!("{}> ", session.model().name());
        let mut repl = Self {
            editor,
            session,
            show_banner: true,
            prompt,
        };
        repl.refresh_keywords();
        repl
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session mutably.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(Outcome::Output(text)) => {
                    if !text.is_empty() {
                        println!("{text}");
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(e) => print_error(&e),
            }
        }

        if self.session.is_dirty() {
            eprintln!("\x1b[33mwarning: the model has unsaved changes\x1b[0m");
        }
        Ok(())
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// Returns the parse or execution error.
    pub fn eval(&mut self, line: &str) -> Result<Outcome> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Output(String::new())),
        }
    }

    /// Executes a parsed command against the session.
    ///
    /// # Errors
    ///
    /// Returns the session error; the model is left unchanged.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let text = match command {
            Command::New {
                kind,
                name,
                title,
                description,
            } => {
                let name = self.session.new_declaration(
                    kind,
                    &name,
                    title.as_deref(),
                    description.as_deref(),
                )?;
                self.refresh_keywords();
                format!("created {kind} '{name}'")
            }
            Command::Property {
                owner,
                name,
                typology,
                mandatory,
                title,
                description,
            } => {
                self.session.new_property(
                    &owner,
                    &name,
                    &typology,
                    mandatory,
                    title.as_deref(),
                    description.as_deref(),
                )?;
                format!("added property '{name}' to '{}'", self.session.qualify(&owner)?)
            }
            Command::Extend { kind, source, parent } => {
                self.session.extend(kind, &source, &parent)?;
                format!(
                    "{kind} '{}' now extends '{}'",
                    self.session.qualify(&source)?,
                    self.session.qualify(&parent)?
                )
            }
            Command::Mandatory { kind, source, aspect } => {
                self.session.require(kind, &source, &aspect)?;
                format!(
                    "{kind} '{}' now requires aspect '{}'",
                    self.session.qualify(&source)?,
                    self.session.qualify(&aspect)?
                )
            }
            Command::Show { kind, name } => {
                let node = self.session.resolve(kind, &name)?;
                node.to_string().trim_end().to_string()
            }
            Command::Ancestors { kind, name } => {
                join_or_none(&self.session.ancestors(kind, &name)?, " -> ")
            }
            Command::Closure { kind, name } => {
                join_or_none(&self.session.closure(kind, &name)?, ", ")
            }
            Command::Check => {
                let checked = self.session.check()?;
                format!("ok: {checked} declarations resolved")
            }
            Command::List(kind) => {
                let kinds = kind.map_or_else(|| DeclarationKind::ALL.to_vec(), |k| vec![k]);
                kinds
                    .into_iter()
                    .flat_map(|kind| {
                        self.session
                            .list(kind)
                            .into_iter()
                            .map(move |name| format!("{kind} {name}"))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Save(path) => {
                match path {
                    Some(path) => self.session.save_as(path)?,
                    None => self.session.save()?,
                }
                match self.session.config().model_path() {
                    Some(path) => format!("saved to '{}'", path.display()),
                    None => "saved".to_string(),
                }
            }
            Command::Help => command::help().to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(text))
    }

    /// Offers the declared names for completion next to the keywords.
    fn refresh_keywords(&mut self) {
        let mut keywords = default_keywords();
        for kind in DeclarationKind::ALL {
            for name in self.session.list(kind) {
                keywords.push(name.local().to_string());
                keywords.push(name.to_string());
            }
        }
        keywords.sort();
        keywords.dedup();
        self.editor.set_keywords(keywords);
    }

    fn print_banner(&self) {
        println!(
            "cmodel {} - editing {}",
            env!("CARGO_PKG_VERSION"),
            self.session.model().name()
        );
        println!("Type 'help' for commands, Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn join_or_none(names: &[QualifiedName], separator: &str) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Prints an error and its resolution context to stderr.
pub fn print_error(error: &Error) {
    eprintln!("\x1b[31merror: {error}\x1b[0m");
    if let Some(context) = &error.context {
        eprintln!("{context}");
    }
}
