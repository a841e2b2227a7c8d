//! Integration tests for the shell
//!
//! Drives a `Repl` with scripted input through the `LineEditor` trait.

use cmodel_foundation::{DeclarationKind, QualifiedName, Result};
use cmodel_runtime::{LineEditor, Outcome, ReadResult, Repl, Session};
use cmodel_store::ContentModel;

/// Replays a fixed script, then reports end of input.
struct ScriptEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl(lines: &[&str]) -> Repl<ScriptEditor> {
    let session = Session::new(ContentModel::new(QualifiedName::parse("acme:legal").unwrap()));
    Repl::with_editor(ScriptEditor::new(lines), session).without_banner()
}

#[test]
fn script_with_errors_keeps_going() {
    let mut repl = repl(&[
        "new aspect audit",
        "new aspect audit",
        "new type legalDoc \"Legal document\"",
        "mandatory type legalDoc audit",
        "mandatory type legalDoc audit",
        "property legalDoc caseNumber long",
        "extend type legalDoc nowhere",
        "",
    ]);
    repl.run().unwrap();

    let session = repl.session();
    assert_eq!(session.list(DeclarationKind::Aspect).len(), 1);
    assert_eq!(
        session.closure(DeclarationKind::Type, "legalDoc").unwrap(),
        vec![QualifiedName::parse("acme:audit").unwrap()]
    );
    assert!(session.ancestors(DeclarationKind::Type, "legalDoc").unwrap().is_empty());
    assert!(session.is_dirty());
}

#[test]
fn eval_reports_each_command() {
    let mut repl = repl(&[]);
    let mut say = |line: &str| match repl.eval(line) {
        Ok(Outcome::Output(text)) => text,
        Ok(Outcome::Quit) => "<quit>".to_string(),
        Err(err) => format!("error: {err}"),
    };

    assert_eq!(say("new type doc"), "created type 'acme:doc'");
    assert_eq!(say("extend type doc cm:folder"), "type 'acme:doc' now extends 'cm:folder'");
    assert_eq!(say("ancestors type doc"), "(none)");
    assert_eq!(say("list type"), "type acme:doc");
    assert!(say("extend type cm:folder doc").starts_with("error: link refused: built-in"));
    assert!(say("show type ghost").contains("does not exist"));
    assert!(say("new widget x").starts_with("error: invalid name"));
    assert_eq!(say("exit"), "<quit>");
}
