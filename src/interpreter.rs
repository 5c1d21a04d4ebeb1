//! Executes parsed [`Command`]s against a [`Session`] and renders the
//! single-line error format from `spec.md` §6-§7. Grounded on
//! `original_source/src/main.c`'s `readOperation*` family and
//! `printErrorMessage`/`printEofError`.

use std::io::Write;

use crate::digit::Number;
use crate::error::PhfwdError;
use crate::parser::{Command, Parser};
use crate::session::Session;

/// Which operator (if any) was in play when a command failed, selecting
/// the infix `spec.md` §6 specifies for the `ERROR <infix> <byte-offset>`
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic syntax/semantic error: infix is a single space.
    Generic,
    /// `DEL` operator-specific error (missing base, no current base).
    Del,
    /// `?` operator-specific error (either `n ?` or `? n`).
    Question,
    /// `>` operator-specific error (no current base, self-redirect).
    Redirect,
    /// Input was truncated mid-token or mid-comment.
    Eof,
}

/// A fully formatted runtime error: what went wrong, and where.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl RuntimeError {
    pub fn render(&self) -> String {
        match self.kind {
            ErrorKind::Eof => "ERROR EOF".to_string(),
            ErrorKind::Generic => format!("ERROR {}", self.offset),
            ErrorKind::Del => format!("ERROR DEL {}", self.offset),
            ErrorKind::Question => format!("ERROR ? {}", self.offset),
            ErrorKind::Redirect => format!("ERROR > {}", self.offset),
        }
    }

    fn from_lex(error: PhfwdError, offset: usize) -> Self {
        let kind = if error.is_eof() {
            ErrorKind::Eof
        } else {
            ErrorKind::Generic
        };
        RuntimeError { kind, offset }
    }
}

/// Runs every command in `input` against a fresh [`Session`], writing
/// query output to `out`. Returns the first error encountered, if any --
/// the caller (the binary) is responsible for the exit-code contract.
pub fn run(input: &str, out: &mut impl Write) -> Result<(), RuntimeError> {
    let mut parser = Parser::new(input);
    let mut session = Session::new();
    loop {
        let offset_before = parser.offset();
        match parser.parse_command() {
            Ok(None) => return Ok(()),
            Ok(Some(cmd)) => execute(&mut session, cmd, out)?,
            Err(e) => return Err(RuntimeError::from_lex(e, offset_before)),
        }
    }
}

fn parsed_number(raw: &str) -> Number {
    Number::parse(raw).expect("lexer only emits valid digit-alphabet numbers")
}

fn execute(
    session: &mut Session,
    cmd: Command,
    out: &mut impl Write,
) -> Result<(), RuntimeError> {
    match cmd {
        Command::NewBase { id, .. } => {
            session.new_base(&id);
            Ok(())
        }
        Command::DelBase { id, pos } => {
            if session.del_base(&id) {
                Ok(())
            } else {
                Err(RuntimeError {
                    kind: ErrorKind::Del,
                    offset: pos,
                })
            }
        }
        Command::DelNumber { number, pos } => {
            let base = session.current_mut().ok_or(RuntimeError {
                kind: ErrorKind::Del,
                offset: pos,
            })?;
            base.remove(&parsed_number(&number));
            Ok(())
        }
        Command::Get { number, pos } => {
            let base = session.current().ok_or(RuntimeError {
                kind: ErrorKind::Question,
                offset: pos,
            })?;
            writeln!(out, "{}", base.get(&parsed_number(&number))).ok();
            Ok(())
        }
        Command::Reverse { number, pos } => {
            let base = session.current().ok_or(RuntimeError {
                kind: ErrorKind::Question,
                offset: pos,
            })?;
            for line in base.reverse(&parsed_number(&number)) {
                writeln!(out, "{line}").ok();
            }
            Ok(())
        }
        Command::NonTrivialCount { number, .. } => {
            let count = match session.current() {
                Some(base) => {
                    let len = number.len().saturating_sub(12);
                    base.non_trivial_count(&number, len)
                }
                None => 0,
            };
            writeln!(out, "{count}").ok();
            Ok(())
        }
        Command::Add { from, to, pos } => {
            let base = session.current_mut().ok_or(RuntimeError {
                kind: ErrorKind::Redirect,
                offset: pos,
            })?;
            base.add(&parsed_number(&from), &parsed_number(&to))
                .map_err(|_| RuntimeError {
                    kind: ErrorKind::Redirect,
                    offset: pos,
                })
        }
    }
}
