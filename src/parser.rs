//! Turns the token stream from `lexer.rs` into a [`Command`] per the
//! grammar table in `spec.md` §6. Grounded on
//! `original_source/src/main.c`'s `readOperation`/`readOperation*` family,
//! restructured as a recursive-descent parser returning a value instead of
//! dispatching side effects inline.

use crate::error::PhfwdError;
use crate::lexer::{Lexer, Token, TokenKind};

/// A fully parsed command, still holding raw strings -- `interpreter.rs`
/// validates them into [`crate::digit::Number`]s so parse errors and
/// "not a valid number" errors stay distinguishable.
#[derive(Debug, Clone)]
pub enum Command {
    NewBase { id: String, pos: usize },
    DelBase { id: String, pos: usize },
    DelNumber { number: String, pos: usize },
    Get { number: String, pos: usize },
    Reverse { number: String, pos: usize },
    NonTrivialCount { number: String, pos: usize },
    Add {
        from: String,
        to: String,
        pos: usize,
    },
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

fn is_reserved(word: &str) -> bool {
    word == "NEW" || word == "DEL"
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
        }
    }

    /// Current 1-based byte offset, for reporting `ERROR EOF`.
    pub fn offset(&self) -> usize {
        self.lexer.offset()
    }

    fn next(&mut self) -> Result<Option<Token>, PhfwdError> {
        self.lexer.next_token()
    }

    fn expect_token(&mut self) -> Result<Token, PhfwdError> {
        match self.next()? {
            Some(t) => Ok(t),
            None => Err(PhfwdError::LexError(crate::error::LexErrorKind::TruncatedToken)),
        }
    }

    /// Parses one command, or returns `Ok(None)` on a clean end of input.
    pub fn parse_command(&mut self) -> Result<Option<Command>, PhfwdError> {
        let first = match self.next()? {
            None => return Ok(None),
            Some(t) => t,
        };
        match first.kind {
            TokenKind::Word(w) if w == "NEW" => Ok(Some(self.parse_new()?)),
            TokenKind::Word(w) if w == "DEL" => Ok(Some(self.parse_del(first.pos)?)),
            TokenKind::Number(n) => Ok(Some(self.parse_number_led(n, first.pos)?)),
            TokenKind::Op('?') => Ok(Some(self.parse_reverse(first.pos)?)),
            TokenKind::Op('@') => Ok(Some(self.parse_non_trivial()?)),
            _ => Err(PhfwdError::InvalidArgument),
        }
    }

    fn parse_new(&mut self) -> Result<Command, PhfwdError> {
        let tok = self.expect_token()?;
        let TokenKind::Word(id) = tok.kind else {
            return Err(PhfwdError::InvalidArgument);
        };
        if is_reserved(&id) {
            return Err(PhfwdError::InvalidArgument);
        }
        Ok(Command::NewBase { id, pos: tok.pos })
    }

    fn parse_del(&mut self, operator_pos: usize) -> Result<Command, PhfwdError> {
        let tok = self.expect_token()?;
        match tok.kind {
            TokenKind::Number(number) => Ok(Command::DelNumber {
                number,
                pos: operator_pos,
            }),
            TokenKind::Word(id) => {
                if is_reserved(&id) {
                    return Err(PhfwdError::InvalidArgument);
                }
                Ok(Command::DelBase {
                    id,
                    pos: operator_pos,
                })
            }
            _ => Err(PhfwdError::InvalidArgument),
        }
    }

    fn parse_number_led(&mut self, first_number: String, _pos: usize) -> Result<Command, PhfwdError> {
        let tok = self.expect_token()?;
        match tok.kind {
            TokenKind::Op('?') => Ok(Command::Get {
                number: first_number,
                pos: tok.pos,
            }),
            TokenKind::Op('>') => {
                let next = self.expect_token()?;
                let TokenKind::Number(to) = next.kind else {
                    return Err(PhfwdError::InvalidArgument);
                };
                Ok(Command::Add {
                    from: first_number,
                    to,
                    pos: tok.pos,
                })
            }
            _ => Err(PhfwdError::InvalidArgument),
        }
    }

    fn parse_reverse(&mut self, operator_pos: usize) -> Result<Command, PhfwdError> {
        let tok = self.expect_token()?;
        let TokenKind::Number(number) = tok.kind else {
            return Err(PhfwdError::InvalidArgument);
        };
        Ok(Command::Reverse {
            number,
            pos: operator_pos,
        })
    }

    fn parse_non_trivial(&mut self) -> Result<Command, PhfwdError> {
        let tok = self.expect_token()?;
        let TokenKind::Number(number) = tok.kind else {
            return Err(PhfwdError::InvalidArgument);
        };
        Ok(Command::NonTrivialCount { number, pos: tok.pos })
    }
}
