//! Tokenizer for the line-oriented command language (`spec.md` §6),
//! grounded on `original_source/src/parser.c` and `src/input.c`: strips
//! `$$ ... $$` comments (including embedded newlines) wherever they occur
//! between tokens, and tracks 1-based byte offsets for error reporting.
//!
//! Out of scope in detail per `spec.md` §1 ("glue" bounded only by the API
//! the core exposes); this module and `parser.rs`/`interpreter.rs` are the
//! thin collaborators that API is bounded by.

use crate::error::{LexErrorKind, PhfwdError};

/// One lexical token, paired with the 1-based byte offset of its first
/// character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of ASCII letters/digits starting with a letter: an
    /// identifier, or (by exact spelling) the `NEW`/`DEL` keyword.
    Word(String),
    /// A run of digit-alphabet symbols (`0`-`9`, `:`, `;`).
    Number(String),
    /// One of the single-character operators `? > @`.
    Op(char),
}

pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

fn is_skippable_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' || b == 0x0b || b == 0x0c
}

fn is_number_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b':' || b == b';'
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    /// 1-based byte offset of the lexer's current position (used by the
    /// interpreter to report where an unexpected-EOF occurred).
    pub fn offset(&self) -> usize {
        self.pos + 1
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Skips whitespace and `$$ ... $$` comments, which may freely
    /// interleave (matching `parserSkipSkipable`'s loop).
    fn skip_skippable(&mut self) -> Result<(), PhfwdError> {
        loop {
            let mut advanced = false;
            while let Some(b) = self.peek() {
                if is_skippable_whitespace(b) {
                    self.pos += 1;
                    advanced = true;
                } else {
                    break;
                }
            }
            if self.peek() == Some(b'$') {
                self.pos += 1;
                if self.peek() != Some(b'$') {
                    return Err(PhfwdError::LexError(LexErrorKind::UnexpectedChar));
                }
                self.pos += 1;
                loop {
                    match self.peek() {
                        None => {
                            return Err(PhfwdError::LexError(LexErrorKind::UnterminatedComment))
                        }
                        Some(b'$') => {
                            self.pos += 1;
                            if self.peek() == Some(b'$') {
                                self.pos += 1;
                                break;
                            }
                        }
                        Some(_) => self.pos += 1,
                    }
                }
                advanced = true;
            }
            if !advanced {
                break;
            }
        }
        Ok(())
    }

    /// Reads the next token, or `None` on a clean end of input (no token
    /// or comment was truncated -- distinct from [`PhfwdError::LexError`]).
    pub fn next_token(&mut self) -> Result<Option<Token>, PhfwdError> {
        self.skip_skippable()?;
        let start = self.pos;
        let Some(b) = self.peek() else {
            return Ok(None);
        };
        let pos = start + 1;
        if b.is_ascii_alphabetic() {
            while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
                self.pos += 1;
            }
            let word = std::str::from_utf8(&self.input[start..self.pos])
                .expect("ASCII input")
                .to_owned();
            Ok(Some(Token {
                kind: TokenKind::Word(word),
                pos,
            }))
        } else if is_number_char(b) {
            while matches!(self.peek(), Some(c) if is_number_char(c)) {
                self.pos += 1;
            }
            let number = std::str::from_utf8(&self.input[start..self.pos])
                .expect("ASCII input")
                .to_owned();
            Ok(Some(Token {
                kind: TokenKind::Number(number),
                pos,
            }))
        } else if b == b'?' || b == b'>' || b == b'@' {
            self.pos += 1;
            Ok(Some(Token {
                kind: TokenKind::Op(b as char),
                pos,
            }))
        } else {
            self.pos += 1;
            Err(PhfwdError::LexError(LexErrorKind::UnexpectedChar))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        while let Some(tok) = lexer.next_token().unwrap() {
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn lexes_basic_command() {
        assert_eq!(
            tokens("2 > 0"),
            vec![
                TokenKind::Number("2".into()),
                TokenKind::Op('>'),
                TokenKind::Number("0".into()),
            ]
        );
    }

    #[test]
    fn comment_elided_between_tokens() {
        assert_eq!(
            tokens("NEW$$c$$A"),
            vec![TokenKind::Word("NEW".into()), TokenKind::Word("A".into())]
        );
    }

    #[test]
    fn comment_with_embedded_newline() {
        assert_eq!(
            tokens("1 $$ a\nb $$ > 2"),
            vec![
                TokenKind::Number("1".into()),
                TokenKind::Op('>'),
                TokenKind::Number("2".into()),
            ]
        );
    }

    #[test]
    fn unterminated_comment_is_eof_error() {
        let mut lexer = Lexer::new("NEW A $$ unterminated");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn empty_input_is_clean_eof() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().unwrap().is_none());
    }

    #[test]
    fn unexpected_character_errors() {
        let mut lexer = Lexer::new("#");
        let err = lexer.next_token().unwrap_err();
        assert!(!err.is_eof());
        assert!(matches!(
            err,
            PhfwdError::LexError(LexErrorKind::UnexpectedChar)
        ));
    }

    #[test]
    fn extended_alphabet_digits_form_one_number() {
        assert_eq!(tokens("12:34;"), vec![TokenKind::Number("12:34;".into())]);
    }
}
