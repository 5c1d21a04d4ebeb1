//! Error taxonomy shared by the core engine and the command interpreter.
//!
//! See `spec.md` §7: five cases, one `ERROR <infix> <byte-offset>` line ever
//! emitted by the binary, core mutations restore trie invariants themselves
//! before returning a failure.

use thiserror::Error;

/// Why a lexical scan failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// An unterminated `$$ ... $$` comment ran into end of input.
    UnterminatedComment,
    /// A token (identifier/number/operator) was cut short by end of input.
    TruncatedToken,
    /// A character outside any valid token appeared where a token was
    /// expected.
    UnexpectedChar,
}

/// The five failure modes of the core and interpreter layers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PhfwdError {
    /// Malformed input: non-digit characters, empty number, `NEW`/`DEL`
    /// used as an identifier, or `n1 == n2` in a redirect.
    #[error("invalid argument")]
    InvalidArgument,
    /// An allocation failed while the core was mutating a trie.
    #[error("not enough memory")]
    OutOfMemory,
    /// An operation needed a current base but none is selected.
    #[error("no current base")]
    NoCurrentBase,
    /// `DEL id` named a base that doesn't exist.
    #[error("unknown base")]
    UnknownBase,
    /// The lexer hit an unexpected character or ran off the end of input.
    #[error("lexical error")]
    LexError(LexErrorKind),
}

impl PhfwdError {
    /// Whether the input stream was truncated (comment or token cut short
    /// by EOF) -- the one case the command language reports as bare `ERROR
    /// EOF` instead of `ERROR <infix> <byte-offset>`.
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            PhfwdError::LexError(LexErrorKind::UnterminatedComment)
                | PhfwdError::LexError(LexErrorKind::TruncatedToken)
        )
    }
}

pub type Result<T> = std::result::Result<T, PhfwdError>;
