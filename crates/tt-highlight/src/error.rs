//! Highlighting errors.

use syntect::parsing::{ParseSyntaxError, ParsingError, ScopeError};

/// Errors raised by the tokenizer or grammar registration.
///
/// Unknown languages are not an error: they fall back to plain text.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// A grammar definition could not be loaded.
    #[error("Invalid grammar {name}: {source}")]
    Grammar {
        /// Name the grammar was registered under.
        name: String,
        /// Underlying YAML or regex error.
        #[source]
        source: ParseSyntaxError,
    },
    /// The tokenizer failed while parsing a line.
    #[error("Tokenizer error: {0}")]
    Parse(#[from] ParsingError),
    /// The tokenizer produced an inconsistent scope stack.
    #[error("Scope error: {0:?}")]
    Scope(ScopeError),
}

impl From<ScopeError> for HighlightError {
    fn from(err: ScopeError) -> Self {
        Self::Scope(err)
    }
}
