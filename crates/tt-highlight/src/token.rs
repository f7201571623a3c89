//! Tokenizer seam.
//!
//! The renderer only sees [`Token`]s grouped into lines. Any engine that can
//! split source text into classified tokens can sit behind [`Tokenizer`].

use crate::HighlightError;

/// A classified slice of one source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Classification, outermost first (e.g. `["keyword"]`).
    ///
    /// Unclassified text is `["plain"]`.
    pub types: Vec<String>,
    /// Source text covered by the token, without the line terminator.
    pub content: String,
    /// Whether the token has no renderable text.
    pub empty: bool,
}

impl Token {
    /// Build a token, deriving `empty` from `content`.
    #[must_use]
    pub fn new(types: Vec<String>, content: &str) -> Self {
        Self {
            types,
            empty: content.is_empty(),
            content: content.to_owned(),
        }
    }

    /// Unclassified token.
    #[must_use]
    pub fn plain(content: &str) -> Self {
        Self::new(vec![PLAIN.to_owned()], content)
    }
}

/// Type assigned to text the grammar does not classify.
pub const PLAIN: &str = "plain";

/// One source line worth of tokens.
pub type TokenLine = Vec<Token>;

/// Splits source text into lines of classified tokens.
///
/// Implementations must return exactly one line per `\n`-separated line of
/// `code`, and must not fail on an unknown `language`; they fall back to
/// plain text instead.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `code` using the grammar selected by `language`.
    fn tokenize(&self, code: &str, language: &str) -> Result<Vec<TokenLine>, HighlightError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, code: &str, language: &str) -> Result<Vec<TokenLine>, HighlightError> {
        (**self).tokenize(code, language)
    }
}
