//! Syntax-highlighted code blocks.
//!
//! [`Fence`] turns a code sample and a language tag into lines of styled
//! spans. Lexing is delegated to a [`Tokenizer`]; the default one is
//! [`SyntectTokenizer`], which reads grammars from the process-wide
//! [`GrammarRegistry`].
//!
//! Spans carry CSS classes only (`token keyword`, `token string`, ...). No
//! theme colors are computed here.
//!
//! # Example
//!
//! ```
//! use tt_highlight::Fence;
//!
//! let fence = Fence::new()?;
//! let rendered = fence.render("let x = 1;\n", "javascript")?;
//!
//! assert_eq!(rendered.lines.len(), 1);
//! assert_eq!(rendered.text(), "let x = 1;");
//! # Ok::<(), tt_highlight::HighlightError>(())
//! ```

mod error;
mod fence;
mod html;
mod registry;
mod syntect_tokenizer;
mod token;

pub use error::HighlightError;
pub use fence::{Fence, RenderedCode, RenderedLine, Span};
pub use html::escape_html;
pub use registry::{Grammar, GrammarRegistry, register_bundled};
pub use syntect_tokenizer::SyntectTokenizer;
pub use token::{PLAIN, Token, TokenLine, Tokenizer};
