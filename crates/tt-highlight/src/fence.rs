//! Code block renderer.
//!
//! [`Fence`] trims the sample, hands it to a [`Tokenizer`], drops empty tokens
//! and groups the remaining ones into [`RenderedLine`]s.

use std::fmt::Write;

use crate::html::escape_html;
use crate::registry::{GrammarRegistry, register_bundled};
use crate::syntect_tokenizer::SyntectTokenizer;
use crate::token::{Token, Tokenizer};
use crate::HighlightError;

/// A styled inline text span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// CSS classes, e.g. `token keyword`.
    pub class_name: String,
    /// Source text. Never empty.
    pub text: String,
}

impl Span {
    fn from_token(token: Token) -> Self {
        let mut class_name = String::from("token");
        for kind in &token.types {
            class_name.push(' ');
            class_name.push_str(kind);
        }
        Self {
            class_name,
            text: token.content,
        }
    }
}

/// Spans of one source line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedLine {
    /// Spans in source order.
    pub spans: Vec<Span>,
}

impl RenderedLine {
    /// Concatenated span text.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Rendered code sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCode {
    /// Language tag as given by the caller.
    pub language: String,
    /// One entry per line of the trimmed sample.
    pub lines: Vec<RenderedLine>,
}

impl RenderedCode {
    /// Source text reassembled from spans, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as `<pre><code>` markup with one `<span>` per token and a
    /// newline after every line.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write!(
            out,
            r#"<pre class="prism-code language-{}"><code>"#,
            escape_html(&self.language)
        )
        .unwrap();
        for line in &self.lines {
            for span in &line.spans {
                write!(
                    out,
                    r#"<span class="{}">{}</span>"#,
                    escape_html(&span.class_name),
                    escape_html(&span.text)
                )
                .unwrap();
            }
            out.push('\n');
        }
        out.push_str("</code></pre>");
        out
    }
}

/// Code block renderer.
///
/// Stateless apart from the tokenizer it wraps; safe to share across threads.
#[derive(Debug)]
pub struct Fence<T = SyntectTokenizer<'static>> {
    tokenizer: T,
}

impl Fence {
    /// Renderer over the process-wide grammar registry.
    ///
    /// Installs the bundled grammars first. Repeated calls do not register
    /// anything twice.
    pub fn new() -> Result<Self, HighlightError> {
        register_bundled(GrammarRegistry::global())?;
        Ok(Self::with_tokenizer(SyntectTokenizer::new()))
    }
}

impl<T: Tokenizer> Fence<T> {
    /// Renderer over any tokenizer.
    #[must_use]
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// The wrapped tokenizer.
    #[must_use]
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Render `code` highlighted as `language`.
    ///
    /// Trailing whitespace is ignored. Unknown languages render as plain text.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer failures.
    pub fn render(&self, code: &str, language: &str) -> Result<RenderedCode, HighlightError> {
        let lines = self
            .tokenizer
            .tokenize(code.trim_end(), language)?
            .into_iter()
            .map(|line| RenderedLine {
                spans: line
                    .into_iter()
                    .filter(|token| !token.empty && !token.content.is_empty())
                    .map(Span::from_token)
                    .collect(),
            })
            .collect();

        Ok(RenderedCode {
            language: language.to_owned(),
            lines,
        })
    }
}
