//! [`Tokenizer`] backed by syntect.
//!
//! No theme is applied. Tokens carry classification only (taken from the
//! grammar's scope names) and colors come from the site stylesheet.

use std::collections::HashMap;

use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use crate::registry::GrammarRegistry;
use crate::token::{PLAIN, Token, TokenLine, Tokenizer};
use crate::HighlightError;

/// Language tags used in docs fences that the grammars do not answer to.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("bash", "Bourne Again Shell (bash)"),
    ("cs", "C#"),
    ("csharp", "C#"),
    ("dotnet", "C#"),
    ("jsx", "JavaScript"),
    ("markup", "HTML"),
    ("objc", "Objective-C"),
    ("plaintext", "Plain Text"),
    ("shell", "Bourne Again Shell (bash)"),
    ("text", "Plain Text"),
];

/// Scope heads that describe structure rather than token kind.
const IGNORED_SCOPE_HEADS: &[&str] = &["meta", "source", "text"];

/// Tokenizer using the grammars of a [`GrammarRegistry`].
#[derive(Debug)]
pub struct SyntectTokenizer<'r> {
    registry: &'r GrammarRegistry,
    aliases: HashMap<String, String>,
}

impl SyntectTokenizer<'static> {
    /// Tokenizer over the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(GrammarRegistry::global())
    }
}

impl Default for SyntectTokenizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SyntectTokenizer<'r> {
    /// Tokenizer over a specific registry.
    #[must_use]
    pub fn with_registry(registry: &'r GrammarRegistry) -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(tag, target)| ((*tag).to_owned(), (*target).to_owned()))
            .collect();
        Self { registry, aliases }
    }

    /// Add language aliases. Keys are matched case-insensitively and override
    /// built-in aliases; targets are grammar names or tokens.
    #[must_use]
    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (tag, target) in aliases {
            self.aliases
                .insert(tag.as_ref().to_ascii_lowercase(), target.into());
        }
        self
    }

    /// Name of the grammar `language` resolves to.
    #[must_use]
    pub fn resolve_name(&self, language: &str) -> String {
        let syntaxes = self.registry.snapshot();
        self.resolve(&syntaxes, language).name.clone()
    }

    fn resolve<'s>(&self, syntaxes: &'s SyntaxSet, language: &str) -> &'s SyntaxReference {
        let key = language.trim().to_ascii_lowercase();
        let target = self.aliases.get(&key).map_or(key.as_str(), String::as_str);

        syntaxes
            .find_syntax_by_name(target)
            .or_else(|| syntaxes.find_syntax_by_token(target))
            .unwrap_or_else(|| {
                tracing::debug!(language, "Unknown language, rendering as plain text");
                syntaxes.find_syntax_plain_text()
            })
    }
}

impl Tokenizer for SyntectTokenizer<'_> {
    fn tokenize(&self, code: &str, language: &str) -> Result<Vec<TokenLine>, HighlightError> {
        let syntaxes = self.registry.snapshot();
        let syntax = self.resolve(&syntaxes, language);

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut buf = String::new();
        let mut lines = Vec::new();

        for line in split_lines(code) {
            // Grammars are loaded in newline mode.
            buf.clear();
            buf.push_str(line);
            buf.push('\n');

            let ops = state.parse_line(&buf, &syntaxes)?;
            let mut tokens = Vec::new();

            for (range, op) in ScopeRangeIterator::new(&ops, &buf) {
                stack.apply(op)?;
                let end = range.end.min(line.len());
                if range.start >= end {
                    continue;
                }
                tokens.push(Token::new(token_types(&stack), &line[range.start..end]));
            }

            if tokens.is_empty() {
                tokens.push(Token::plain(""));
            }
            lines.push(tokens);
        }

        Ok(lines)
    }
}

/// Split on `\r\n`, `\r` or `\n`. Always yields at least one line.
fn split_lines(code: &str) -> impl Iterator<Item = &str> {
    code.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// Token types from the scope stack: the first atom of each scope, outermost
/// first, without duplicates.
fn token_types(stack: &ScopeStack) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for scope in stack.as_slice() {
        let name = scope.build_string();
        let head = name.split('.').next().unwrap_or_default();
        if head.is_empty() || IGNORED_SCOPE_HEADS.contains(&head) {
            continue;
        }
        if !types.iter().any(|t| t == head) {
            types.push(head.to_owned());
        }
    }
    if types.is_empty() {
        types.push(PLAIN.to_owned());
    }
    types
}
