//! Process-wide grammar registry.
//!
//! The registry starts from the tokenizer's default grammars and accepts
//! additional ones at runtime. Registration is check-then-insert: a grammar
//! whose name is already known is left untouched, so calling it repeatedly is
//! harmless.
//!
//! # Thread Safety
//!
//! Readers call [`GrammarRegistry::snapshot`], which clones an `Arc` under a
//! short read lock. Registration builds a new set and swaps the `Arc` under the
//! write lock, so an in-flight render keeps using the set it started with.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock, RwLock};

use syntect::parsing::{SyntaxDefinition, SyntaxSet};

use crate::HighlightError;

/// A language grammar in sublime-syntax YAML form.
#[derive(Clone, Debug)]
pub struct Grammar {
    name: String,
    source: Cow<'static, str>,
    /// Definition parsed up front by [`Grammar::from_source`].
    definition: Option<SyntaxDefinition>,
}

impl Grammar {
    /// Create a grammar. `name` must match the `name:` key of the definition.
    ///
    /// The source is parsed lazily, on first registration.
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            definition: None,
        }
    }

    /// Parse a grammar and take its name from the `name:` key.
    ///
    /// `fallback_name` is used only when the definition has no `name:` key.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Grammar`] if the definition does not parse.
    pub fn from_source(source: String, fallback_name: &str) -> Result<Self, HighlightError> {
        let definition = parse_definition(&source, fallback_name)?;
        Ok(Self {
            name: definition.name.clone(),
            source: Cow::Owned(source),
            definition: Some(definition),
        })
    }

    /// TOML, which the default grammar set does not include.
    #[must_use]
    pub fn toml() -> Self {
        Self::new("TOML", include_str!("../grammars/toml.sublime-syntax"))
    }

    /// Grammar name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn parse_definition(source: &str, name: &str) -> Result<SyntaxDefinition, HighlightError> {
    SyntaxDefinition::load_from_str(source, true, Some(name)).map_err(|err| {
        HighlightError::Grammar {
            name: name.to_owned(),
            source: err,
        }
    })
}

/// Grammars the site needs on top of the tokenizer defaults.
fn bundled() -> [Grammar; 1] {
    [Grammar::toml()]
}

/// Install the bundled grammars into `registry`.
///
/// This is the explicit one-time initialization step for highlighting. It is
/// idempotent and safe to call from several threads.
pub fn register_bundled(registry: &GrammarRegistry) -> Result<(), HighlightError> {
    for grammar in bundled() {
        registry.register(&grammar)?;
    }
    Ok(())
}

static GLOBAL: LazyLock<GrammarRegistry> = LazyLock::new(GrammarRegistry::with_defaults);

/// Table of language grammars shared by every render.
#[derive(Debug)]
pub struct GrammarRegistry {
    syntaxes: RwLock<Arc<SyntaxSet>>,
}

impl GrammarRegistry {
    /// Registry holding the tokenizer's default grammars (newline mode).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            syntaxes: RwLock::new(Arc::new(SyntaxSet::load_defaults_newlines())),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Current grammar set.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SyntaxSet> {
        self.syntaxes.read().unwrap().clone()
    }

    /// Whether a grammar with this exact name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().find_syntax_by_name(name).is_some()
    }

    /// Register a grammar unless one with the same name exists.
    ///
    /// Returns `Ok(true)` when the grammar was added and `Ok(false)` when it
    /// was already present.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Grammar`] if the definition does not parse.
    pub fn register(&self, grammar: &Grammar) -> Result<bool, HighlightError> {
        if self.contains(&grammar.name) {
            tracing::debug!(grammar = %grammar.name, "Grammar already registered");
            return Ok(false);
        }

        let definition = match &grammar.definition {
            Some(definition) => definition.clone(),
            None => parse_definition(&grammar.source, &grammar.name)?,
        };

        let mut syntaxes = self.syntaxes.write().unwrap();

        // Another thread may have won the race since the read above.
        if syntaxes.find_syntax_by_name(&definition.name).is_some() {
            tracing::debug!(grammar = %definition.name, "Grammar already registered");
            return Ok(false);
        }

        let name = definition.name.clone();
        let mut builder = SyntaxSet::clone(&syntaxes).into_builder();
        builder.add(definition);
        *syntaxes = Arc::new(builder.build());

        tracing::info!(grammar = %name, "Registered grammar");
        Ok(true)
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(super::GrammarRegistry: Send, Sync);

    #[test]
    fn test_defaults_include_common_languages() {
        let registry = GrammarRegistry::with_defaults();

        assert!(registry.contains("Rust"));
        assert!(registry.contains("JavaScript"));
        assert!(registry.contains("C#"));
    }

    #[test]
    fn test_defaults_lack_toml() {
        let registry = GrammarRegistry::with_defaults();

        assert!(!registry.contains("TOML"));
    }

    #[test]
    fn test_register_adds_grammar() {
        let registry = GrammarRegistry::with_defaults();

        let added = registry.register(&Grammar::toml()).unwrap();

        assert!(added);
        assert!(registry.contains("TOML"));
        assert!(registry.contains("Rust"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = GrammarRegistry::with_defaults();

        assert!(registry.register(&Grammar::toml()).unwrap());
        let count = registry.snapshot().syntaxes().len();

        assert!(!registry.register(&Grammar::toml()).unwrap());
        assert!(!registry.register(&Grammar::toml()).unwrap());
        assert_eq!(registry.snapshot().syntaxes().len(), count);
    }

    #[test]
    fn test_register_bundled_twice() {
        let registry = GrammarRegistry::with_defaults();

        register_bundled(&registry).unwrap();
        register_bundled(&registry).unwrap();

        let tomls = registry
            .snapshot()
            .syntaxes()
            .iter()
            .filter(|syntax| syntax.name == "TOML")
            .count();
        assert_eq!(tomls, 1);
    }

    #[test]
    fn test_concurrent_registration_adds_once() {
        let registry = GrammarRegistry::with_defaults();

        let added: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.register(&Grammar::toml()).unwrap()))
                .collect();
            handles
                .into_iter()
                .map(|handle| usize::from(handle.join().unwrap()))
                .sum()
        });

        assert_eq!(added, 1);
        assert!(registry.contains("TOML"));
    }

    #[test]
    fn test_snapshot_survives_registration() {
        let registry = GrammarRegistry::with_defaults();
        let before = registry.snapshot();

        registry.register(&Grammar::toml()).unwrap();

        assert!(before.find_syntax_by_name("TOML").is_none());
        assert!(registry.snapshot().find_syntax_by_name("TOML").is_some());
    }

    #[test]
    fn test_invalid_grammar_is_an_error() {
        let registry = GrammarRegistry::with_defaults();
        let grammar = Grammar::new("Broken", "%YAML 1.2\n---\nname: Broken\n");

        let err = registry.register(&grammar).unwrap_err();

        assert!(
            matches!(err, HighlightError::Grammar { ref name, .. } if name == "Broken"),
            "Expected HighlightError::Grammar, got {err:?}"
        );
        assert!(!registry.contains("Broken"));
    }

    #[test]
    fn test_from_source_takes_name_from_definition() {
        let source = "%YAML 1.2\n---\nname: Site Rust\nscope: source.siterust\ncontexts:\n  main:\n    - match: 'x'\n      scope: keyword.other.siterust\n";

        let grammar = Grammar::from_source(source.to_string(), "Rust").unwrap();

        assert_eq!(grammar.name(), "Site Rust");
    }

    #[test]
    fn test_from_source_registers_despite_fallback_clash() {
        let registry = GrammarRegistry::with_defaults();
        let source = "%YAML 1.2\n---\nname: Site Rust\nscope: source.siterust\ncontexts:\n  main:\n    - match: 'x'\n      scope: keyword.other.siterust\n";
        let grammar = Grammar::from_source(source.to_string(), "Rust").unwrap();

        assert!(registry.register(&grammar).unwrap());
        assert!(registry.contains("Site Rust"));
        assert!(!registry.register(&grammar).unwrap());
    }

    #[test]
    fn test_from_source_without_name_uses_fallback() {
        let source = "%YAML 1.2\n---\nscope: source.nameless\ncontexts:\n  main:\n    - match: 'x'\n      scope: keyword.other.nameless\n";

        let grammar = Grammar::from_source(source.to_string(), "nameless").unwrap();

        assert_eq!(grammar.name(), "nameless");
    }

    #[test]
    fn test_from_source_invalid() {
        let err = Grammar::from_source("name: Broken\n".to_string(), "broken").unwrap_err();

        assert!(matches!(err, HighlightError::Grammar { .. }));
    }

    #[test]
    fn test_grammar_name() {
        assert_eq!(Grammar::toml().name(), "TOML");
    }
}
