//! Site assembly.
//!
//! [`DocsSite`] is what the page layer talks to: it owns the sidebar
//! [`Navigation`] and a code block [`Fence`], both built from [`Config`].
//!
//! Building a site is also the explicit initialization point for
//! highlighting: bundled grammars and any grammar files from the configured
//! directories are registered in the process-wide [`GrammarRegistry`] before
//! the first render. Registration is idempotent, so building several sites in
//! one process is fine.
//!
//! # Example
//!
//! ```
//! use tt_config::Config;
//! use tt_site::DocsSite;
//!
//! let site = DocsSite::from_config(&Config::default())?;
//!
//! assert_eq!(site.navigation().sections()[0].title, "Getting Started");
//! let code = site.render_code("let x = 1;", "javascript")?;
//! assert!(code.to_html().starts_with("<pre"));
//! # Ok::<(), tt_site::SiteError>(())
//! ```

mod error;
mod grammars;

use std::path::Path;

use tt_config::Config;
use tt_highlight::{Fence, GrammarRegistry, RenderedCode, SyntectTokenizer, register_bundled};
use tt_nav::Navigation;

pub use error::SiteError;

/// Navigation and code rendering for the docs pages.
#[derive(Debug)]
pub struct DocsSite {
    navigation: Navigation,
    fence: Fence,
}

impl DocsSite {
    /// Load configuration (explicit path or discovered `tt.toml`) and build
    /// the site from it.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SiteError> {
        let config = Config::load(config_path)?;
        Self::from_config(&config)
    }

    /// Build the site from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if a grammar directory cannot be read and
    /// [`SiteError::Highlight`] if a grammar file is invalid.
    pub fn from_config(config: &Config) -> Result<Self, SiteError> {
        let registry = GrammarRegistry::global();
        register_bundled(registry)?;

        let mut added = 0usize;
        for dir in &config.highlight_resolved.grammar_dirs {
            for grammar in grammars::load_dir(dir)? {
                if registry.register(&grammar)? {
                    added += 1;
                }
            }
        }

        let tokenizer = SyntectTokenizer::new().with_aliases(&config.highlight_resolved.aliases);
        let navigation = config.navigation();

        tracing::info!(
            sections = navigation.len(),
            grammars_added = added,
            aliases = config.highlight_resolved.aliases.len(),
            "Docs site ready"
        );

        Ok(Self {
            navigation,
            fence: Fence::with_tokenizer(tokenizer),
        })
    }

    /// Sidebar sections.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Sidebar sections as a JSON array for the page layer.
    pub fn navigation_json(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string(&self.navigation)?)
    }

    /// Render an embedded code sample.
    pub fn render_code(&self, code: &str, language: &str) -> Result<RenderedCode, SiteError> {
        Ok(self.fence.render(code, language)?)
    }
}
