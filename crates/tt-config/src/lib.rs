//! Configuration management for the docs site.
//!
//! Parses `tt.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every section is optional. An empty or missing file yields a config that
//! uses the built-in navigation table and the bundled grammars only.
//!
//! ```toml
//! [highlight]
//! grammar_dirs = ["grammars"]
//!
//! [highlight.aliases]
//! csharp = "C#"
//!
//! [[navigation.sections]]
//! title = "Getting Started"
//! links = [{ title = "Routing", href = "/home/routing" }]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tt_nav::{Navigation, Section};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tt.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Highlighting configuration (paths are relative strings from TOML).
    highlight: HighlightConfigRaw,
    /// Replacement sidebar table (optional section).
    pub navigation: Option<NavigationConfig>,

    /// Resolved highlighting configuration (set after loading).
    #[serde(skip)]
    pub highlight_resolved: HighlightConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw highlighting configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HighlightConfigRaw {
    grammar_dirs: Vec<String>,
    aliases: BTreeMap<String, String>,
}

/// Resolved highlighting configuration with absolute paths.
#[derive(Debug, Default)]
pub struct HighlightConfig {
    /// Directories scanned for `*.sublime-syntax` grammar files.
    pub grammar_dirs: Vec<PathBuf>,
    /// Fence language tag to grammar name or token.
    pub aliases: BTreeMap<String, String>,
}

/// Sidebar configuration.
#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tt.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Navigation to serve: the configured table, or the built-in one.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        match &self.navigation {
            Some(nav) => Navigation::new(nav.sections.clone()),
            None => Navigation::builtin().clone(),
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Link hrefs are opaque and never checked.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_highlight()?;
        self.validate_navigation()?;
        Ok(())
    }

    fn validate_highlight(&self) -> Result<(), ConfigError> {
        for (tag, target) in &self.highlight.aliases {
            require_non_empty(tag, "highlight.aliases key")?;
            require_non_empty(target, &format!("highlight.aliases.{tag}"))?;
        }
        Ok(())
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let Some(nav) = &self.navigation else {
            return Ok(());
        };
        for (i, section) in nav.sections.iter().enumerate() {
            require_non_empty(&section.title, &format!("navigation.sections[{i}].title"))?;
            for (j, link) in section.links.iter().enumerate() {
                require_non_empty(
                    &link.title,
                    &format!("navigation.sections[{i}].links[{j}].title"),
                )?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.highlight_resolved = HighlightConfig {
            grammar_dirs: self
                .highlight
                .grammar_dirs
                .iter()
                .map(|dir| config_dir.join(dir))
                .collect(),
            aliases: self.highlight.aliases.clone(),
        };
    }
}
