//! Grammar files on disk.

use std::path::Path;

use tt_highlight::Grammar;

use crate::SiteError;

/// Extension of sublime-syntax grammar files.
const GRAMMAR_EXTENSION: &str = "sublime-syntax";

/// Read and parse every grammar file in `dir`, sorted by file name.
///
/// Grammars are named by their `name:` key. The file stem is only used for
/// definitions without one.
pub(crate) fn load_dir(dir: &Path) -> Result<Vec<Grammar>, SiteError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == GRAMMAR_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut grammars = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = std::fs::read_to_string(&path)?;
        let grammar = Grammar::from_source(source, &stem)?;
        tracing::debug!(path = %path.display(), grammar = grammar.name(), "Loaded grammar file");
        grammars.push(grammar);
    }
    Ok(grammars)
}
