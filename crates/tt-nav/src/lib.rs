//! Sidebar navigation for the docs site.
//!
//! Navigation is plain data: an ordered list of [`Section`]s, each holding an
//! ordered list of [`Link`]s. Order drives sidebar display order. Titles and
//! hrefs are stored verbatim; hrefs may be internal routes or absolute URLs and
//! are never validated or followed.
//!
//! The site's canonical table is [`Navigation::builtin`]. A replacement table
//! can be deserialized from configuration.
//!
//! # Example
//!
//! ```
//! use tt_nav::{Link, Navigation, Section};
//!
//! let nav = Navigation::new(vec![Section {
//!     title: "Introduction".to_owned(),
//!     links: vec![Link::new("Installation", "/docs/installation")],
//! }]);
//!
//! assert_eq!(nav.len(), 1);
//! assert_eq!(nav.sections()[0].links[0].href, "/docs/installation");
//! ```

mod builtin;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A single sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label.
    pub title: String,
    /// Navigation target. Opaque: internal route or external URL.
    pub href: String,
}

impl Link {
    /// Create a link from borrowed strings.
    #[must_use]
    pub fn new(title: &str, href: &str) -> Self {
        Self {
            title: title.to_owned(),
            href: href.to_owned(),
        }
    }
}

/// A titled group of links shown together in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display label.
    pub title: String,
    /// Links in display order.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Links surrounding the current page in flattened sidebar order.
///
/// Used for the "previous" / "next" footer on doc pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjacent<'a> {
    /// Link displayed before the current one.
    pub previous: Option<&'a Link>,
    /// Link displayed after the current one.
    pub next: Option<&'a Link>,
}

/// Ordered, read-only collection of sidebar sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Navigation {
    sections: Vec<Section>,
}

static BUILTIN: LazyLock<Navigation> = LazyLock::new(builtin::navigation);

impl Navigation {
    /// Wrap sections as-is. Duplicate titles or hrefs are accepted.
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The site's canonical navigation table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Every link across all sections, in display order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.sections.iter().flat_map(|section| section.links.iter())
    }

    /// First section containing a link to `path`.
    ///
    /// Comparison is an exact string match on `href`.
    #[must_use]
    pub fn section_for(&self, path: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.links.iter().any(|link| link.href == path))
    }

    /// Links before and after the first link to `path`.
    ///
    /// Returns an empty [`Adjacent`] when no link points at `path`.
    #[must_use]
    pub fn adjacent(&self, path: &str) -> Adjacent<'_> {
        let links: Vec<&Link> = self.links().collect();
        let Some(index) = links.iter().position(|link| link.href == path) else {
            return Adjacent::default();
        };

        Adjacent {
            previous: index.checked_sub(1).map(|i| links[i]),
            next: links.get(index + 1).copied(),
        }
    }
}

impl From<Vec<Section>> for Navigation {
    fn from(sections: Vec<Section>) -> Self {
        Self::new(sections)
    }
}
