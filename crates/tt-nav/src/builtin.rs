//! The site's sidebar table.

use crate::{Link, Navigation, Section};

type Table = &'static [(&'static str, &'static [(&'static str, &'static str)])];

const SECTIONS: Table = &[
    (
        "Getting Started",
        &[
            ("The Basic Tailwind API", "/home/"),
            ("Using Swagger", "/home/swagger"),
            ("Routing", "/home/routing"),
            ("Working With Data", "/home/data/"),
            ("Testing", "/home/testing/"),
            ("Using Vue", "/docs/starters/vue"),
            ("Using Svelte", "/docs/starters/svelte"),
        ],
    ),
    (
        "Building On Top of Tailwind",
        &[
            ("Using Our Building Blocks", "/docs/starters"),
            ("The Job Engine", "/blocks/jobs"),
            ("Simple Content Management", "/docs/starters"),
            ("Email Service", "/docs/starters/vue"),
            ("Jobs and Queues", "/docs/"),
            ("eCommerce", "/docs/"),
            ("Digital Fulfillment", "/docs/"),
            ("Blog", "/docs/"),
        ],
    ),
    (
        // Trailing space is part of the published title.
        "Resources and Reference ",
        &[
            ("What Is This?", "/about"),
            ("GitHub", "https://github.com/tailwind-traders-dev"),
            (
                "Discussions",
                "https://github.com/orgs/tailwind-traders-dev/discussions",
            ),
            (
                "Projects",
                "https://github.com/orgs/tailwind-traders-dev/projects",
            ),
        ],
    ),
];

pub(crate) fn navigation() -> Navigation {
    SECTIONS
        .iter()
        .map(|(title, links)| Section {
            title: (*title).to_owned(),
            links: links
                .iter()
                .map(|(title, href)| Link::new(title, href))
                .collect(),
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use crate::Navigation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_section_titles() {
        let titles: Vec<_> = Navigation::builtin()
            .sections()
            .iter()
            .map(|section| section.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec![
                "Getting Started",
                "Building On Top of Tailwind",
                "Resources and Reference ",
            ]
        );
    }

    #[test]
    fn test_builtin_link_counts() {
        let counts: Vec<_> = Navigation::builtin()
            .sections()
            .iter()
            .map(|section| section.links.len())
            .collect();

        assert_eq!(counts, vec![7, 8, 4]);
    }

    #[test]
    fn test_builtin_keeps_external_urls_verbatim() {
        let github = Navigation::builtin()
            .links()
            .find(|link| link.title == "GitHub")
            .unwrap();

        assert_eq!(github.href, "https://github.com/tailwind-traders-dev");
    }

    #[test]
    fn test_builtin_duplicate_hrefs_resolve_to_first() {
        let nav = Navigation::builtin();

        // "/docs/starters/vue" appears in two sections.
        assert_eq!(
            nav.section_for("/docs/starters/vue").unwrap().title,
            "Getting Started"
        );
        assert_eq!(nav.adjacent("/docs/").previous.unwrap().title, "Email Service");
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(Navigation::builtin(), Navigation::builtin()));
    }
}
