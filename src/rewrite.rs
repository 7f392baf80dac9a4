//! Rewriting of anchor targets supplied by the documentation host.

use tracing::debug;

use crate::resolve::Resolver;
use crate::token::{self, ParsedHref};

/// Written into an href when a reference token cannot be resolved.
pub const INVALID_HREF: &str = "Invalid";

/// File extensions of ordinary page links such as `index.html`.
///
/// Compared case-sensitively, so a capitalized class name like `pkg.Json`
/// is still treated as a reference.
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "css", "gif", "htm", "html", "jpeg", "jpg", "js", "json", "md", "pdf", "png", "svg", "txt",
    "xml", "yaml", "yml", "zip",
];

/// Returns `true` if `href` names a file by extension rather than a class.
fn is_document_link(href: &str) -> bool {
    let path = href.split(['#', '?']).next().unwrap_or(href);
    path.rsplit_once('.').is_some_and(|(_, ext)| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// A link element whose target can be read and replaced.
pub trait Anchor {
    /// Current target, or `None` if the element has no `href`.
    fn href(&self) -> Option<&str>;

    /// Replaces the target.
    fn set_href(&mut self, href: String);
}

/// Counts from one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Tokens replaced by a documentation URL.
    pub resolved: usize,
    /// Tokens replaced by [`INVALID_HREF`].
    pub invalid: usize,
    /// Anchors left as they were (ordinary links, or no href).
    pub untouched: usize,
}

impl RewriteStats {
    /// Adds the counts of another pass.
    pub fn merge(&mut self, other: Self) {
        self.resolved += other.resolved;
        self.invalid += other.invalid;
        self.untouched += other.untouched;
    }
}

/// Replaces reference tokens in anchor targets with documentation URLs.
///
/// Never fails: an unresolvable token becomes the literal href `Invalid`, so a
/// broken reference shows up in the rendered output instead of stopping the build.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    resolver: Resolver,
}

impl LinkRewriter {
    /// Creates a rewriter backed by `resolver`.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// What `href` becomes, or `None` if it is not a reference token.
    ///
    /// Links to files with a document extension (`index.html`, `notes.md`)
    /// fit the token shape but are left alone.
    #[must_use]
    pub fn rewrite_href(&self, href: &str) -> Option<String> {
        if is_document_link(href) {
            return None;
        }
        match token::parse(href) {
            ParsedHref::Unmatched => None,
            ParsedHref::Reference(reference) => {
                Some(self.resolver.resolve_reference(&reference).unwrap_or_else(|| {
                    debug!(href, "unresolved reference");
                    INVALID_HREF.to_string()
                }))
            }
        }
    }

    /// Rewrites every anchor in place.
    pub fn rewrite<'a, A, I>(&self, anchors: I) -> RewriteStats
    where
        A: Anchor + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        let mut stats = RewriteStats::default();
        for anchor in anchors {
            let Some(new_href) = anchor.href().and_then(|href| self.rewrite_href(href)) else {
                stats.untouched += 1;
                continue;
            };
            if new_href == INVALID_HREF {
                stats.invalid += 1;
            } else {
                stats.resolved += 1;
            }
            anchor.set_href(new_href);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::html::HtmlDocument;
    use crate::index::{
        MemberEntry, MemberIndex, PackageIndex, ReferenceSite, SiteIndex, SiteIndexes,
    };

    #[derive(Debug)]
    struct Link {
        href: Option<String>,
    }

    impl Anchor for Link {
        fn href(&self) -> Option<&str> {
            self.href.as_deref()
        }

        fn set_href(&mut self, href: String) {
            self.href = Some(href);
        }
    }

    fn link(href: &str) -> Link {
        Link { href: Some(href.to_string()) }
    }

    fn rewriter() -> LinkRewriter {
        let site = SiteIndex {
            site: ReferenceSite::new("https://docs.example.com/").unwrap(),
            members: MemberIndex::from_entries([MemberEntry {
                class: "Widget".into(),
                package: "com.example".into(),
                label: "build".into(),
                fragment: Some("build(int)".into()),
                extra: serde_json::Map::new(),
            }]),
            packages: PackageIndex::default(),
        };
        LinkRewriter::new(Resolver::new(Arc::new(SiteIndexes::new(vec![site]))))
    }

    #[test]
    fn rewrites_tokens_and_leaves_other_links() {
        let mut links = vec![
            link("com.example.Widget#build(int)"),
            link("https://example.org/"),
            link("Gizmo"),
            Link { href: None },
        ];

        let stats = rewriter().rewrite(links.iter_mut());

        assert_eq!(
            links[0].href.as_deref(),
            Some("https://docs.example.com/com/example/Widget.html#build(int)")
        );
        assert_eq!(links[1].href.as_deref(), Some("https://example.org/"));
        assert_eq!(links[2].href.as_deref(), Some(INVALID_HREF));
        assert_eq!(links[3].href, None);
        assert_eq!(stats, RewriteStats { resolved: 1, invalid: 1, untouched: 2 });
    }

    #[test]
    fn unknown_member_becomes_invalid_not_an_error() {
        assert_eq!(
            rewriter().rewrite_href("com.example.Widget#missing()").as_deref(),
            Some(INVALID_HREF)
        );
        assert_eq!(
            rewriter().rewrite_href("org.other.Widget").as_deref(),
            Some(INVALID_HREF)
        );
    }

    #[test]
    fn ordinary_href_is_not_rewritten() {
        assert_eq!(rewriter().rewrite_href("../index.html#top"), None);
    }

    #[test]
    fn relative_document_links_are_left_alone() {
        for href in ["index.html", "changelog.md", "guide.htm", "style.css", "data.json?v=2"] {
            assert_eq!(rewriter().rewrite_href(href), None, "{href} should be untouched");
        }
        // Capitalized last segments are class names.
        assert_eq!(rewriter().rewrite_href("com.example.Json").as_deref(), Some(INVALID_HREF));
    }

    #[test]
    fn rendered_page_keeps_document_links() {
        let mut page = HtmlDocument::parse(
            r#"<a href="index.html">Home</a> <a href="changelog.md">c</a> <a href="Widget">w</a>"#,
        );
        let stats = rewriter().rewrite(page.anchors_mut());

        assert_eq!(stats, RewriteStats { resolved: 1, invalid: 0, untouched: 2 });
        assert_eq!(
            page.render(),
            r#"<a href="index.html">Home</a> <a href="changelog.md">c</a> <a href="https://docs.example.com/com/example/Widget.html">w</a>"#
        );
    }

    #[test]
    fn works_with_trait_objects() {
        let mut first = link("Widget");
        let mut second = link("#local");
        let mut anchors: Vec<&mut dyn Anchor> = vec![&mut first, &mut second];

        let stats = rewriter().rewrite(anchors.iter_mut().map(|a| &mut **a));
        assert_eq!(stats.resolved, 1);
        assert_eq!(first.href.as_deref(), Some("https://docs.example.com/com/example/Widget.html"));
    }

    #[test]
    fn stats_merge() {
        let mut total = RewriteStats { resolved: 1, invalid: 0, untouched: 2 };
        total.merge(RewriteStats { resolved: 2, invalid: 1, untouched: 0 });
        assert_eq!(total, RewriteStats { resolved: 3, invalid: 1, untouched: 2 });
    }
}
