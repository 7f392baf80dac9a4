//! Anchor access for rendered HTML pages.
//!
//! Only the `href` values of `<a>` tags are touched; every other byte of the
//! page is rendered back unchanged.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::rewrite::Anchor;

static ANCHOR_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("anchor pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(amp|lt|gt|quot|apos));")
        .expect("entity pattern is valid")
});

/// The `href` of one `<a>` tag in an [`HtmlDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAnchor {
    /// Byte range of the attribute value inside the source, without quotes.
    span: Range<usize>,
    /// Entity-decoded value.
    href: String,
    changed: bool,
}

impl HtmlAnchor {
    /// Returns `true` once [`Anchor::set_href`] has replaced the value.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

impl Anchor for HtmlAnchor {
    fn href(&self) -> Option<&str> {
        Some(&self.href)
    }

    fn set_href(&mut self, href: String) {
        self.href = href;
        self.changed = true;
    }
}

/// An HTML page with its anchors exposed for rewriting.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    anchors: Vec<HtmlAnchor>,
}

impl HtmlDocument {
    /// Scans `source` for `<a href=…>` tags.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let anchors = ANCHOR_HREF_RE
            .captures_iter(&source)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|value| HtmlAnchor {
                span: value.range(),
                href: decode_entities(value.as_str()),
                changed: false,
            })
            .collect();
        Self { source, anchors }
    }

    /// Anchors in document order.
    #[must_use]
    pub fn anchors(&self) -> &[HtmlAnchor] {
        &self.anchors
    }

    /// Anchors in document order, for rewriting.
    pub fn anchors_mut(&mut self) -> impl Iterator<Item = &mut HtmlAnchor> {
        self.anchors.iter_mut()
    }

    /// The page with every changed href written back, attribute-escaped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for anchor in self.anchors.iter().filter(|a| a.changed) {
            out.push_str(&self.source[cursor..anchor.span.start]);
            out.push_str(&escape_attribute(&anchor.href));
            cursor = anchor.span.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Decodes the markup-significant named entities and all numeric references.
///
/// Unknown names and invalid code points are kept as written.
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    ENTITY_RE
        .replace_all(value, |caps: &Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match &caps[3] {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_double_and_single_quoted_hrefs() {
        let doc = HtmlDocument::parse(
            r#"<p><a href="Widget">W</a> and <A class='x' HREF='pkg.Gadget#run()'>G</A></p>"#,
        );
        let hrefs: Vec<&str> = doc.anchors().iter().filter_map(Anchor::href).collect();
        assert_eq!(hrefs, vec!["Widget", "pkg.Gadget#run()"]);
    }

    #[test]
    fn ignores_other_tags_and_lookalike_attributes() {
        let doc = HtmlDocument::parse(
            r#"<link href="style.css"><a data-href="Nope" name="x">x</a><abbr href="Nope">"#,
        );
        assert!(doc.anchors().is_empty());
    }

    #[test]
    fn render_without_changes_is_identical() {
        let source = "<a href=\"Widget\">W</a>\n<a  href = 'x'>x</a>";
        let doc = HtmlDocument::parse(source);
        assert_eq!(doc.render(), source);
    }

    #[test]
    fn render_replaces_only_changed_values() {
        let mut doc = HtmlDocument::parse(
            r#"<a href="Widget">W</a> <a href="https://example.org">e</a> <a href='Gizmo'>g</a>"#,
        );
        {
            let mut anchors = doc.anchors_mut();
            anchors.next().unwrap().set_href("https://docs.example.com/p/Widget.html".into());
            anchors.next();
            anchors.next().unwrap().set_href("Invalid".into());
        }
        assert_eq!(
            doc.render(),
            r#"<a href="https://docs.example.com/p/Widget.html">W</a> <a href="https://example.org">e</a> <a href='Invalid'>g</a>"#
        );
        assert!(doc.anchors()[0].is_changed());
        assert!(!doc.anchors()[1].is_changed());
    }

    #[test]
    fn numeric_references_are_decoded() {
        let doc = HtmlDocument::parse(
            r#"<a href="Widget&#35;build&#x28;int&#X29;">b</a><a href='it&#x27;s &amp;amp; &#xD800; &nbsp;'>x</a>"#,
        );
        assert_eq!(doc.anchors()[0].href(), Some("Widget#build(int)"));
        assert_eq!(doc.anchors()[1].href(), Some("it's &amp; &#xD800; &nbsp;"));
    }

    #[test]
    fn encoded_token_resolves_after_decoding() {
        let doc = HtmlDocument::parse(r#"<a href="com.example.Widget&#35;size&#40;&#41;">s</a>"#);
        let href = doc.anchors()[0].href().unwrap();
        assert!(matches!(crate::token::parse(href), crate::token::ParsedHref::Reference(_)));
    }

    #[test]
    fn entities_are_decoded_and_reescaped() {
        let mut doc = HtmlDocument::parse(r#"<a href="Map#of(List&lt;K&gt;)">m</a>"#);
        assert_eq!(doc.anchors()[0].href(), Some("Map#of(List<K>)"));

        doc.anchors_mut().next().unwrap().set_href("https://d.example/Map.html#of(List<K>)".into());
        assert_eq!(doc.render(), r#"<a href="https://d.example/Map.html#of(List&lt;K&gt;)">m</a>"#);
    }
}
