//! Parsing of compact cross-reference tokens found in link targets.
//!
//! A token is an optional dotted package path, a class simple name, and an
//! optional `#member(parameters)` suffix:
//!
//! ```text
//! com.example.Widget#build(int)
//! └────┬────┘ └─┬──┘ └───┬────┘
//!   package   class   member
//! ```

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([\w.]*)\.)?(\w+)(?:#(\w+\(.*\)))?$").expect("token pattern is valid")
});

/// The parts of a cross-reference token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Package filter; `None` matches any package.
    pub package: Option<String>,
    /// Class simple name.
    pub class: String,
    /// Member label including its parameter list, e.g. `build(int)`.
    pub member: Option<String>,
}

/// Outcome of inspecting a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHref {
    /// The href is a cross-reference token.
    Reference(Reference),
    /// The href is something else and must be left alone.
    Unmatched,
}

/// Parses `href` as a cross-reference token.
#[must_use]
pub fn parse(href: &str) -> ParsedHref {
    let Some(caps) = TOKEN_RE.captures(href) else {
        return ParsedHref::Unmatched;
    };

    let package = caps.get(1).map(|m| m.as_str()).filter(|p| !p.is_empty());
    ParsedHref::Reference(Reference {
        package: package.map(str::to_string),
        class: caps[2].to_string(),
        member: caps.get(3).map(|m| m.as_str().to_string()),
    })
}
