//! Resolution of parsed references against site indexes.

use std::sync::Arc;

use crate::index::{MemberEntry, SiteIndex, SiteIndexes};
use crate::token::Reference;

/// Resolves references to documentation page URLs.
///
/// Sites are searched in configured order and the first matching member wins,
/// so a project's own API shadows libraries configured after it.
#[derive(Debug, Clone)]
pub struct Resolver {
    indexes: Arc<SiteIndexes>,
}

impl Resolver {
    /// Creates a resolver over already-built indexes.
    #[must_use]
    pub fn new(indexes: Arc<SiteIndexes>) -> Self {
        Self { indexes }
    }

    /// Resolves a parsed [`Reference`].
    #[must_use]
    pub fn resolve_reference(&self, reference: &Reference) -> Option<String> {
        self.resolve(reference.package.as_deref(), &reference.class, reference.member.as_deref())
    }

    /// Page URL for `class` (and `member`, if given), or `None` if no site documents it.
    ///
    /// `package` and `member` are exact-match filters; `None` matches anything.
    #[must_use]
    pub fn resolve(
        &self,
        package: Option<&str>,
        class: &str,
        member: Option<&str>,
    ) -> Option<String> {
        self.indexes.iter().find_map(|site| {
            let entry = site.members.class(class)?.iter().find(|entry| {
                package.is_none_or(|p| entry.package == p)
                    && member.is_none_or(|m| entry.matches_member(m))
                    && entry.class == class
            })?;
            Some(page_url(site, entry, member.is_some()))
        })
    }
}

/// Builds `<base>[<module>/]<package/path>/<Class>.html[#<fragment>]`.
fn page_url(site: &SiteIndex, entry: &MemberEntry, with_member: bool) -> String {
    let mut url = site.site.page_base();
    if let Some(module) = site.packages.module_of(&entry.package) {
        url.push_str(module);
        url.push('/');
    }
    url.push_str(&entry.package.replace('.', "/"));
    url.push('/');
    url.push_str(&entry.class);
    url.push_str(".html");
    if with_member {
        url.push('#');
        url.push_str(entry.anchor());
    }
    url
}
