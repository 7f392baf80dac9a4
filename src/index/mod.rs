//! In-memory search indexes built from reference sites.
//!
//! A [`SiteSet`] is loaded into one [`SiteIndexes`] value holding a
//! [`MemberIndex`] and a [`PackageIndex`] per site, in configured order.
//! The [`IndexStore`] builds each distinct site set once and shares the result.

pub mod entry;
pub mod loader;
pub mod site;
pub mod store;

pub use entry::{MemberEntry, MemberIndex, PackageEntry, PackageIndex};
pub use site::{ReferenceSite, SiteSet};
pub use store::IndexStore;

/// Search tables of a single reference site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteIndex {
    /// The site the tables were loaded from.
    pub site: ReferenceSite,
    /// Members grouped by class simple name.
    pub members: MemberIndex,
    /// Packages keyed by name.
    pub packages: PackageIndex,
}

/// Search tables for every site of a [`SiteSet`], in configured order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteIndexes {
    sites: Vec<SiteIndex>,
}

impl SiteIndexes {
    /// Wraps per-site tables; their order is the resolution priority.
    #[must_use]
    pub fn new(sites: Vec<SiteIndex>) -> Self {
        Self { sites }
    }

    /// Per-site tables in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &SiteIndex> {
        self.sites.iter()
    }

    /// Member index of `site`, if it is part of this set.
    #[must_use]
    pub fn members_for(&self, site: &ReferenceSite) -> Option<&MemberIndex> {
        self.sites.iter().find(|s| &s.site == site).map(|s| &s.members)
    }

    /// Package index of `site`, if it is part of this set.
    #[must_use]
    pub fn packages_for(&self, site: &ReferenceSite) -> Option<&PackageIndex> {
        self.sites.iter().find(|s| &s.site == site).map(|s| &s.packages)
    }

    /// Total number of member entries across all sites.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.sites.iter().map(|s| s.members.member_count()).sum()
    }

    /// Total number of packages across all sites.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.sites.iter().map(|s| s.packages.len()).sum()
    }
}
