//! Typed search-index tables for a single reference site.

use std::collections::HashMap;

use serde::Deserialize;

/// One documented member (method, field or constructor) from `member-search-index.js`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberEntry {
    /// Simple name of the owning class.
    #[serde(rename = "c")]
    pub class: String,
    /// Fully-qualified name of the owning package.
    #[serde(rename = "p")]
    pub package: String,
    /// Display label, e.g. `build(int)`.
    #[serde(rename = "l")]
    pub label: String,
    /// Distinct URL fragment, present when the label alone would collide.
    #[serde(rename = "u", default)]
    pub fragment: Option<String>,
    /// Remaining keys such as the module or a comment snippet; unused by resolution.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MemberEntry {
    /// Returns `true` if `token` names this member, by label or by distinct fragment.
    #[must_use]
    pub fn matches_member(&self, token: &str) -> bool {
        self.label == token || self.fragment.as_deref() == Some(token)
    }

    /// Fragment used when linking to this member.
    #[must_use]
    pub fn anchor(&self) -> &str {
        self.fragment.as_deref().unwrap_or(&self.label)
    }
}

/// One documented package from `package-search-index.js`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageEntry {
    /// Package (or module plus package) label.
    #[serde(rename = "l")]
    pub label: String,
    /// Owning module, for sites generated from modular sources.
    #[serde(rename = "m", default)]
    pub module: Option<String>,
}

/// Members of one site grouped by class simple name, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberIndex {
    by_class: HashMap<String, Vec<MemberEntry>>,
}

impl MemberIndex {
    /// Groups entries by class simple name, preserving source order within each class.
    pub fn from_entries(entries: impl IntoIterator<Item = MemberEntry>) -> Self {
        let mut by_class: HashMap<String, Vec<MemberEntry>> = HashMap::new();
        for entry in entries {
            by_class.entry(entry.class.clone()).or_default().push(entry);
        }
        Self { by_class }
    }

    /// Members of `class`, or `None` if the site does not document it.
    #[must_use]
    pub fn class(&self, class: &str) -> Option<&[MemberEntry]> {
        self.by_class.get(class).map(Vec::as_slice)
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.by_class.len()
    }

    /// Total number of member entries.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.by_class.values().map(Vec::len).sum()
    }
}

/// Packages of one site keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
    by_label: HashMap<String, PackageEntry>,
}

impl PackageIndex {
    /// Keys entries by label; a later entry with the same label replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = PackageEntry>) -> Self {
        let by_label = entries.into_iter().map(|e| (e.label.clone(), e)).collect();
        Self { by_label }
    }

    /// Entry for `package`, if documented.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&PackageEntry> {
        self.by_label.get(package)
    }

    /// Module declared for `package`, if any.
    #[must_use]
    pub fn module_of(&self, package: &str) -> Option<&str> {
        self.get(package).filter(|e| e.label == package).and_then(|e| e.module.as_deref())
    }

    /// Number of packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Returns `true` if no package is documented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
