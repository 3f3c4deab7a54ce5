use std::cmp::Ordering;
use std::collections::btree_set;
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::atom::EBUILD_EXTENSION;
use crate::error::Result;
use crate::version::VersionString;

/// Set member: ordered by version, ties broken by the raw text.
#[derive(Debug, Clone)]
struct Entry(VersionString);

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then_with(|| self.0.as_str().cmp(other.0.as_str()))
    }
}

/// Ordered set of distinct version strings
///
/// Members are keyed by their raw text and iterated from the lowest to the
/// highest version. Two spellings of the same version (`1.0` and `1.00`)
/// are both kept, next to each other.
///
/// ```
/// use portage_version::{VersionSet, VersionString};
///
/// let set: VersionSet = ["1.0", "1.0.1", "1.0_pre", "0.9", "1.0-r1"]
///     .into_iter()
///     .map(|raw| VersionString::parse(raw).unwrap())
///     .collect();
/// let sorted: Vec<&str> = set.iter().map(VersionString::as_str).collect();
/// assert_eq!(sorted, ["0.9", "1.0_pre", "1.0", "1.0-r1", "1.0.1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionSet {
    entries: BTreeSet<Entry>,
}

impl VersionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the versions of `package` from a package directory listing
    ///
    /// Entries that are not ebuilds, or are not named after `package`, are
    /// skipped; so are ebuilds of packages whose name merely starts with
    /// `<package>-` (`foo-bar-1.0.ebuild` when scanning `foo`). An ebuild
    /// whose version does not parse fails the whole scan.
    pub fn from_filenames<I, S>(package: &str, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = VersionSet::new();

        for name in names {
            let name = name.as_ref();
            let Some(stem) = name.strip_suffix(EBUILD_EXTENSION) else {
                trace!(entry = name, "skipping non-ebuild entry");
                continue;
            };
            // versions always start with a digit
            let Some(version) = stem
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('-'))
                .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            else {
                trace!(entry = name, package, "skipping ebuild of another package");
                continue;
            };

            let version = VersionString::parse(version)?;
            debug!(package, version = %version, "found ebuild");
            set.insert(version);
        }

        Ok(set)
    }

    /// Insert a version, returning `false` if its raw text was already present
    pub fn insert(&mut self, version: VersionString) -> bool {
        self.entries.insert(Entry(version))
    }

    /// Whether `raw` is a member, by exact text
    pub fn contains(&self, raw: &str) -> bool {
        VersionString::parse(raw).is_ok_and(|version| self.entries.contains(&Entry(version)))
    }

    /// Lowest version
    pub fn first(&self) -> Option<&VersionString> {
        self.entries.first().map(|entry| &entry.0)
    }

    /// Highest version
    pub fn latest(&self) -> Option<&VersionString> {
        self.entries.last().map(|entry| &entry.0)
    }

    /// Iterate in ascending version order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Ascending iterator over a [`VersionSet`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_set::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a VersionString;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.0)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a VersionString;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<VersionString> for VersionSet {
    fn extend<T: IntoIterator<Item = VersionString>>(&mut self, iter: T) {
        self.entries.extend(iter.into_iter().map(Entry));
    }
}

impl FromIterator<VersionString> for VersionSet {
    fn from_iter<T: IntoIterator<Item = VersionString>>(iter: T) -> Self {
        let mut set = VersionSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn v(s: &str) -> VersionString {
        VersionString::parse(s).unwrap()
    }

    fn raws(set: &VersionSet) -> Vec<&str> {
        set.iter().map(VersionString::as_str).collect()
    }

    #[test]
    fn test_ascending_iteration() {
        let mut set = VersionSet::new();
        for raw in ["1.0", "1.0.1", "1.0_pre", "0.9", "1.0-r1"] {
            assert!(set.insert(v(raw)));
        }
        assert_eq!(raws(&set), ["0.9", "1.0_pre", "1.0", "1.0-r1", "1.0.1"]);
        // iteration can be restarted
        assert_eq!(set.iter().count(), 5);
        assert_eq!(set.iter().rev().next().map(VersionString::as_str), Some("1.0.1"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = VersionSet::new();
        assert!(set.insert(v("2.1")));
        assert!(!set.insert(v("2.1")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equal_spellings_are_distinct_members() {
        let set: VersionSet = ["1.00", "1.0", "1.0-r0"].into_iter().map(v).collect();
        assert_eq!(set.len(), 3);
        assert_eq!(raws(&set), ["1.0", "1.0-r0", "1.00"]);
        assert!(set.contains("1.00"));
        assert!(!set.contains("1.000"));
        assert!(!set.contains("not a version"));
    }

    #[test]
    fn test_first_latest_and_clear() {
        let mut set: VersionSet = ["3.0_rc1", "2.9", "3.0"].into_iter().map(v).collect();
        assert_eq!(set.first().map(VersionString::as_str), Some("2.9"));
        assert_eq!(set.latest().map(VersionString::as_str), Some("3.0"));

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.latest(), None);
    }

    #[test]
    fn test_from_filenames() {
        let listing = [
            "Manifest",
            "metadata.xml",
            "files",
            "vim-core-9.0.1-r2.ebuild",
            "vim-core-9.0.1.ebuild",
            "vim-core-9.1.0_p20240101.ebuild",
            "gvim-9.0.1.ebuild",
        ];
        let set = VersionSet::from_filenames("vim-core", listing).unwrap();
        assert_eq!(raws(&set), ["9.0.1", "9.0.1-r2", "9.1.0_p20240101"]);
    }

    #[test]
    fn test_from_filenames_skips_longer_package_names() {
        let set =
            VersionSet::from_filenames("foo", ["foo-bar-1.0.ebuild", "foo-1.0.ebuild"]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(raws(&set), ["1.0"]);

        let listing = ["vim-9.0.ebuild", "vim-core-9.0.ebuild", "vim-core-9.1-r1.ebuild"];
        let set = VersionSet::from_filenames("vim", listing).unwrap();
        assert_eq!(raws(&set), ["9.0"]);
    }

    #[test]
    fn test_from_filenames_rejects_bad_ebuild() {
        let result = VersionSet::from_filenames("foo", ["foo-1.0.ebuild", "foo-1.0_latest.ebuild"]);
        assert!(matches!(result, Err(Error::MalformedVersion(_))));
    }

    #[test]
    fn test_borrowed_into_iter() {
        let set: VersionSet = ["1", "2"].into_iter().map(v).collect();
        let mut seen = Vec::new();
        for version in &set {
            seen.push(version.as_str());
        }
        assert_eq!(seen, ["1", "2"]);
    }
}
