use std::fmt;
use std::path::Path;
use std::str::FromStr;

use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{Error, Result};
use crate::version::VersionString;

/// Extension of ebuild files in a package directory.
pub const EBUILD_EXTENSION: &str = ".ebuild";

/// Package-file extensions stripped from an atom before it is split.
pub const PACKAGE_EXTENSIONS: &[&str] = &[EBUILD_EXTENSION, ".gpkg.tar", ".tbz2", ".xpak"];

/// A package atom split into its parts
///
/// Represents `category/name-version[-rN]` strings and ebuild filenames
/// like `name-version[-rN].ebuild`. The category is optional.
///
/// The package name is told apart from the version by counting
/// `-`-separated tokens: with at most three tokens the first one is the
/// name, otherwise every token but the last two belongs to the name.
///
/// ```
/// use portage_version::Atom;
///
/// let atom = Atom::parse("app-editors/vim-core-7.4-r1").unwrap();
/// assert_eq!(atom.category(), Some("app-editors"));
/// assert_eq!(atom.name(), "vim-core");
/// assert_eq!(atom.version(), "7.4");
/// assert_eq!(atom.revision(), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    category: Option<String>,
    name: String,
    version: String,
    revision: Option<String>,
    version_string: VersionString,
}

impl Atom {
    /// Parse an atom string or ebuild basename
    pub fn parse(input: &str) -> Result<Self> {
        let (category, remainder) = split_category(input)?;
        let (name, version, revision) = split_name(remainder)?;

        let version_string = match revision {
            Some(revision) => VersionString::parse(&format!("{}-r{}", version, revision))?,
            None => VersionString::parse(version)?,
        };

        Ok(Atom {
            category: category.map(str::to_string),
            name,
            version: version.to_string(),
            revision: revision.map(str::to_string),
            version_string,
        })
    }

    /// Parse a package file path laid out as `<category>/<PN>/<PF>.ebuild`
    ///
    /// The grandparent directory, when there is one, supplies the category.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::MalformedAtom(format!("`{}`: no file name", path.display()))
            })?;

        let category = path
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());

        match category {
            Some(category) => Self::parse(&format!("{}/{}", category, file_name)),
            None => Self::parse(file_name),
        }
    }

    /// Get the category
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Package name, hyphens included
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version token without the revision
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Revision digits (the `1` of `-r1`), if the atom carried one
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Comparable version, revision included
    pub fn version_string(&self) -> &VersionString {
        &self.version_string
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(category) = &self.category {
            write!(f, "{}/", category)?;
        }
        write!(f, "{}-{}", self.name, self.version)?;
        if let Some(revision) = &self.revision {
            write!(f, "-r{}", revision)?;
        }
        Ok(())
    }
}

impl FromStr for Atom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split an atom into its optional category and the remainder
///
/// The category is everything before the first `/`. A package-file
/// extension from [`PACKAGE_EXTENSIONS`] is stripped from the remainder.
///
/// ```
/// use portage_version::split_category;
///
/// assert_eq!(
///     split_category("dev-lang/rust-1.75.0.ebuild").unwrap(),
///     (Some("dev-lang"), "rust-1.75.0")
/// );
/// assert_eq!(split_category("rust-1.75.0").unwrap(), (None, "rust-1.75.0"));
/// ```
pub fn split_category(input: &str) -> Result<(Option<&str>, &str)> {
    let malformed = |reason: &str| Error::MalformedAtom(format!("`{}`: {}", input, reason));

    let (category, remainder) = match input.split_once('/') {
        Some((category, remainder)) => {
            if parse_category().parse(category).is_err() {
                return Err(malformed("invalid category"));
            }
            (Some(category), remainder)
        }
        None => (None, input),
    };

    if remainder.contains('/') {
        return Err(malformed("more than one `/`"));
    }

    let remainder = strip_extension(remainder);
    if remainder.is_empty() {
        return Err(malformed("missing package name"));
    }

    Ok((category, remainder))
}

/// Strip a trailing package-file extension, if any
pub fn strip_extension(name: &str) -> &str {
    PACKAGE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

/// Split `name-version[-rN]` into name, version token and revision digits
///
/// With three tokens or fewer the first token is the name. With more, all
/// tokens but the last two are the name and the last two are the version
/// and the revision.
pub fn split_name(remainder: &str) -> Result<(String, &str, Option<&str>)> {
    let malformed = |reason: String| Error::MalformedAtom(format!("`{}`: {}", remainder, reason));

    let tokens: Vec<&str> = remainder.split('-').collect();
    let (name_tokens, version, revision) = match tokens.as_slice() {
        [] | [_] => return Err(malformed("missing version".to_string())),
        [name, version] => (std::slice::from_ref(name), *version, None),
        [name, version, revision] => (std::slice::from_ref(name), *version, Some(*revision)),
        [name @ .., version, revision] => (name, *version, Some(*revision)),
    };

    let name = name_tokens.join("-");
    if parse_package().parse(name.as_str()).is_err() {
        return Err(malformed(format!("invalid package name `{}`", name)));
    }

    let revision = match revision {
        Some(token) => Some(
            token
                .strip_prefix('r')
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| malformed(format!("invalid revision `{}`", token)))?,
        ),
        None => None,
    };

    Ok((name, version, revision))
}

// Winnow parsers

/// Category name: alphanumerics plus `_ - + .`, not starting with `-`, `+` or `.`
fn parse_category<'s>() -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')
    })
    .verify(|s: &str| !s.starts_with(|c: char| matches!(c, '-' | '+' | '.')))
    .context(StrContext::Label("category"))
}

/// Package name: alphanumerics plus `_ - +`, not starting with `-` or `+`
fn parse_package<'s>() -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
    })
    .verify(|s: &str| !s.starts_with(|c: char| matches!(c, '-' | '+')))
    .context(StrContext::Label("package"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_parsing() {
        let atom = Atom::parse("app-editors/vim-core-7.4-r1").unwrap();
        assert_eq!(atom.category(), Some("app-editors"));
        assert_eq!(atom.name(), "vim-core");
        assert_eq!(atom.version(), "7.4");
        assert_eq!(atom.revision(), Some("1"));
        assert_eq!(atom.version_string().as_str(), "7.4-r1");
        assert_eq!(atom.to_string(), "app-editors/vim-core-7.4-r1");
    }

    #[test]
    fn test_atom_without_category() {
        let atom = Atom::parse("rust-1.75.0").unwrap();
        assert_eq!(atom.category(), None);
        assert_eq!(atom.name(), "rust");
        assert_eq!(atom.version(), "1.75.0");
        assert_eq!(atom.revision(), None);
        assert_eq!(atom.to_string(), "rust-1.75.0");
    }

    #[test]
    fn test_ebuild_basename() {
        let atom = Atom::parse("python-3.11.0_rc2_p1-r1.ebuild").unwrap();
        assert_eq!(atom.name(), "python");
        assert_eq!(atom.version(), "3.11.0_rc2_p1");
        assert_eq!(atom.revision(), Some("1"));
        assert_eq!(atom.to_string(), "python-3.11.0_rc2_p1-r1");
    }

    #[test]
    fn test_long_hyphenated_name() {
        let atom = Atom::parse("dev-python/python-dateutil-extra-2.8.2-r3").unwrap();
        assert_eq!(atom.name(), "python-dateutil-extra");
        assert_eq!(atom.version(), "2.8.2");
        assert_eq!(atom.revision(), Some("3"));
        assert!(!atom.name().starts_with('-'));
    }

    #[test]
    fn test_split_category() {
        assert_eq!(
            split_category("sys-apps/portage-3.0.ebuild").unwrap(),
            (Some("sys-apps"), "portage-3.0")
        );
        assert_eq!(split_category("portage-3.0.tbz2").unwrap(), (None, "portage-3.0"));
        assert_eq!(
            split_category("portage-3.0.gpkg.tar").unwrap(),
            (None, "portage-3.0")
        );
        assert_eq!(split_category("portage-3.0").unwrap(), (None, "portage-3.0"));
    }

    #[test]
    fn test_split_category_errors() {
        for input in ["", "cat/", "cat/.ebuild", "/foo-1.0", "-cat/foo-1.0", "a/b/foo-1.0"] {
            assert!(
                matches!(split_category(input), Err(Error::MalformedAtom(_))),
                "{} should not split",
                input
            );
        }
    }

    #[test]
    fn test_split_name_token_counts() {
        assert_eq!(split_name("foo-1.0").unwrap(), ("foo".to_string(), "1.0", None));
        assert_eq!(
            split_name("foo-1.0-r2").unwrap(),
            ("foo".to_string(), "1.0", Some("2"))
        );
        assert_eq!(
            split_name("foo-bar-1.0-r0").unwrap(),
            ("foo-bar".to_string(), "1.0", Some("0"))
        );
    }

    #[test]
    fn test_split_name_errors() {
        assert!(matches!(split_name("foo"), Err(Error::MalformedAtom(_))));
        // three tokens: the last one has to be the revision
        assert!(matches!(split_name("foo-bar-1.0"), Err(Error::MalformedAtom(_))));
        assert!(matches!(split_name("foo-1.0-rc"), Err(Error::MalformedAtom(_))));
        assert!(matches!(split_name("+foo-1.0"), Err(Error::MalformedAtom(_))));
    }

    #[test]
    fn test_invalid_version_token() {
        assert!(matches!(
            Atom::parse("foo-1.0x"),
            Err(Error::MalformedVersion(_))
        ));
        assert!(matches!(Atom::parse("foo-"), Err(Error::MalformedVersion(_))));
    }

    #[test]
    fn test_from_path() {
        let atom =
            Atom::from_path("/var/db/repos/gentoo/app-editors/vim-core/vim-core-9.0.1-r2.ebuild")
                .unwrap();
        assert_eq!(atom.category(), Some("app-editors"));
        assert_eq!(atom.name(), "vim-core");
        assert_eq!(atom.version(), "9.0.1");

        let atom = Atom::from_path("vim-9.0.ebuild").unwrap();
        assert_eq!(atom.category(), None);
        assert_eq!(atom.name(), "vim");
    }

    #[test]
    fn test_from_str() {
        let atom: Atom = "sys-libs/zlib-1.3".parse().unwrap();
        assert_eq!(atom.name(), "zlib");
    }
}
