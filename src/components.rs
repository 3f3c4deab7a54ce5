use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::atom::Atom;
use crate::error::{Error, Result};
use crate::version::VersionString;

/// Revision reported as `PR` when an atom carries none.
pub const DEFAULT_REVISION: &str = "r0";

/// Names of the standard ebuild version variables
///
/// The set is closed: string keys outside it fail to parse with
/// [`Error::UnknownField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `P`: name and version, without revision.
    P,
    /// `PN`: package name.
    Pn,
    /// `PV`: version, without revision.
    Pv,
    /// `PR`: revision, `r0` by default.
    Pr,
    /// `PVR`: version plus a non-default revision.
    Pvr,
    /// `PF`: name, version and non-default revision.
    Pf,
}

impl Field {
    /// Every field, in the order [`VersionComponents::iter`] yields them.
    pub const ALL: [Field; 6] = [
        Field::P,
        Field::Pn,
        Field::Pv,
        Field::Pr,
        Field::Pvr,
        Field::Pf,
    ];

    /// The variable name, e.g. `"PVR"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::P => "P",
            Field::Pn => "PN",
            Field::Pv => "PV",
            Field::Pr => "PR",
            Field::Pvr => "PVR",
            Field::Pf => "PF",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// The `P`, `PN`, `PV`, `PR`, `PVR` and `PF` values of one package
///
/// `PF` is always `PN-PVR`, and `PVR` only carries the revision when it
/// is not the default `r0`.
///
/// ```
/// use portage_version::{Field, VersionComponents};
///
/// let vars = VersionComponents::parse("app-editors/vim-core-7.4-r1").unwrap();
/// assert_eq!(vars.get(Field::Pvr), "7.4-r1");
/// assert_eq!(vars.lookup("PF").unwrap(), "vim-core-7.4-r1");
/// assert!(vars.lookup("SLOT").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComponents {
    category: Option<String>,
    p: String,
    pn: String,
    pv: String,
    pr: String,
    pvr: String,
    pf: String,
    version: VersionString,
}

impl VersionComponents {
    /// Parse an atom string or ebuild basename
    pub fn parse(input: &str) -> Result<Self> {
        Atom::parse(input).map(|atom| Self::from_atom(&atom))
    }

    /// Parse an ebuild path, see [`Atom::from_path`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Atom::from_path(path).map(|atom| Self::from_atom(&atom))
    }

    /// Derive the fields of an already split atom
    pub fn from_atom(atom: &Atom) -> Self {
        let pn = atom.name().to_string();
        let pv = atom.version().to_string();
        let pr = atom
            .revision()
            .map_or_else(|| DEFAULT_REVISION.to_string(), |digits| format!("r{}", digits));

        // r0 and r00 are both the default revision
        let pvr = if atom.version_string().revision().is_default() {
            pv.clone()
        } else {
            format!("{}-{}", pv, pr)
        };

        VersionComponents {
            category: atom.category().map(str::to_string),
            p: format!("{}-{}", pn, pv),
            pf: format!("{}-{}", pn, pvr),
            pn,
            pv,
            pr,
            pvr,
            version: atom.version_string().clone(),
        }
    }

    /// Value of one field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::P => &self.p,
            Field::Pn => &self.pn,
            Field::Pv => &self.pv,
            Field::Pr => &self.pr,
            Field::Pvr => &self.pvr,
            Field::Pf => &self.pf,
        }
    }

    /// Look up a field by its variable name
    pub fn lookup(&self, key: &str) -> Result<&str> {
        key.parse().map(|field| self.get(field))
    }

    /// All fields as `(field, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Get `P`
    pub fn p(&self) -> &str {
        &self.p
    }

    /// Get `PN`
    pub fn pn(&self) -> &str {
        &self.pn
    }

    /// Get `PV`
    pub fn pv(&self) -> &str {
        &self.pv
    }

    /// Get `PR`
    pub fn pr(&self) -> &str {
        &self.pr
    }

    /// Get `PVR`
    pub fn pvr(&self) -> &str {
        &self.pvr
    }

    /// Get `PF`
    pub fn pf(&self) -> &str {
        &self.pf
    }

    /// Get the category, if the input had one
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Comparable form of `PVR`
    pub fn version(&self) -> &VersionString {
        &self.version
    }
}

impl FromStr for VersionComponents {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
