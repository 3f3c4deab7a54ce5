//! Portage package atom splitting and version ordering
//!
//! This crate splits Gentoo/Portage atoms (`category/name-version-rN`) and
//! ebuild filenames (`name-version-rN.ebuild`) into their parts, derives the
//! standard `P`/`PN`/`PV`/`PR`/`PVR`/`PF` variables, and orders versions the
//! way the [Package Manager Specification (PMS)][PMS] does: numerically,
//! then by letter, then by `_alpha`/`_beta`/`_pre`/`_rc`/`_p` suffix, then by
//! revision.
//!
//! [PMS]: https://projects.gentoo.org/pms/latest/pms.html
//!
//! # Examples
//!
//! Split an atom:
//! ```
//! use portage_version::Atom;
//!
//! let atom = Atom::parse("app-editors/vim-core-7.4-r1").unwrap();
//! assert_eq!(atom.category(), Some("app-editors"));
//! assert_eq!(atom.name(), "vim-core");
//! ```
//!
//! Derive the ebuild variables:
//! ```
//! use portage_version::VersionComponents;
//!
//! let vars = VersionComponents::parse("vim-core-7.4-r1.ebuild").unwrap();
//! assert_eq!(vars.pvr(), "7.4-r1");
//! assert_eq!(vars.pf(), "vim-core-7.4-r1");
//! ```
//!
//! Compare versions:
//! ```
//! use portage_version::VersionString;
//!
//! let a = VersionString::parse("1.0_rc1").unwrap();
//! let b = VersionString::parse("1.0").unwrap();
//! assert!(a < b);
//! assert_eq!(b, VersionString::parse("1.00-r0").unwrap());
//! ```
//!
//! Sort the ebuilds of a package directory:
//! ```
//! use portage_version::VersionSet;
//!
//! let listing = ["Manifest", "foo-1.10.ebuild", "foo-1.9.ebuild", "metadata.xml"];
//! let set = VersionSet::from_filenames("foo", listing).unwrap();
//! assert_eq!(set.latest().unwrap().as_str(), "1.10");
//! ```

mod atom;
mod components;
mod error;
mod version;
mod version_set;

// Re-export main types
pub use atom::{
    split_category, split_name, strip_extension, Atom, EBUILD_EXTENSION, PACKAGE_EXTENSIONS,
};
pub use components::{Field, VersionComponents, DEFAULT_REVISION};
pub use error::{Error, Result};
pub use version::{Revision, Suffix, SuffixKind, VersionString};
pub use version_set::{Iter, VersionSet};
