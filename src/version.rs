use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat, separated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::one_of;

use crate::error::{Error, Result};

/// Trailing letter reserved for wildcard placeholders such as `1.0x` or `2.x`.
const WILDCARD_LETTER: char = 'x';

/// Rank of an absent suffix: above every pre-release kind, below `_p`.
const NO_SUFFIX_RANK: i32 = 0;

/// Package revision (`-r1`, `-r2`, etc.)
///
/// Tracks packaging changes independently of the upstream version.
/// A revision of `0` is the implicit default and is omitted from display.
///
/// See [PMS 3.2](https://projects.gentoo.org/pms/9/pms.html#version-specifications).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(pub u64);

impl Revision {
    /// `true` for the implicit `r0`.
    pub fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_default() {
            Ok(())
        } else {
            write!(f, "-r{}", self.0)
        }
    }
}

/// Version suffix kind
///
/// Five ordered suffix types modify version comparison.
/// `Alpha`, `Beta`, `Pre`, and `Rc` sort *below* the unsuffixed version,
/// while `P` (patchlevel) sorts *above* it.
///
/// See [Algorithm 3.1](https://projects.gentoo.org/pms/9/pms.html#version-comparison).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    /// `_alpha`, earliest pre-release stage.
    Alpha,
    /// `_beta`, feature-complete but not yet stable.
    Beta,
    /// `_pre`, pre-release snapshot.
    Pre,
    /// `_rc`, release candidate.
    Rc,
    /// `_p`, post-release patchlevel (sorts *above* the base version).
    P,
}

impl SuffixKind {
    /// Ordering value; an absent suffix ranks at [`NO_SUFFIX_RANK`].
    fn rank(&self) -> i32 {
        match self {
            SuffixKind::Alpha => -4,
            SuffixKind::Beta => -3,
            SuffixKind::Pre => -2,
            SuffixKind::Rc => -1,
            SuffixKind::P => 1,
        }
    }

    /// Whether this suffix marks a release that precedes the bare version.
    pub fn is_prerelease(&self) -> bool {
        self.rank() < NO_SUFFIX_RANK
    }
}

impl fmt::Display for SuffixKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuffixKind::Alpha => write!(f, "_alpha"),
            SuffixKind::Beta => write!(f, "_beta"),
            SuffixKind::Pre => write!(f, "_pre"),
            SuffixKind::Rc => write!(f, "_rc"),
            SuffixKind::P => write!(f, "_p"),
        }
    }
}

impl FromStr for SuffixKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alpha" => Ok(SuffixKind::Alpha),
            "beta" => Ok(SuffixKind::Beta),
            "pre" => Ok(SuffixKind::Pre),
            "rc" => Ok(SuffixKind::Rc),
            "p" => Ok(SuffixKind::P),
            _ => Err(Error::MalformedVersion(format!(
                "`{}`: unknown suffix keyword",
                s
            ))),
        }
    }
}

/// One `_alpha`, `_beta`, `_pre`, `_rc`, or `_p` segment with its number
///
/// A missing number counts as `0`, so `_rc` and `_rc0` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Suffix {
    /// The suffix keyword.
    pub kind: SuffixKind,
    /// Numeric qualifier (e.g. `2` in `_rc2`).
    pub number: u64,
}

impl Suffix {
    fn sort_key(&self) -> (i32, u64) {
        (self.kind.rank(), self.number)
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.number != 0 {
            write!(f, "{}", self.number)?;
        }
        Ok(())
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Suffix list compared position by position, a missing position ranking
/// as "no suffix".
struct SuffixRun<'a>(&'a [Suffix]);

impl SuffixRun<'_> {
    fn key_at(&self, i: usize) -> (i32, u64) {
        self.0.get(i).map_or((NO_SUFFIX_RANK, 0), Suffix::sort_key)
    }
}

impl PartialEq for SuffixRun<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SuffixRun<'_> {}

impl PartialOrd for SuffixRun<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SuffixRun<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.key_at(i).cmp(&other.key_at(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A single Portage version token
///
/// Represents a version string such as `1.2.3a_alpha4_beta5_pre6_rc7_p8-r9`.
/// The raw input is kept verbatim and returned by [`as_str`](Self::as_str)
/// and `Display`; comparison only looks at the parsed fields.
///
/// Ordering is lexicographic over `(numbers, letter, suffixes, revision)`:
///
/// - numeric components compare as integers, and a run that is a strict
///   prefix of the other is smaller (`1.2 < 1.2.1`);
/// - no letter sorts before any letter;
/// - suffixes compare position by position with
///   `alpha < beta < pre < rc < (none) < p`, then by their number;
/// - the revision compares numerically, a missing `-rN` being `r0`.
///
/// Equality follows the ordering, so `1.0 == 1.00` and `1.2.3 == 1.2.3-r0`.
///
/// ```
/// use portage_version::VersionString;
///
/// let rc = VersionString::parse("1.0_rc2").unwrap();
/// let release = VersionString::parse("1.0").unwrap();
/// let patched = VersionString::parse("1.0_p1").unwrap();
/// assert!(rc < release && release < patched);
/// assert_eq!(rc.as_str(), "1.0_rc2");
/// ```
#[derive(Debug, Clone)]
pub struct VersionString {
    raw: String,
    numbers: Vec<u64>,
    letter: Option<char>,
    suffixes: Vec<Suffix>,
    revision: Revision,
}

impl VersionString {
    /// Parse a version token, optionally carrying a `-rN` revision
    pub fn parse(input: &str) -> Result<Self> {
        let (numbers, letter, suffixes, revision) = parse_version()
            .parse(input)
            .map_err(|e| Error::MalformedVersion(format!("`{}`: {}", input, e)))?;

        Ok(VersionString {
            raw: input.to_string(),
            numbers,
            letter,
            suffixes,
            revision,
        })
    }

    /// The input text, unchanged
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Dot-separated numeric components (e.g. `[1, 2, 3]` for `1.2.03`).
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// Trailing letter after the numeric run, if any
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// Suffix groups in the order they appear
    pub fn suffixes(&self) -> &[Suffix] {
        &self.suffixes
    }

    /// Revision, `r0` when the input had none
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Whether the first suffix places this version before its bare release.
    pub fn is_prerelease(&self) -> bool {
        self.suffixes
            .first()
            .is_some_and(|suffix| suffix.kind.is_prerelease())
    }

    /// Same version with the revision dropped
    ///
    /// The raw text loses its `-rN` tail as well.
    pub fn base(&self) -> Self {
        // `-r` can only appear as the revision separator in a valid version
        let raw = self
            .raw
            .rfind("-r")
            .map_or(self.raw.as_str(), |pos| &self.raw[..pos]);

        VersionString {
            raw: raw.to_string(),
            numbers: self.numbers.clone(),
            letter: self.letter,
            suffixes: self.suffixes.clone(),
            revision: Revision::default(),
        }
    }

    fn sort_key(&self) -> (&[u64], Option<char>, SuffixRun<'_>, Revision) {
        (
            self.numbers.as_slice(),
            self.letter,
            SuffixRun(&self.suffixes),
            self.revision,
        )
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionString {}

// Values that compare equal have identical parsed fields, so hashing those
// agrees with `Eq`.
impl Hash for VersionString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numbers.hash(state);
        self.letter.hash(state);
        self.suffixes.hash(state);
        self.revision.hash(state);
    }
}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl FromStr for VersionString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Winnow parsers

type Components = (Vec<u64>, Option<char>, Vec<Suffix>, Revision);

fn parse_number<'s>() -> impl Parser<&'s str, u64, ErrMode<ContextError>> {
    digit1.try_map(|s: &str| s.parse::<u64>())
}

fn parse_letter<'s>() -> impl Parser<&'s str, char, ErrMode<ContextError>> {
    one_of(|c: char| c.is_ascii_lowercase() && c != WILDCARD_LETTER)
}

fn parse_suffix_kind<'s>() -> impl Parser<&'s str, SuffixKind, ErrMode<ContextError>> {
    alt((
        "alpha".value(SuffixKind::Alpha),
        "beta".value(SuffixKind::Beta),
        "pre".value(SuffixKind::Pre),
        "rc".value(SuffixKind::Rc),
        "p".value(SuffixKind::P),
    ))
    .context(StrContext::Label("suffix keyword"))
}

fn parse_suffix<'s>() -> impl Parser<&'s str, Suffix, ErrMode<ContextError>> {
    preceded('_', cut_err((parse_suffix_kind(), opt(parse_number())))).map(
        |(kind, number): (SuffixKind, Option<u64>)| Suffix {
            kind,
            number: number.unwrap_or(0),
        },
    )
}

fn parse_revision<'s>() -> impl Parser<&'s str, Revision, ErrMode<ContextError>> {
    preceded("-r", cut_err(parse_number()))
        .map(Revision)
        .context(StrContext::Label("revision"))
}

fn parse_version<'s>() -> impl Parser<&'s str, Components, ErrMode<ContextError>> {
    (
        separated(1.., parse_number(), '.'),
        opt(parse_letter()),
        repeat(0.., parse_suffix()),
        opt(parse_revision()),
    )
        .map(
            |(numbers, letter, suffixes, revision): (
                Vec<u64>,
                Option<char>,
                Vec<Suffix>,
                Option<Revision>,
            )| { (numbers, letter, suffixes, revision.unwrap_or_default()) },
        )
        .context(StrContext::Label("version"))
}
