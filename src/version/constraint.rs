//! Version constraint evaluation for pubspec dependency declarations.
//!
//! Supported forms:
//! - `1.2.3`, `=1.2.3`, `v1.2.3` - exact match
//! - `1`, `1.2`, `1.x`, `1.2.x`, `*` - partial versions and wildcards
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0, narrower for 0.x)
//! - `~1.2.3`, `~>1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `>=1.0.0 <2.0.0` - conjunction of comparators, separated by whitespace only
//! - `1.0.0 - 2.0.0` - hyphen range
//! - `^1.0.0 || ^2.0.0` - union of ranges
//!
//! Numeric components with leading zeros are rejected.

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::LazyLock;

static COMPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(<=|>=|<|>|=|\^|~>?)?v?(\*|[xX]|0|[1-9]\d*)(?:\.(\*|[xX]|0|[1-9]\d*))?(?:\.(\*|[xX]|0|[1-9]\d*))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
    )
    .unwrap()
});

static HYPHEN_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap());

static OPERATOR_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<=|>=|<|>|=|\^|~>|~)\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => *version == self.version,
            Op::Gt => *version > self.version,
            Op::Gte => *version >= self.version,
            Op::Lt => *version < self.version,
            Op::Lte => *version <= self.version,
        }
    }
}

/// A version token whose components may be missing or wildcards.
#[derive(Debug)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

/// A parsed constraint: a union of comparator sets, each set a conjunction.
///
/// An empty set matches every release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    sets: Vec<Vec<Comparator>>,
}

impl VersionConstraint {
    /// Parse a constraint expression, returning `None` when any part of it is malformed.
    pub fn parse(input: &str) -> Option<Self> {
        let sets = input
            .split("||")
            .map(parse_set)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { sets })
    }

    /// Check whether `version` lies inside the constraint.
    ///
    /// Pre-release versions only match a set that names a pre-release of the same
    /// `major.minor.patch` tuple.
    pub fn satisfies(&self, version: &Version) -> bool {
        let version = without_build(version.clone());
        self.sets.iter().any(|set| set_matches(set, &version))
    }

    /// The lowest version that satisfies the constraint, if there is one.
    pub fn min_version(&self) -> Option<Version> {
        let zero = Version::new(0, 0, 0);
        if self.satisfies(&zero) {
            return Some(zero);
        }

        let zero_pre = with_pre(zero, pre_zero());
        if self.satisfies(&zero_pre) {
            return Some(zero_pre);
        }

        let mut lowest: Option<Version> = None;
        for set in &self.sets {
            let mut set_min: Option<Version> = None;
            for comparator in set {
                let candidate = match comparator.op {
                    Op::Gt => next_after(&comparator.version),
                    Op::Gte | Op::Eq => comparator.version.clone(),
                    Op::Lt | Op::Lte => continue,
                };
                if set_min.as_ref().is_none_or(|current| *current < candidate) {
                    set_min = Some(candidate);
                }
            }

            if let Some(candidate) = set_min {
                if lowest.as_ref().is_none_or(|current| *current > candidate) {
                    lowest = Some(candidate);
                }
            }
        }

        lowest.filter(|candidate| self.satisfies(candidate))
    }
}

/// Minimum version admitted by a declared constraint, `0.0.0` when it cannot be determined.
pub fn min_version_or_zero(constraint: &str) -> Version {
    VersionConstraint::parse(constraint)
        .and_then(|parsed| parsed.min_version())
        .unwrap_or_else(|| Version::new(0, 0, 0))
}

/// Whether `candidate` satisfies `required` read as a range on its own.
///
/// A full version such as `8.0.0` is an exact-match range, so only `8.0.0` passes.
pub fn satisfies_required(candidate: &Version, required: &str) -> bool {
    VersionConstraint::parse(required).is_some_and(|range| range.satisfies(candidate))
}

fn parse_set(raw: &str) -> Option<Vec<Comparator>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Vec::new());
    }

    if let Some(captures) = HYPHEN_RANGE.captures(raw) {
        let from = parse_token(&captures[1])?;
        let to = parse_token(&captures[2])?;
        if from.0.is_some() || to.0.is_some() {
            return None;
        }
        let mut comparators = desugar(">=", from.1);
        comparators.extend(desugar("<=", to.1));
        return Some(comparators);
    }

    let normalized = OPERATOR_GAP.replace_all(raw, "${1}");
    let mut comparators = Vec::new();
    for token in normalized.split_whitespace() {
        let (op, partial) = parse_token(token)?;
        comparators.extend(desugar(op.unwrap_or("="), partial));
    }
    Some(comparators)
}

fn parse_token(token: &str) -> Option<(Option<&str>, Partial)> {
    let captures = COMPARATOR.captures(token)?;
    let op = captures.get(1).map(|m| m.as_str());

    let major = component(captures.get(2))?;
    let minor = major.and(component(captures.get(3))?);
    let patch = minor.and(component(captures.get(4))?);
    let pre = match (patch, captures.get(5)) {
        (Some(_), Some(pre)) => Prerelease::new(pre.as_str()).ok()?,
        _ => Prerelease::EMPTY,
    };

    Some((
        op,
        Partial {
            major,
            minor,
            patch,
            pre,
        },
    ))
}

fn component(raw: Option<regex::Match<'_>>) -> Option<Option<u64>> {
    match raw.map(|m| m.as_str()) {
        None | Some("*") | Some("x") | Some("X") => Some(None),
        Some(digits) => digits.parse().ok().map(Some),
    }
}

fn desugar(op: &str, partial: Partial) -> Vec<Comparator> {
    let Partial {
        major,
        minor,
        patch,
        pre,
    } = partial;

    match op {
        "^" => match (major, minor, patch) {
            (None, _, _) => Vec::new(),
            (Some(ma), None, _) => vec![gte(ma, 0, 0), below(ma.saturating_add(1), 0, 0)],
            (Some(0), Some(mi), None) => vec![gte(0, mi, 0), below(0, mi.saturating_add(1), 0)],
            (Some(ma), Some(mi), None) => vec![gte(ma, mi, 0), below(ma.saturating_add(1), 0, 0)],
            (Some(ma), Some(mi), Some(pa)) => {
                let lower = Comparator::new(Op::Gte, with_pre(Version::new(ma, mi, pa), pre));
                let upper = if ma > 0 {
                    below(ma.saturating_add(1), 0, 0)
                } else if mi > 0 {
                    below(0, mi.saturating_add(1), 0)
                } else {
                    below(0, 0, pa.saturating_add(1))
                };
                vec![lower, upper]
            }
        },
        "~" | "~>" => match (major, minor, patch) {
            (None, _, _) => Vec::new(),
            (Some(ma), None, _) => vec![gte(ma, 0, 0), below(ma.saturating_add(1), 0, 0)],
            (Some(ma), Some(mi), pa) => vec![
                Comparator::new(
                    Op::Gte,
                    with_pre(Version::new(ma, mi, pa.unwrap_or(0)), pre),
                ),
                below(ma, mi.saturating_add(1), 0),
            ],
        },
        ">" => match (major, minor, patch) {
            (None, _, _) => vec![nothing()],
            (Some(ma), None, _) => vec![gte(ma.saturating_add(1), 0, 0)],
            (Some(ma), Some(mi), None) => vec![gte(ma, mi.saturating_add(1), 0)],
            (Some(ma), Some(mi), Some(pa)) => {
                vec![Comparator::new(Op::Gt, with_pre(Version::new(ma, mi, pa), pre))]
            }
        },
        ">=" => match (major, minor, patch) {
            (None, _, _) => Vec::new(),
            (Some(ma), mi, pa) => vec![Comparator::new(
                Op::Gte,
                with_pre(Version::new(ma, mi.unwrap_or(0), pa.unwrap_or(0)), pre),
            )],
        },
        "<" => match (major, minor, patch) {
            (None, _, _) => vec![nothing()],
            (Some(ma), mi, Some(pa)) => vec![Comparator::new(
                Op::Lt,
                with_pre(Version::new(ma, mi.unwrap_or(0), pa), pre),
            )],
            (Some(ma), mi, None) => vec![below(ma, mi.unwrap_or(0), 0)],
        },
        "<=" => match (major, minor, patch) {
            (None, _, _) => Vec::new(),
            (Some(ma), None, _) => vec![below(ma.saturating_add(1), 0, 0)],
            (Some(ma), Some(mi), None) => vec![below(ma, mi.saturating_add(1), 0)],
            (Some(ma), Some(mi), Some(pa)) => {
                vec![Comparator::new(Op::Lte, with_pre(Version::new(ma, mi, pa), pre))]
            }
        },
        _ => match (major, minor, patch) {
            (None, _, _) => Vec::new(),
            (Some(ma), None, _) => vec![gte(ma, 0, 0), below(ma.saturating_add(1), 0, 0)],
            (Some(ma), Some(mi), None) => vec![gte(ma, mi, 0), below(ma, mi.saturating_add(1), 0)],
            (Some(ma), Some(mi), Some(pa)) => {
                vec![Comparator::new(Op::Eq, with_pre(Version::new(ma, mi, pa), pre))]
            }
        },
    }
}

fn set_matches(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.matches(version)) {
        return false;
    }

    if version.pre.is_empty() {
        return true;
    }

    set.iter().any(|comparator| {
        let bound = &comparator.version;
        !bound.pre.is_empty()
            && bound.major == version.major
            && bound.minor == version.minor
            && bound.patch == version.patch
    })
}

/// Smallest version strictly greater than `version`.
fn next_after(version: &Version) -> Version {
    if version.pre.is_empty() {
        Version::new(version.major, version.minor, version.patch.saturating_add(1))
    } else {
        let bumped = Prerelease::new(&format!("{}.0", version.pre.as_str()))
            .unwrap_or_else(|_| version.pre.clone());
        with_pre(
            Version::new(version.major, version.minor, version.patch),
            bumped,
        )
    }
}

fn gte(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Op::Gte, Version::new(major, minor, patch))
}

/// Exclusive upper bound that also shuts out pre-releases of the bound itself.
fn below(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(
        Op::Lt,
        with_pre(Version::new(major, minor, patch), pre_zero()),
    )
}

fn nothing() -> Comparator {
    below(0, 0, 0)
}

fn pre_zero() -> Prerelease {
    Prerelease::new("0").unwrap_or(Prerelease::EMPTY)
}

fn with_pre(mut version: Version, pre: Prerelease) -> Version {
    version.pre = pre;
    version
}

fn without_build(mut version: Version) -> Version {
    version.build = BuildMetadata::EMPTY;
    version
}
