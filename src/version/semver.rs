//! Semantic version parsing and constraint evaluation for chart versions

use semver::{BuildMetadata, Comparator, Op, Prerelease, Version, VersionReq};

use crate::error::{WhatupError, WhatupResult};

/// Constraint selecting the highest stable version
pub const STABLE_CONSTRAINT: &str = "*";

/// Constraint selecting the highest version, pre-releases included
pub const DEVEL_CONSTRAINT: &str = ">=0.0.0-0";

/// Parse a chart version string, normalizing partial versions.
///
/// Chart versions in the wild are not always strict semver, so a leading `v`
/// is stripped and missing minor/patch components are padded with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2.3-rc.1" -> Version(1, 2, 3, pre: rc.1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);

    // Only the numeric core may be partial; suffixes stay attached to it
    let core_end = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(core_end);
    let normalized = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Parse a version constraint.
///
/// An empty constraint means "any stable version".
pub fn parse_constraint(constraint: &str) -> WhatupResult<VersionReq> {
    let constraint = if constraint.trim().is_empty() {
        STABLE_CONSTRAINT
    } else {
        constraint
    };

    VersionReq::parse(constraint).map_err(|source| WhatupError::Constraint {
        constraint: constraint.to_string(),
        source,
    })
}

/// Check whether `version` satisfies `req`.
///
/// Without a pre-release tag in the constraint, pre-release versions never
/// match. A constraint that does carry one admits pre-releases of any release
/// line: `>`, `>=`, `<`, `<=` and `=` compare by precedence, while `^`, `~`
/// and wildcards keep their range over the release core and must not fall
/// below the comparator's own version.
pub fn satisfies(req: &VersionReq, version: &Version) -> bool {
    if version.pre.is_empty() || !admits_prerelease(req) {
        return req.matches(version);
    }

    req.comparators
        .iter()
        .all(|comparator| satisfies_by_precedence(comparator, version))
}

fn admits_prerelease(req: &VersionReq) -> bool {
    req.comparators.iter().any(|c| !c.pre.is_empty())
}

fn satisfies_by_precedence(comparator: &Comparator, version: &Version) -> bool {
    let bound = Version {
        major: comparator.major,
        minor: comparator.minor.unwrap_or(0),
        patch: comparator.patch.unwrap_or(0),
        pre: comparator.pre.clone(),
        build: BuildMetadata::EMPTY,
    };
    // Build metadata does not take part in precedence
    let version = Version {
        build: BuildMetadata::EMPTY,
        ..version.clone()
    };

    match comparator.op {
        Op::Greater => version > bound,
        Op::GreaterEq => version >= bound,
        Op::Less => version < bound,
        Op::LessEq => version <= bound,
        Op::Exact => version == bound,
        _ => {
            let core = Version {
                pre: Prerelease::EMPTY,
                ..version.clone()
            };
            comparator.matches(&core) && version >= bound
        }
    }
}
