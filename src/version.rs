//! Version literal parsing and comparison
//!
//! Literals are parsed into [`semver::Version`]. A leading `v` is accepted and
//! one or two component numeric literals (`2.28`, `3`) are padded with zeros,
//! and zero-padded components (`2023.07.22`) are read as plain numbers.
//! In lenient mode a literal that fails to parse is retried after truncating it
//! at the first pre-release marker character, so `v1.0.0rc0` reads as `v1.0.0`.

use crate::error::VersionError;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Characters that start a non-conformant pre-release qualifier (`rc`, `a`, `b`, `c`)
const QUALIFIER_MARKERS: [char; 5] = ['r', 'c', 'a', 'b', ' '];

// Partial numeric versions: 3, 2.28
static PARTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\.(\d+))?$").expect("valid partial version regex"));

// Release triple followed by optional pre-release/build: 2023.07.22, 1.02.3-rc.1
static RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)([-+].*)?$").expect("valid release version regex")
});

/// A parsed version together with the literal it was parsed from
///
/// Equality and ordering only consider the semantic version.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    literal: String,
    version: Version,
}

impl ParsedVersion {
    /// The literal that parsed (after lenient truncation, if any)
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn semver(&self) -> &Version {
        &self.version
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for ParsedVersion {}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Parse a version literal
///
/// With `strict` unset, a literal that fails to parse is cut at the first
/// character of [`QUALIFIER_MARKERS`] and the prefix is parsed strictly.
pub fn parse_version(literal: &str, strict: bool) -> Result<ParsedVersion, VersionError> {
    let trimmed = literal.trim();
    match parse_semver(trimmed) {
        Ok(version) => Ok(ParsedVersion {
            literal: trimmed.to_string(),
            version,
        }),
        Err(err) if strict => Err(err),
        Err(err) => {
            let Some(cut) = trimmed.find(QUALIFIER_MARKERS) else {
                return Err(err);
            };
            let prefix = trimmed[..cut].trim_end();
            let version = parse_semver(prefix)?;
            Ok(ParsedVersion {
                literal: prefix.to_string(),
                version,
            })
        }
    }
}

fn parse_semver(literal: &str) -> Result<Version, VersionError> {
    let body = literal.strip_prefix(['v', 'V']).unwrap_or(literal);
    match Version::parse(body) {
        Ok(version) => Ok(version),
        Err(err) => strip_leading_zeros(body)
            .or_else(|| pad_partial(body))
            .ok_or_else(|| VersionError::new(literal, err.to_string())),
    }
}

/// Parse a release triple whose numeric components carry leading zeros
fn strip_leading_zeros(body: &str) -> Option<Version> {
    let caps = RELEASE_RE.captures(body)?;
    let normalized = format!(
        "{}.{}.{}{}",
        trim_zeros(&caps[1]),
        trim_zeros(&caps[2]),
        trim_zeros(&caps[3]),
        caps.get(4).map_or("", |m| m.as_str())
    );
    Version::parse(&normalized).ok()
}

fn trim_zeros(component: &str) -> &str {
    match component.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

fn pad_partial(body: &str) -> Option<Version> {
    let caps = PARTIAL_RE.captures(body)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some(Version::new(major, minor, 0))
}

/// Returns the greatest parseable version among `literals`
///
/// Unparseable literals are skipped. Returns `None` when nothing parses.
pub fn max_version<I, S>(literals: I, strict: bool) -> Option<ParsedVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    literals
        .into_iter()
        .filter_map(|literal| match parse_version(literal.as_ref(), strict) {
            Ok(version) => Some(version),
            Err(err) => {
                debug!("skipping release: {}", err);
                None
            }
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semver(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_classical() {
        let parsed = parse_version("v1.0.0", true).unwrap();
        assert_eq!(parsed.semver(), &semver("1.0.0"));
        assert_eq!(parsed.literal(), "v1.0.0");
    }

    #[test]
    fn test_parse_incompatible_build_metadata() {
        let parsed = parse_version("65.0.0+incompatible", true).unwrap();
        assert_eq!(parsed.semver(), &semver("65.0.0+incompatible"));
    }

    #[test]
    fn test_parse_pseudo_version() {
        let parsed = parse_version("v0.0.0-20170810143723-de5bf2ad4578", true).unwrap();
        assert_eq!(parsed.semver(), &semver("0.0.0-20170810143723-de5bf2ad4578"));
    }

    #[test]
    fn test_parse_partial_versions_are_padded() {
        assert_eq!(parse_version("2.28", true).unwrap().semver(), &semver("2.28.0"));
        assert_eq!(parse_version("3", true).unwrap().semver(), &semver("3.0.0"));
    }

    #[test]
    fn test_parse_zero_padded_components() {
        for strict in [true, false] {
            let parsed = parse_version("2023.07.22", strict).unwrap();
            assert_eq!(parsed.semver(), &semver("2023.7.22"));
            assert_eq!(parsed.literal(), "2023.07.22");
        }
        assert_eq!(parse_version("v1.02.003", true).unwrap().semver(), &semver("1.2.3"));
        assert_eq!(parse_version("2024.00.1", true).unwrap().semver(), &semver("2024.0.1"));
        assert_eq!(
            parse_version("2023.07.22-rc.1", true).unwrap().semver(),
            &semver("2023.7.22-rc.1")
        );
        assert_eq!(parse_version("2024.08", true).unwrap().semver(), &semver("2024.8.0"));
    }

    #[test]
    fn test_lenient_zero_padded_with_qualifier() {
        let parsed = parse_version("2023.07.22rc1", false).unwrap();
        assert_eq!(parsed.semver(), &semver("2023.7.22"));
        assert!(parse_version("2023.07.22rc1", true).is_err());
    }

    #[test]
    fn test_lenient_strips_qualifiers() {
        for literal in ["v1.0.0rc0", "v1.0.0a1", "v1.0.0b2", "1.0.0 beta"] {
            let lenient = parse_version(literal, false).unwrap();
            assert_eq!(lenient, parse_version("v1.0.0", true).unwrap(), "{literal}");
        }
    }

    #[test]
    fn test_lenient_keeps_truncated_literal() {
        let parsed = parse_version("v1.0.0rc0", false).unwrap();
        assert_eq!(parsed.literal(), "v1.0.0");
        assert_eq!(parsed.to_string(), "v1.0.0");
    }

    #[test]
    fn test_lenient_partial_with_qualifier() {
        let parsed = parse_version("2.0rc1", false).unwrap();
        assert_eq!(parsed.semver(), &semver("2.0.0"));
    }

    #[test]
    fn test_strict_rejects_qualifiers() {
        for literal in ["v1.0.0rc0", "v1.0.0a1", "v1.0.0b2"] {
            assert!(parse_version(literal, true).is_err(), "{literal}");
        }
    }

    #[test]
    fn test_malformed_fails_in_both_modes() {
        assert!(parse_version("v1..0.0", false).is_err());
        assert!(parse_version("v1..0.0", true).is_err());
        assert!(parse_version("", false).is_err());
        assert!(parse_version("not-a-version", true).is_err());
    }

    #[test]
    fn test_error_keeps_literal() {
        let err = parse_version("v1..0.0", true).unwrap_err();
        assert_eq!(err.literal, "v1..0.0");
    }

    #[test]
    fn test_max_version() {
        let cases: [(&[&str], &str); 4] = [
            (&["v1.0.0"], "1.0.0"),
            (&["v1.0.0", "v1.0.0"], "1.0.0"),
            (&["v1.2.0", "v1.0.0"], "1.2.0"),
            (&["v1.1.0", "v2.0.0"], "2.0.0"),
        ];
        for (literals, expected) in cases {
            let max = max_version(literals.iter().copied(), true).unwrap();
            assert_eq!(max.semver(), &semver(expected));
        }
    }

    #[test]
    fn test_max_version_prefers_release_over_prerelease() {
        let max = max_version(["v2.0.0-rc.1", "v2.0.0", "v1.9.9"], true).unwrap();
        assert_eq!(max.literal(), "v2.0.0");
    }

    #[test]
    fn test_max_version_skips_unparseable() {
        let max = max_version(["garbage", "v1.3.0", "v1..2"], true).unwrap();
        assert_eq!(max.literal(), "v1.3.0");
    }

    #[test]
    fn test_max_version_zero_padded_releases() {
        for strict in [true, false] {
            let max = max_version(["2024.08.30", "2023.11.17", "2025.01.31"], strict).unwrap();
            assert_eq!(max.literal(), "2025.01.31");
            assert_eq!(max.semver(), &semver("2025.1.31"));
        }
    }

    #[test]
    fn test_max_version_absent() {
        assert!(max_version(Vec::<String>::new(), false).is_none());
        assert!(max_version(Vec::<String>::new(), true).is_none());
        assert!(max_version(["not-a-version"], true).is_none());
    }
}
