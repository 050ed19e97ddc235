//! Outdated scopes, ordered from the most to the least significant change

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// How far a dependency's declared version is behind its latest release
///
/// The derived ordering encodes severity: `Major < Minor < Patch < UpToDate < Unknown`,
/// so a lower value is a more significant change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutdatedScope {
    Major,
    Minor,
    Patch,
    UpToDate,
    Unknown,
}

impl OutdatedScope {
    /// Scopes that can be reported and flagged as critical, in report order
    pub const REPORTABLE: [OutdatedScope; 3] =
        [OutdatedScope::Major, OutdatedScope::Minor, OutdatedScope::Patch];

    /// All scopes in severity order
    pub fn all() -> &'static [OutdatedScope] {
        &[
            OutdatedScope::Major,
            OutdatedScope::Minor,
            OutdatedScope::Patch,
            OutdatedScope::UpToDate,
            OutdatedScope::Unknown,
        ]
    }

    /// Returns the upper-case name of this scope
    pub fn as_str(&self) -> &'static str {
        match self {
            OutdatedScope::Major => "MAJOR",
            OutdatedScope::Minor => "MINOR",
            OutdatedScope::Patch => "PATCH",
            OutdatedScope::UpToDate => "UP_TO_DATE",
            OutdatedScope::Unknown => "UNKNOWN",
        }
    }

    /// True for MAJOR, MINOR and PATCH
    pub fn is_reportable(&self) -> bool {
        Self::REPORTABLE.contains(self)
    }

    /// Returns the most severe scope of the set, or `None` for an empty set
    pub fn most_severe(scopes: impl IntoIterator<Item = OutdatedScope>) -> Option<OutdatedScope> {
        scopes.into_iter().min()
    }

    /// Parse a report threshold or critical-expression scope (MAJOR, MINOR or PATCH)
    pub fn parse_reportable(value: &str) -> Result<OutdatedScope, ConfigError> {
        match value.parse::<OutdatedScope>() {
            Ok(scope) if scope.is_reportable() => Ok(scope),
            _ => Err(ConfigError::InvalidScope {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutdatedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutdatedScope {
    type Err = ConfigError;

    /// Case-insensitive parse of any of the five scope names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        OutdatedScope::all()
            .iter()
            .copied()
            .find(|scope| scope.as_str() == upper)
            .ok_or_else(|| ConfigError::InvalidScope {
                value: s.to_string(),
            })
    }
}
