//! Dependency information structures

use super::OutdatedScope;
use crate::error::RegistryError;
use crate::registry::RegistryAdapter;
use crate::version::{max_version, parse_version, ParsedVersion};
use std::fmt;
use tracing::{debug, warn};

/// One manifest entry and the newest release known for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Module path or package name as written in the manifest
    pub name: String,
    /// Declared version exactly as written in the manifest
    pub declared_literal: String,
    /// Declared version, `None` if the literal is not a version
    pub declared: Option<ParsedVersion>,
    /// Newest published release, `None` until resolved (or if resolution failed)
    pub latest: Option<ParsedVersion>,
}

impl Dependency {
    /// Creates a dependency, parsing the declared version
    ///
    /// An unparseable version is logged and kept only as a literal.
    pub fn new(name: impl Into<String>, version: impl Into<String>, strict: bool) -> Self {
        let name = name.into();
        let declared_literal = version.into();
        let declared = match parse_version(&declared_literal, strict) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!("{}: {}", name, err);
                None
            }
        };

        Self {
            name,
            declared_literal,
            declared,
            latest: None,
        }
    }

    /// Classify the gap between the declared and latest versions
    pub fn classify(&self) -> OutdatedScope {
        let (Some(declared), Some(latest)) = (&self.declared, &self.latest) else {
            return OutdatedScope::Unknown;
        };

        if latest.major() > declared.major() {
            OutdatedScope::Major
        } else if latest.minor() > declared.minor() {
            OutdatedScope::Minor
        } else if latest.patch() > declared.patch() {
            OutdatedScope::Patch
        } else {
            OutdatedScope::UpToDate
        }
    }

    /// Query the registry and record the newest parseable release
    ///
    /// Never fails: any registry error leaves `latest` unset. A dependency
    /// whose declared version did not parse is not queried at all.
    pub async fn resolve_latest(&mut self, registry: &dyn RegistryAdapter, strict: bool) {
        if self.declared.is_none() {
            return;
        }

        let latest = registry
            .fetch_versions(&self.name)
            .await
            .and_then(|versions| {
                max_version(&versions, strict).ok_or_else(|| RegistryError::NoVersions {
                    package: self.name.clone(),
                    registry: registry.registry_name().to_string(),
                })
            });

        match latest {
            Ok(latest) => self.latest = Some(latest),
            Err(err) => debug!("{}", err),
        }
    }

    /// Declared version for display, falling back to the raw literal
    pub fn declared_display(&self) -> &str {
        self.declared
            .as_ref()
            .map(ParsedVersion::literal)
            .unwrap_or(self.declared_literal.as_str())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.latest {
            Some(latest) => write!(f, "{} {} -> {}", self.name, self.declared_display(), latest),
            None => write!(f, "{} {}", self.name, self.declared_display()),
        }
    }
}
