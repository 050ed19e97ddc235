//! Ecosystems and the manifest files that belong to them

use std::fmt;
use std::path::Path;

/// Registry protocol family a manifest belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    /// Go modules (go.mod, Go module proxy)
    Go,
    /// Python packages (poetry.lock, Pipfile.lock, PyPI)
    Python,
}

impl Ecosystem {
    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Go => "Go",
            Ecosystem::Python => "Python",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Supported manifest formats, identified by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// Go module file
    GoMod,
    /// Poetry lock file (TOML)
    PoetryLock,
    /// Pipenv lock file (JSON)
    PipfileLock,
}

impl ManifestKind {
    /// Returns the file name identifying this manifest kind
    pub fn filename(&self) -> &'static str {
        match self {
            ManifestKind::GoMod => "go.mod",
            ManifestKind::PoetryLock => "poetry.lock",
            ManifestKind::PipfileLock => "Pipfile.lock",
        }
    }

    /// Returns the ecosystem whose registry resolves this manifest's dependencies
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            ManifestKind::GoMod => Ecosystem::Go,
            ManifestKind::PoetryLock | ManifestKind::PipfileLock => Ecosystem::Python,
        }
    }

    /// Returns all supported manifest kinds
    pub fn all() -> &'static [ManifestKind] {
        &[
            ManifestKind::GoMod,
            ManifestKind::PoetryLock,
            ManifestKind::PipfileLock,
        ]
    }

    /// Resolve the manifest kind from the file name of `path` (the directory is ignored)
    pub fn from_path(path: &Path) -> Option<ManifestKind> {
        let name = path.file_name()?.to_str()?;
        ManifestKind::all()
            .iter()
            .copied()
            .find(|kind| kind.filename() == name)
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}
