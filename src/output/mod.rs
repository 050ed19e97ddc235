//! Report output
//!
//! This module provides:
//! - Report options resolved from the command line
//! - The per-scope colour palette
//! - The grouped text report

mod text;

pub use text::TextReport;

use crate::domain::OutdatedScope;
use colored::Color;

/// Options for rendering the report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Least severe scope that is still printed
    pub threshold: OutdatedScope,
    /// Leave out the UNKNOWN section
    pub skip_unknown: bool,
    /// Whether to use colors
    pub color: bool,
    pub palette: Palette,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            threshold: OutdatedScope::Major,
            skip_unknown: false,
            color: true,
            palette: Palette::default(),
        }
    }
}

impl ReportOptions {
    /// Plain-text options for `threshold`
    pub fn plain(threshold: OutdatedScope) -> Self {
        Self {
            threshold,
            color: false,
            ..Self::default()
        }
    }

    /// True if the `scope` section is printed under these options
    pub fn prints(&self, scope: OutdatedScope) -> bool {
        match scope {
            OutdatedScope::UpToDate => false,
            OutdatedScope::Unknown => !self.skip_unknown,
            scope => scope <= self.threshold,
        }
    }
}

/// Section colours, one per scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub major: Color,
    pub minor: Color,
    pub patch: Color,
    pub unknown: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            major: Color::Red,
            minor: Color::Yellow,
            patch: Color::Green,
            unknown: Color::White,
        }
    }
}

impl Palette {
    pub fn color_for(&self, scope: OutdatedScope) -> Color {
        match scope {
            OutdatedScope::Major => self.major,
            OutdatedScope::Minor => self.minor,
            OutdatedScope::Patch => self.patch,
            OutdatedScope::UpToDate | OutdatedScope::Unknown => self.unknown,
        }
    }
}
