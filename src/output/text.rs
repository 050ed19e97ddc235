//! Text report for human-readable display
//!
//! Sections are printed from most to least severe, followed by the UNKNOWN
//! section. Critical dependencies are marked with `*`.

use crate::atlas::Atlas;
use crate::domain::{Dependency, OutdatedScope};
use crate::output::ReportOptions;
use colored::Colorize;
use std::io::Write;

const NAME_WIDTH: usize = 50;
const VERSION_WIDTH: usize = 20;
const HEADER_RULE_WIDTH: usize = 40;

/// Grouped outdated-dependency report
pub struct TextReport {
    options: ReportOptions,
}

impl TextReport {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Write the report; returns whether a critical dependency was printed
    pub fn render(&self, atlas: &Atlas, writer: &mut dyn Write) -> std::io::Result<bool> {
        let mut critical_found = false;

        for scope in OutdatedScope::REPORTABLE {
            if !self.options.prints(scope) {
                continue;
            }
            critical_found |= self.render_section(atlas, scope, writer)?;
        }

        if self.options.prints(OutdatedScope::Unknown) {
            self.render_unknown(atlas, writer)?;
        }

        Ok(critical_found)
    }

    fn render_section(
        &self,
        atlas: &Atlas,
        scope: OutdatedScope,
        writer: &mut dyn Write,
    ) -> std::io::Result<bool> {
        let header = format!(
            "[ {} {} Version Outdated ]{}",
            atlas.count(scope),
            scope,
            "=".repeat(HEADER_RULE_WIDTH)
        );
        writeln!(writer)?;
        writeln!(writer, "{}", self.paint(&header, scope))?;
        writeln!(writer)?;

        if atlas.count(scope) == 0 {
            writeln!(writer, "no outdated dependencies")?;
            return Ok(false);
        }

        let mut critical_found = false;
        for dependency in atlas.bucket(scope) {
            let critical = atlas.is_critical(scope, dependency);
            critical_found |= critical;

            let mark = if critical { '*' } else { ' ' };
            let row = format!("{} {}", mark, format_row(dependency));
            if critical && self.options.color {
                writeln!(writer, "{}", self.paint(&row, scope).bold())?;
            } else {
                writeln!(writer, "{}", self.paint(&row, scope))?;
            }
        }
        Ok(critical_found)
    }

    fn render_unknown(&self, atlas: &Atlas, writer: &mut dyn Write) -> std::io::Result<()> {
        let count = atlas.count(OutdatedScope::Unknown);
        if count == 0 {
            return Ok(());
        }

        let header = format!(
            "[ {} UNKNOWN dependencies ]{}",
            count,
            "=".repeat(HEADER_RULE_WIDTH)
        );
        writeln!(writer)?;
        writeln!(writer, "{}", self.paint(&header, OutdatedScope::Unknown))?;
        writeln!(writer)?;

        for dependency in atlas.bucket(OutdatedScope::Unknown) {
            writeln!(writer, "  {}", format_row(dependency))?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, scope: OutdatedScope) -> colored::ColoredString {
        if self.options.color {
            text.color(self.options.palette.color_for(scope))
        } else {
            text.normal()
        }
    }
}

/// Name, declared version and (when known) latest version in fixed columns
fn format_row(dependency: &Dependency) -> String {
    let row = match &dependency.latest {
        Some(latest) => format!(
            "{:<name$} {:<ver$} {:<ver$}",
            dependency.name,
            dependency.declared_display(),
            latest.literal(),
            name = NAME_WIDTH,
            ver = VERSION_WIDTH
        ),
        None => format!(
            "{:<name$} {}",
            dependency.name,
            dependency.declared_display(),
            name = NAME_WIDTH
        ),
    };
    row.trim_end().to_string()
}
