//! go.mod parser for Go projects
//!
//! Handles:
//! - the module line (project name)
//! - require statements (single and block)
//! - `// indirect` requirements (excluded)
//! - go, toolchain, godebug, tool, ignore, replace, exclude and retract
//!   directives (skipped)

use crate::domain::ManifestKind;
use crate::error::ManifestError;
use crate::manifest::{ManifestEntry, ManifestParser, ParsedManifest};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Parser for go.mod files
pub struct GoModParser;

/// Directives whose content does not declare requirements
const SKIPPED_DIRECTIVES: [&str; 8] = [
    "go",
    "toolchain",
    "godebug",
    "tool",
    "ignore",
    "replace",
    "exclude",
    "retract",
];

// Block opening: require (
static BLOCK_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*\(\s*(//.*)?$").unwrap());

// Single-line directive: require module/path v1.2.3 // comment
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(?:\s+(.*))?$").unwrap());

// Requirement: module/path v1.2.3 // comment
static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("[^"]+"|\S+)\s+(\S+)\s*(//.*)?$"#).unwrap());

// Indirect marker comment: // indirect, // indirect; reason
static INDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s*indirect\s*(;|$)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Require,
    Skipped,
}

impl ManifestParser for GoModParser {
    fn parse(&self, content: &str) -> Result<ParsedManifest, ManifestError> {
        let mut manifest = ParsedManifest::default();
        let mut block: Option<(Block, usize)> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if let Some((current, _)) = block {
                if trimmed == ")" {
                    block = None;
                    continue;
                }
                if current == Block::Require {
                    if let Some(entry) = parse_requirement(trimmed, line_no)? {
                        manifest.entries.push(entry);
                    }
                }
                continue;
            }

            if trimmed == ")" {
                return Err(error(line_no, "unexpected ')'"));
            }

            if let Some(caps) = BLOCK_START_RE.captures(trimmed) {
                let directive = &caps[1];
                let kind = if directive == "require" {
                    Block::Require
                } else if SKIPPED_DIRECTIVES.contains(&directive) {
                    Block::Skipped
                } else {
                    return Err(error(line_no, format!("unknown block '{}'", directive)));
                };
                block = Some((kind, line_no));
                continue;
            }

            let Some(caps) = DIRECTIVE_RE.captures(trimmed) else {
                return Err(error(line_no, format!("unexpected '{}'", trimmed)));
            };
            let directive = &caps[1];
            let args = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

            match directive {
                "module" => {
                    let name = strip_comment(args).trim_matches('"');
                    if name.is_empty() {
                        return Err(error(line_no, "module directive without a path"));
                    }
                    manifest.root_name = Some(name.to_string());
                }
                "require" => {
                    if let Some(entry) = parse_requirement(args, line_no)? {
                        manifest.entries.push(entry);
                    }
                }
                d if SKIPPED_DIRECTIVES.contains(&d) => {}
                d => return Err(error(line_no, format!("unknown directive '{}'", d))),
            }
        }

        if let Some((_, opened_at)) = block {
            return Err(error(opened_at, "block is never closed"));
        }

        Ok(manifest)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::GoMod
    }
}

/// Parse one requirement; indirect requirements yield `None`
fn parse_requirement(text: &str, line_no: usize) -> Result<Option<ManifestEntry>, ManifestError> {
    let caps = REQUIREMENT_RE
        .captures(text)
        .ok_or_else(|| error(line_no, format!("malformed requirement '{}'", text)))?;

    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    if INDIRECT_RE.is_match(comment) {
        return Ok(None);
    }

    let module = caps[1].trim_matches('"');
    Ok(Some(ManifestEntry::new(module, &caps[2])))
}

fn strip_comment(text: &str) -> &str {
    match text.find("//") {
        Some(idx) => text[..idx].trim(),
        None => text,
    }
}

fn error(line: usize, message: impl Into<String>) -> ManifestError {
    ManifestError::go_mod_parse_error(PathBuf::from("go.mod"), line, message)
}
