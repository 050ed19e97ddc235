//! Name-matching rules for ignored and critical dependencies
//!
//! Patterns are regular expressions compiled once at start-up. A name matches
//! when any pattern finds a match anywhere in it (use `^...$` for equality).

use crate::domain::OutdatedScope;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::BTreeMap;

/// A compiled set of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile every expression, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(expressions: &[S]) -> Result<Self, ConfigError> {
        let patterns = expressions
            .iter()
            .map(|expr| {
                let expr = expr.as_ref();
                Regex::new(expr).map_err(|e| ConfigError::invalid_pattern(expr, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches somewhere in `name`
    pub fn matches_any(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }
}

/// Critical patterns keyed by the bucket they apply to
///
/// A pattern flags a dependency only inside the exact bucket it was registered
/// for: `MINOR:^foo$` marks `foo` when it is a MINOR update, not a MAJOR one.
#[derive(Debug, Clone, Default)]
pub struct CriticalPatterns {
    by_scope: BTreeMap<OutdatedScope, PatternSet>,
}

impl CriticalPatterns {
    /// Build from `[SCOPE:]pattern` expressions
    ///
    /// The scope defaults to MAJOR. When the same pattern is given for several
    /// scopes, the most severe one wins.
    pub fn from_expressions<S: AsRef<str>>(expressions: &[S]) -> Result<Self, ConfigError> {
        let mut scopes: BTreeMap<String, OutdatedScope> = BTreeMap::new();
        for expression in expressions {
            let (scope, pattern) = split_critical_expression(expression.as_ref())?;
            scopes
                .entry(pattern.to_string())
                .and_modify(|registered| {
                    *registered = OutdatedScope::most_severe([*registered, scope])
                        .unwrap_or(scope);
                })
                .or_insert(scope);
        }

        let mut grouped: BTreeMap<OutdatedScope, Vec<String>> = BTreeMap::new();
        for (pattern, scope) in scopes {
            grouped.entry(scope).or_default().push(pattern);
        }

        let by_scope = grouped
            .into_iter()
            .map(|(scope, patterns)| Ok((scope, PatternSet::compile(&patterns)?)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
        Ok(Self { by_scope })
    }

    /// True if `name` is critical within the `scope` bucket
    pub fn is_critical(&self, scope: OutdatedScope, name: &str) -> bool {
        self.by_scope
            .get(&scope)
            .is_some_and(|patterns| patterns.matches_any(name))
    }
}

/// Split `SCOPE:pattern` into its parts; a bare pattern is MAJOR
fn split_critical_expression(expression: &str) -> Result<(OutdatedScope, &str), ConfigError> {
    match expression.split_once(':') {
        None => Ok((OutdatedScope::Major, expression)),
        Some((scope, pattern)) => {
            let scope = OutdatedScope::parse_reportable(scope).map_err(|_| {
                ConfigError::InvalidCriticalExpression {
                    value: expression.to_string(),
                }
            })?;
            Ok((scope, pattern))
        }
    }
}
