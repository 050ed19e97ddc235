//! Atlas: the outdated-dependency audit of one manifest
//!
//! Workflow: parse → filter (ignore patterns) → query all registries
//! concurrently → classify into scopes → render.
//!
//! Fatal errors (unreadable or malformed manifest, unknown manifest kind) can
//! only happen while parsing, before any query is issued. Registry failures
//! stay inside their dependency and surface as UNKNOWN.

use crate::domain::{Dependency, Ecosystem, ManifestKind, OutdatedScope};
use crate::error::AppError;
use crate::manifest::{get_parser, parse_manifest, DependencyInclusion, ParsedManifest};
use crate::matcher::{CriticalPatterns, PatternSet};
use crate::output::{ReportOptions, TextReport};
use crate::progress::Progress;
use crate::registry::RegistryAdapter;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Default limit of registry requests in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Settings consumed by the atlas, resolved once at start-up
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Reject non-conformant version literals instead of truncating qualifiers
    pub strict_semver: bool,
    /// Dependencies matching any of these never enter the atlas
    pub ignore: PatternSet,
    /// Dependencies to flag, per scope
    pub critical: CriticalPatterns,
    /// Which lock-file sections count as dependencies
    pub inclusion: DependencyInclusion,
    /// Maximum registry requests in flight
    pub concurrency: usize,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            strict_semver: false,
            ignore: PatternSet::default(),
            critical: CriticalPatterns::default(),
            inclusion: DependencyInclusion::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Dependencies of one manifest, grouped by how outdated they are
#[derive(Debug)]
pub struct Atlas {
    name: Option<String>,
    ecosystem: Ecosystem,
    strict_semver: bool,
    concurrency: usize,
    critical: CriticalPatterns,
    dependencies: Vec<Dependency>,
    /// Indices into `dependencies`, per scope
    outdated: BTreeMap<OutdatedScope, Vec<usize>>,
}

impl Atlas {
    /// Create an empty atlas for `ecosystem`
    pub fn new(ecosystem: Ecosystem, config: &AtlasConfig) -> Self {
        Self {
            name: None,
            ecosystem,
            strict_semver: config.strict_semver,
            concurrency: config.concurrency.max(1),
            critical: config.critical.clone(),
            dependencies: Vec::new(),
            outdated: BTreeMap::new(),
        }
    }

    /// Read and parse the manifest at `path`, dropping ignored dependencies
    pub fn from_path(path: &Path, config: &AtlasConfig) -> Result<Self, AppError> {
        let (kind, manifest) = parse_manifest(path, config.inclusion)?;
        info!(
            "{}: {} dependencies declared",
            path.display(),
            manifest.entries.len()
        );
        Ok(Self::from_manifest(kind, manifest, config))
    }

    /// Parse manifest content of a known kind
    pub fn from_content(
        kind: ManifestKind,
        content: &str,
        config: &AtlasConfig,
    ) -> Result<Self, AppError> {
        let manifest = get_parser(kind, config.inclusion).parse(content)?;
        Ok(Self::from_manifest(kind, manifest, config))
    }

    /// Build the dependency list from parsed entries
    pub fn from_manifest(kind: ManifestKind, manifest: ParsedManifest, config: &AtlasConfig) -> Self {
        let mut atlas = Self::new(kind.ecosystem(), config);
        atlas.name = manifest.root_name;

        for entry in manifest.entries {
            if config.ignore.matches_any(&entry.name) {
                debug!("{}: ignored", entry.name);
                continue;
            }
            atlas.append_dependency(Dependency::new(
                entry.name,
                entry.version,
                config.strict_semver,
            ));
        }

        atlas.sort_lexicographically();
        atlas
    }

    pub fn append_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    /// Stable sort by name; equal names keep manifest order
    pub fn sort_lexicographically(&mut self) {
        self.dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Resolve the latest release of every dependency
    pub async fn query_all(&mut self, registry: &dyn RegistryAdapter) {
        self.query_all_with_progress(registry, &Progress::disabled())
            .await
    }

    /// Resolve the latest release of every dependency, ticking `progress`
    ///
    /// One future per dependency, each holding the only mutable borrow of its
    /// dependency; returns once every query has finished.
    pub async fn query_all_with_progress(
        &mut self,
        registry: &dyn RegistryAdapter,
        progress: &Progress,
    ) {
        let semaphore = Semaphore::new(self.concurrency);
        let strict = self.strict_semver;

        let queries = self.dependencies.iter_mut().map(|dependency| {
            let semaphore = &semaphore;
            async move {
                if let Ok(_permit) = semaphore.acquire().await {
                    dependency.resolve_latest(registry, strict).await;
                }
                progress.inc();
            }
        });
        join_all(queries).await;
    }

    /// Group every dependency into its scope
    pub fn build_outdated_map(&mut self) {
        let mut outdated: BTreeMap<OutdatedScope, Vec<usize>> = OutdatedScope::all()
            .iter()
            .map(|scope| (*scope, Vec::new()))
            .collect();

        for (idx, dependency) in self.dependencies.iter().enumerate() {
            outdated.entry(dependency.classify()).or_default().push(idx);
        }
        self.outdated = outdated;
    }

    /// Query every registry, then classify
    pub async fn resolve(&mut self, registry: &dyn RegistryAdapter, progress: &Progress) {
        self.query_all_with_progress(registry, progress).await;
        self.build_outdated_map();
        info!(
            "{} major, {} minor, {} patch, {} unknown",
            self.count(OutdatedScope::Major),
            self.count(OutdatedScope::Minor),
            self.count(OutdatedScope::Patch),
            self.count(OutdatedScope::Unknown)
        );
    }

    /// Render the report; returns whether a critical dependency was printed
    pub fn report(&self, options: &ReportOptions, writer: &mut dyn Write) -> std::io::Result<bool> {
        TextReport::new(options.clone()).render(self, writer)
    }

    /// Dependencies in the `scope` bucket, in name order
    ///
    /// Empty until [`Atlas::build_outdated_map`] has run.
    pub fn bucket(&self, scope: OutdatedScope) -> impl Iterator<Item = &Dependency> + '_ {
        self.outdated
            .get(&scope)
            .into_iter()
            .flatten()
            .map(move |idx| &self.dependencies[*idx])
    }

    pub fn count(&self, scope: OutdatedScope) -> usize {
        self.outdated.get(&scope).map_or(0, Vec::len)
    }

    /// True if `dependency` matches a critical pattern registered for `scope`
    pub fn is_critical(&self, scope: OutdatedScope, dependency: &Dependency) -> bool {
        self.critical.is_critical(scope, &dependency.name)
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Registry answering from a fixed table; unknown names fail
    struct TableRegistry {
        releases: HashMap<String, Vec<String>>,
        calls: AtomicUsize,
    }

    impl TableRegistry {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            Self {
                releases: entries
                    .iter()
                    .map(|(name, versions)| {
                        (
                            name.to_string(),
                            versions.iter().map(|v| v.to_string()).collect(),
                        )
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RegistryAdapter for TableRegistry {
        fn registry_name(&self) -> &'static str {
            "table"
        }

        async fn fetch_versions(&self, package: &str) -> Result<Vec<String>, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.releases
                .get(package)
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, "table"))
        }
    }

    fn empty_atlas() -> Atlas {
        Atlas::new(Ecosystem::Go, &AtlasConfig::default())
    }

    fn go_mod_atlas(content: &str, config: &AtlasConfig) -> Atlas {
        Atlas::from_content(ManifestKind::GoMod, content, config).unwrap()
    }

    fn names<'a>(deps: impl Iterator<Item = &'a Dependency>) -> Vec<&'a str> {
        deps.map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_append_dependency() {
        let mut atlas = empty_atlas();
        let dep = Dependency::new("module", "v1.0.0", false);
        atlas.append_dependency(dep.clone());
        assert!(atlas.dependencies().contains(&dep));
    }

    #[test]
    fn test_sort_lexicographically() {
        let mut atlas = empty_atlas();
        atlas.append_dependency(Dependency::new("x", "v1.0.0", false));
        atlas.append_dependency(Dependency::new("_", "v1.0.0", false));
        atlas.sort_lexicographically();
        assert_eq!(atlas.dependencies()[0].name, "_");

        atlas.append_dependency(Dependency::new("__", "v1.0.0", false));
        atlas.sort_lexicographically();
        assert_eq!(atlas.dependencies()[1].name, "__");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut atlas = empty_atlas();
        atlas.append_dependency(Dependency::new("same", "v2.0.0", false));
        atlas.append_dependency(Dependency::new("a", "v1.0.0", false));
        atlas.append_dependency(Dependency::new("same", "v1.0.0", false));
        atlas.sort_lexicographically();

        let versions: Vec<_> = atlas
            .dependencies()
            .iter()
            .map(|d| d.declared_literal.as_str())
            .collect();
        assert_eq!(versions, vec!["v1.0.0", "v2.0.0", "v1.0.0"]);
    }

    #[test]
    fn test_from_manifest_sorts_and_names() {
        let atlas = go_mod_atlas(
            "module example.com/app\n\nrequire (\n\tz.io/z v1.0.0\n\ta.io/a v1.0.0\n)\n",
            &AtlasConfig::default(),
        );
        assert_eq!(atlas.name(), Some("example.com/app"));
        assert_eq!(atlas.ecosystem(), Ecosystem::Go);
        assert_eq!(names(atlas.dependencies().iter()), vec!["a.io/a", "z.io/z"]);
    }

    #[test]
    fn test_ignore_patterns_filter_before_queries() {
        let config = AtlasConfig {
            ignore: PatternSet::compile(&["^golang.org/x/"]).unwrap(),
            ..AtlasConfig::default()
        };
        let atlas = go_mod_atlas(
            "module m\n\nrequire (\n\tgolang.org/x/text v0.1.0\n\tgithub.com/a/b v1.0.0\n)\n",
            &config,
        );
        assert_eq!(names(atlas.dependencies().iter()), vec!["github.com/a/b"]);
    }

    #[test]
    fn test_from_content_malformed_is_fatal() {
        let result = Atlas::from_content(
            ManifestKind::GoMod,
            "module m\nrequire (\n",
            &AtlasConfig::default(),
        );
        assert!(matches!(result, Err(AppError::Manifest(_))));
    }

    #[tokio::test]
    async fn test_outdated_map_partitions_dependencies() {
        let registry = TableRegistry::new(&[
            ("major.io/m", &["v1.0.0", "v2.0.0"]),
            ("minor.io/m", &["v1.0.0", "v1.1.0"]),
            ("patch.io/m", &["v1.0.0", "v1.0.1"]),
            ("same.io/m", &["v1.0.0"]),
        ]);
        let mut atlas = go_mod_atlas(
            "module m\n\nrequire (\n\tmajor.io/m v1.0.0\n\tminor.io/m v1.0.0\n\tpatch.io/m v1.0.0\n\tsame.io/m v1.0.0\n\tmissing.io/m v1.0.0\n\tbroken.io/m master\n)\n",
            &AtlasConfig::default(),
        );
        atlas.resolve(&registry, &Progress::disabled()).await;

        assert_eq!(names(atlas.bucket(OutdatedScope::Major)), vec!["major.io/m"]);
        assert_eq!(names(atlas.bucket(OutdatedScope::Minor)), vec!["minor.io/m"]);
        assert_eq!(names(atlas.bucket(OutdatedScope::Patch)), vec!["patch.io/m"]);
        assert_eq!(names(atlas.bucket(OutdatedScope::UpToDate)), vec!["same.io/m"]);
        assert_eq!(
            names(atlas.bucket(OutdatedScope::Unknown)),
            vec!["broken.io/m", "missing.io/m"]
        );

        let total: usize = OutdatedScope::all().iter().map(|s| atlas.count(*s)).sum();
        assert_eq!(total, atlas.dependencies().len());
        for dep in atlas.dependencies() {
            let hits = OutdatedScope::all()
                .iter()
                .filter(|s| atlas.bucket(**s).any(|d| d.name == dep.name))
                .count();
            assert_eq!(hits, 1, "{}", dep.name);
        }
    }

    #[tokio::test]
    async fn test_unparseable_declared_is_never_queried() {
        let registry = TableRegistry::new(&[("broken.io/m", &["v2.0.0"])]);
        let mut atlas = go_mod_atlas("module m\n\nrequire broken.io/m master\n", &AtlasConfig::default());
        atlas.resolve(&registry, &Progress::disabled()).await;

        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
        assert_eq!(atlas.count(OutdatedScope::Unknown), 1);
    }

    #[tokio::test]
    async fn test_query_all_with_single_permit() {
        let registry = TableRegistry::new(&[("a.io/a", &["v1.2.0"]), ("b.io/b", &["v3.0.0"])]);
        let config = AtlasConfig {
            concurrency: 0,
            ..AtlasConfig::default()
        };
        let mut atlas = go_mod_atlas(
            "module m\n\nrequire (\n\ta.io/a v1.0.0\n\tb.io/b v1.0.0\n)\n",
            &config,
        );
        atlas.query_all(&registry).await;

        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
        assert!(atlas.dependencies().iter().all(|d| d.latest.is_some()));
    }

    #[test]
    fn test_bucket_empty_before_classification() {
        let atlas = go_mod_atlas("module m\n\nrequire a.io/a v1.0.0\n", &AtlasConfig::default());
        assert_eq!(atlas.bucket(OutdatedScope::Unknown).count(), 0);
        assert_eq!(atlas.count(OutdatedScope::Major), 0);
    }

    #[test]
    fn test_is_critical_uses_exact_scope() {
        let config = AtlasConfig {
            critical: CriticalPatterns::from_expressions(&["MAJOR:^foo$"]).unwrap(),
            ..AtlasConfig::default()
        };
        let atlas = Atlas::new(Ecosystem::Go, &config);
        let foo = Dependency::new("foo", "v1.0.0", false);
        assert!(atlas.is_critical(OutdatedScope::Major, &foo));
        assert!(!atlas.is_critical(OutdatedScope::Patch, &foo));
    }
}
