//! Extraction of translatable strings from one or more source roots.
//!
//! Each root is extracted on its own because the extraction tool's mapping
//! configuration cannot mix patterns for different roots. The application's
//! own root writes the master catalog directly; every other root writes a
//! temporary catalog that is merged into the master and then discarded.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    catalog::{MergeStats, edit_catalog, merge, po::read_po},
    config::Config,
    progress::Progress,
    runner::{CommandRunner, Invocation},
};

/// Translator functions whose string arguments are always extracted.
pub const BUILTIN_KEYWORDS: &[&str] = &["translate", "ntranslate", "lazy_translate", "lazy_gettext"];

/// A custom extraction rule: a mapping section with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Section header, e.g. `javascript:static/**.js`.
    pub method: String,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

/// An additional tree of sources contributing strings to the master catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRoot {
    pub path: PathBuf,
    #[serde(default)]
    pub template_dirs: Vec<String>,
    /// Extensions on top of the configured defaults.
    #[serde(default)]
    pub template_extensions: Vec<String>,
    #[serde(default)]
    pub extractors: Vec<ExtractorConfig>,
}

impl SourceRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template_dirs: Vec::new(),
            template_extensions: Vec::new(),
            extractors: Vec::new(),
        }
    }
}

/// The mapping configuration handed to the extraction tool for one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMapping {
    source_mapping: String,
    template_method: String,
    template_pattern: String,
    template_dirs: Vec<String>,
    template_extensions: Vec<String>,
    extractors: Vec<ExtractorConfig>,
}

impl ExtractionMapping {
    /// Mapping for the application's own root.
    pub fn for_primary(config: &Config) -> Self {
        Self {
            source_mapping: config.source_mapping.clone(),
            template_method: config.template_method.clone(),
            template_pattern: config.template_pattern.clone(),
            template_dirs: config.extract_template_dirs.clone(),
            template_extensions: config.extract_template_extensions.clone(),
            extractors: config.extractors.clone(),
        }
    }

    /// Mapping for an additional root: its own directories and extractors,
    /// its extensions followed by the configured defaults.
    pub fn for_root(config: &Config, root: &SourceRoot) -> Self {
        let mut template_extensions = root.template_extensions.clone();
        for ext in &config.extract_template_extensions {
            if !template_extensions.contains(ext) {
                template_extensions.push(ext.clone());
            }
        }
        Self {
            source_mapping: config.source_mapping.clone(),
            template_method: config.template_method.clone(),
            template_pattern: config.template_pattern.clone(),
            template_dirs: root.template_dirs.clone(),
            template_extensions,
            extractors: root.extractors.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut conf = format!("[{}]\n", self.source_mapping);
        let extensions = self.template_extensions.join(",");
        for dir in &self.template_dirs {
            conf.push_str(&format!(
                "[{}:{}/{}]\n",
                self.template_method,
                dir.trim_end_matches('/'),
                self.template_pattern
            ));
            if !extensions.is_empty() {
                conf.push_str(&format!("extensions={}\n", extensions));
            }
        }
        for extractor in &self.extractors {
            conf.push_str(&format!("[{}]\n", extractor.method));
            for (key, value) in &extractor.settings {
                conf.push_str(&format!("{} = {}\n", key, value));
            }
        }
        conf
    }
}

/// Split a comma-separated keyword list.
pub fn parse_keyword_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Caller keywords followed by the built-in ones, without duplicates.
pub fn keywords(extra: &[String]) -> Vec<String> {
    let mut all: Vec<String> = Vec::new();
    let builtin = BUILTIN_KEYWORDS.iter().map(|k| k.to_string());
    for keyword in extra.iter().cloned().chain(builtin) {
        if !all.contains(&keyword) {
            all.push(keyword);
        }
    }
    all
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Roots extracted, the primary one included.
    pub roots: usize,
    /// Messages in the master catalog afterwards.
    pub messages: usize,
    /// Result of merging the additional roots.
    pub merged: MergeStats,
}

/// Drives the extraction tool across all source roots.
pub struct Extractor<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    progress: &'a dyn Progress,
    project_root: &'a Path,
    bin: &'a str,
    keywords: Vec<String>,
}

impl<'a> Extractor<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        progress: &'a dyn Progress,
        project_root: &'a Path,
        bin: &'a str,
        extra_keywords: &[String],
    ) -> Self {
        Self {
            config,
            runner,
            progress,
            project_root,
            bin,
            keywords: keywords(extra_keywords),
        }
    }

    /// Extract every root into `master`, creating its directory if needed.
    pub fn extract_all(&self, master: &Path) -> Result<ExtractSummary> {
        if let Some(dir) = master.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        self.extract_root(
            Path::new("."),
            master,
            &ExtractionMapping::for_primary(self.config),
        )?;

        let mut merged = MergeStats::default();
        for root in &self.config.source_roots {
            merged += self.extract_and_merge(root, master)?;
        }

        let messages = read_po(master)?
            .iter()
            .filter(|message| !message.is_header())
            .count();
        Ok(ExtractSummary {
            roots: 1 + self.config.source_roots.len(),
            messages,
            merged,
        })
    }

    fn extract_and_merge(&self, root: &SourceRoot, master: &Path) -> Result<MergeStats> {
        let path = if root.path.is_absolute() {
            root.path.clone()
        } else {
            self.project_root.join(&root.path)
        };
        // Removed on drop, whichever way this function exits.
        let temp_catalog = tempfile::Builder::new()
            .prefix("polyglot-")
            .suffix(".pot")
            .tempfile()
            .context("Failed to create temporary catalog")?;

        self.extract_root(
            &path,
            temp_catalog.path(),
            &ExtractionMapping::for_root(self.config, root),
        )?;
        let source = read_po(temp_catalog.path())?;
        let stats = edit_catalog(master, |catalog| Ok(merge(catalog, source)))?;
        debug!(root = %path.display(), added = stats.added, "merged source root");
        Ok(stats)
    }

    fn extract_root(&self, root: &Path, output: &Path, mapping: &ExtractionMapping) -> Result<()> {
        let mut mapping_file =
            NamedTempFile::new().context("Failed to create mapping file")?;
        mapping_file
            .write_all(mapping.render().as_bytes())
            .and_then(|_| mapping_file.flush())
            .context("Failed to write mapping file")?;

        let mut invocation = Invocation::new(self.bin)
            .arg("extract")
            .arg("-o")
            .path_arg(output)
            .arg("-F")
            .path_arg(mapping_file.path());
        for keyword in &self.keywords {
            invocation = invocation.arg("-k").arg(keyword.as_str());
        }
        let invocation = invocation.path_arg(root);

        self.progress.step(&format!(
            "Extracting translatable strings from {} in {}",
            display_relative(root, self.project_root),
            display_relative(output, self.project_root)
        ));
        self.runner.run(&invocation)
    }
}

/// `path` relative to `base` when it lies inside it.
pub(crate) fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
