//! Catalog maintenance commands: extract, init, update, compile and
//! machine translation.
//!
//! Every command shells out to the catalog tool through a [`CommandRunner`]
//! and reports through a [`Progress`] sink. A [`TranslationUpdated`] event is
//! emitted for each locale catalog created or updated.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use crate::{
    catalog::edit_catalog,
    config::Config,
    events::{EventBus, TranslationUpdated},
    extract::{ExtractSummary, Extractor, display_relative},
    placeholders::SentinelTemplate,
    progress::{Progress, SilentProgress},
    runner::{CommandRunner, Invocation},
    translate::{TranslateStats, Translator, translate_catalog},
};

pub const MASTER_CATALOG: &str = "messages.pot";
pub const LOCALE_CATALOG: &str = "LC_MESSAGES/messages.po";

pub const PLACEHOLDER_WARNING: &str = "WARNING: you must go through the translation after the process as placeholders may have been modified";

static SILENT: SilentProgress = SilentProgress;

pub struct Workflow<'a> {
    config: &'a Config,
    project_root: PathBuf,
    runner: &'a dyn CommandRunner,
    progress: &'a dyn Progress,
    events: Option<&'a EventBus<TranslationUpdated>>,
    translator: Option<&'a dyn Translator>,
    bin: String,
    keywords: Vec<String>,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a Config,
        project_root: impl Into<PathBuf>,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            runner,
            progress: &SILENT,
            events: None,
            translator: None,
            bin: config.bin.clone(),
            keywords: config.keywords.clone(),
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_events(mut self, events: &'a EventBus<TranslationUpdated>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Override the catalog tool executable.
    pub fn with_bin(mut self, bin: Option<String>) -> Self {
        if let Some(bin) = bin {
            self.bin = bin;
        }
        self
    }

    /// Extra extraction keywords, added before the configured ones.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        let configured = std::mem::take(&mut self.keywords);
        self.keywords = keywords;
        self.keywords.extend(configured);
        self
    }

    pub fn translations_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.translations_dir)
    }

    pub fn master_catalog(&self) -> PathBuf {
        self.translations_dir().join(MASTER_CATALOG)
    }

    pub fn locale_catalog(&self, locale: &str) -> PathBuf {
        self.translations_dir().join(locale).join(LOCALE_CATALOG)
    }

    /// Extract all source roots into the master catalog.
    pub fn extract(&self) -> Result<ExtractSummary> {
        Extractor::new(
            self.config,
            self.runner,
            self.progress,
            &self.project_root,
            &self.bin,
            &self.keywords,
        )
        .extract_all(&self.master_catalog())
    }

    /// Create the catalog for `locale`, extracting first when no master
    /// catalog exists yet.
    pub fn init(&self, locale: &str, gotrans: bool) -> Result<()> {
        if !self.master_catalog().exists() {
            self.extract()?;
        }

        self.progress.step(&format!(
            "Initializing new translation '{}' in {}",
            locale,
            display_relative(&self.translations_dir().join(locale), &self.project_root)
        ));
        self.run(
            Invocation::new(&self.bin)
                .arg("init")
                .arg("-i")
                .path_arg(&self.master_catalog())
                .arg("-d")
                .path_arg(&self.translations_dir())
                .arg("-l")
                .arg(locale),
        )?;
        self.emit(locale);

        if gotrans {
            self.translate(locale)?;
        }
        Ok(())
    }

    /// Refresh every locale catalog from the master catalog. Returns the
    /// locales found, in name order.
    ///
    /// Extraction is skipped only when `extract` is false and a master
    /// catalog already exists.
    pub fn update(&self, extract: bool, gotrans: bool) -> Result<Vec<String>> {
        if extract || !self.master_catalog().exists() {
            self.extract()?;
        }

        self.progress.step("Updating all translations");
        self.run(
            Invocation::new(&self.bin)
                .arg("update")
                .arg("-i")
                .path_arg(&self.master_catalog())
                .arg("-d")
                .path_arg(&self.translations_dir()),
        )?;

        let locales = self.locales()?;
        for locale in &locales {
            self.emit(locale);
            if gotrans {
                self.translate(locale)?;
            }
        }
        Ok(locales)
    }

    pub fn compile(&self) -> Result<()> {
        self.progress.step("Compiling all translations");
        self.run(
            Invocation::new(&self.bin)
                .arg("compile")
                .arg("-d")
                .path_arg(&self.translations_dir()),
        )
    }

    /// Machine-translate the untranslated entries of `locale`'s catalog.
    ///
    /// The catalog is written back only if every entry was translated.
    pub fn translate(&self, locale: &str) -> Result<TranslateStats> {
        let Some(translator) = self.translator else {
            bail!("No translator configured");
        };
        self.progress
            .step(&format!("Machine translating '{}'", locale));
        self.progress.warn(PLACEHOLDER_WARNING);

        let sentinel = SentinelTemplate::spaced();
        edit_catalog(&self.locale_catalog(locale), |catalog| {
            translate_catalog(catalog, translator, locale, &sentinel)
        })
        .with_context(|| format!("Failed to translate '{}'", locale))
    }

    /// Names of the locale directories under the translations directory.
    pub fn locales(&self) -> Result<Vec<String>> {
        let dir = self.translations_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut locales = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
            if entry.file_type().is_dir() {
                locales.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(locales)
    }

    fn run(&self, invocation: Invocation) -> Result<()> {
        self.runner.run(&invocation)
    }

    fn emit(&self, locale: &str) {
        if let Some(events) = self.events {
            events.emit(&TranslationUpdated {
                locale: locale.to_string(),
            });
        }
    }
}
