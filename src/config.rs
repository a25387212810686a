use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    extract::{ExtractorConfig, SourceRoot},
    locale::{format::CurrencyNameTemplate, user::UserAttributes},
};

pub const CONFIG_FILE_NAME: &str = ".polyglotrc.json";

/// Template-engine extensions enabled for every template directory.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &[
    "jinja2.ext.autoescape",
    "jinja2.ext.with_",
    "jinja2.ext.do",
    "frasco.templating.RemoveYamlFrontMatterExtension",
    "jinja_layout.LayoutExtension",
    "jinja_macro_tags.LoadMacroExtension",
    "jinja_macro_tags.CallMacroTagExtension",
    "jinja_macro_tags.JinjaMacroTagsExtension",
    "jinja_macro_tags.HtmlMacroTagsExtension",
    "frasco.templating.FlashMessagesExtension",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_currency_name_format")]
    pub currency_name_format: String,

    #[serde(default = "default_true")]
    pub store_locale_in_user: bool,
    #[serde(default = "default_user_locale_attribute")]
    pub user_locale_attribute: String,
    #[serde(default = "default_user_timezone_attribute")]
    pub user_timezone_attribute: String,
    #[serde(default = "default_user_currency_attribute")]
    pub user_currency_attribute: String,

    #[serde(default)]
    pub extract_locale_from_request: bool,
    #[serde(default = "default_request_arg")]
    pub request_arg: String,
    #[serde(default = "default_ignore_endpoints")]
    pub request_locale_arg_ignore_endpoints: Vec<String>,

    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
    #[serde(default = "default_bin")]
    pub bin: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_source_mapping")]
    pub source_mapping: String,
    #[serde(default = "default_template_method")]
    pub template_method: String,
    #[serde(default = "default_template_pattern")]
    pub template_pattern: String,
    #[serde(default = "default_extract_template_dirs")]
    pub extract_template_dirs: Vec<String>,
    #[serde(default = "default_extract_template_extensions")]
    pub extract_template_extensions: Vec<String>,
    #[serde(default)]
    pub extractors: Vec<ExtractorConfig>,
    #[serde(default)]
    pub source_roots: Vec<SourceRoot>,
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_currencies() -> Vec<String> {
    vec!["USD".to_string()]
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_currency_name_format() -> String {
    "{name} ({symbol})".to_string()
}

fn default_true() -> bool {
    true
}

fn default_user_locale_attribute() -> String {
    "locale".to_string()
}

fn default_user_timezone_attribute() -> String {
    "timezone".to_string()
}

fn default_user_currency_attribute() -> String {
    "currency".to_string()
}

fn default_request_arg() -> String {
    "locale".to_string()
}

fn default_ignore_endpoints() -> Vec<String> {
    ["static", "static_upload"].map(String::from).to_vec()
}

fn default_translations_dir() -> String {
    "translations".to_string()
}

fn default_bin() -> String {
    "pybabel".to_string()
}

fn default_source_mapping() -> String {
    "python:**.py".to_string()
}

fn default_template_method() -> String {
    "jinja2".to_string()
}

fn default_template_pattern() -> String {
    "**.html".to_string()
}

fn default_extract_template_dirs() -> Vec<String> {
    ["views", "templates", "emails", "features"]
        .map(String::from)
        .to_vec()
}

fn default_extract_template_extensions() -> Vec<String> {
    DEFAULT_TEMPLATE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_locale: default_locale(),
            default_timezone: default_timezone(),
            currencies: default_currencies(),
            default_currency: default_currency(),
            currency_name_format: default_currency_name_format(),
            store_locale_in_user: default_true(),
            user_locale_attribute: default_user_locale_attribute(),
            user_timezone_attribute: default_user_timezone_attribute(),
            user_currency_attribute: default_user_currency_attribute(),
            extract_locale_from_request: false,
            request_arg: default_request_arg(),
            request_locale_arg_ignore_endpoints: default_ignore_endpoints(),
            translations_dir: default_translations_dir(),
            bin: default_bin(),
            keywords: Vec::new(),
            source_mapping: default_source_mapping(),
            template_method: default_template_method(),
            template_pattern: default_template_pattern(),
            extract_template_dirs: default_extract_template_dirs(),
            extract_template_extensions: default_extract_template_extensions(),
            extractors: Vec::new(),
            source_roots: Vec::new(),
        }
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending field for malformed locale tags,
    /// currency codes, currency templates or extraction settings.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!("'locales' must list at least one locale");
        }
        for locale in &self.locales {
            locale
                .parse::<LanguageIdentifier>()
                .with_context(|| format!("Invalid locale in 'locales': \"{}\"", locale))?;
        }
        self.default_locale
            .parse::<LanguageIdentifier>()
            .with_context(|| {
                format!("Invalid 'defaultLocale': \"{}\"", self.default_locale)
            })?;

        for code in &self.currencies {
            if !is_currency_code(code) {
                bail!("Invalid currency code in 'currencies': \"{}\"", code);
            }
        }
        if !self.currencies.contains(&self.default_currency) {
            bail!(
                "'defaultCurrency' \"{}\" is not listed in 'currencies'",
                self.default_currency
            );
        }
        CurrencyNameTemplate::parse(&self.currency_name_format).with_context(|| {
            format!(
                "Invalid 'currencyNameFormat': \"{}\"",
                self.currency_name_format
            )
        })?;

        if self.default_timezone.trim().is_empty() {
            bail!("'defaultTimezone' must not be empty");
        }
        if self.request_arg.trim().is_empty() {
            bail!("'requestArg' must not be empty");
        }
        if !self.source_mapping.contains(':') {
            bail!(
                "'sourceMapping' must look like \"method:pattern\", found \"{}\"",
                self.source_mapping
            );
        }
        for extractor in self.extractors.iter().chain(
            self.source_roots
                .iter()
                .flat_map(|root| root.extractors.iter()),
        ) {
            if extractor.method.trim().is_empty() {
                bail!("Extractor entries must name a 'method'");
            }
        }

        Ok(())
    }

    pub fn user_attributes(&self) -> UserAttributes {
        UserAttributes {
            locale: self.user_locale_attribute.clone(),
            timezone: self.user_timezone_attribute.clone(),
            currency: self.user_currency_attribute.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
