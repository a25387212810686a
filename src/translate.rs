//! Machine translation of untranslated catalog entries.
//!
//! Named placeholders are swapped for numbered sentinels before the text is
//! sent out and restored afterwards, so the service never sees `%(name)s`.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::{
    catalog::{Catalog, po::header_field},
    placeholders::{SentinelTemplate, decode, encode},
};

const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates text into a target locale.
pub trait Translator {
    fn translate(&self, text: &str, target_locale: &str) -> Result<String>;
}

/// The public Google Translate endpoint, source language auto-detected.
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(GOOGLE_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target_locale: &str) -> Result<String> {
        let target = target_locale.replace('_', "-");
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .with_context(|| format!("Translation request to '{}' failed", target))?;
        parse_google_response(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
fn parse_google_response(body: &str) -> Result<String> {
    let value: Value =
        serde_json::from_str(body).context("Translation service returned invalid JSON")?;
    let Some(segments) = value.get(0).and_then(Value::as_array) else {
        bail!("Unexpected translation response: {}", body);
    };
    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateStats {
    pub translated: usize,
    /// Entries left alone because they already carried a translation.
    pub skipped: usize,
}

/// Translate `text` with its named placeholders protected.
pub fn translate_protected(
    translator: &dyn Translator,
    text: &str,
    target_locale: &str,
    sentinel: &SentinelTemplate,
) -> Result<String> {
    let encoded = encode(text, sentinel);
    let translated = translator.translate(&encoded.text, target_locale)?;
    Ok(decode(&translated, &encoded.placeholders, sentinel))
}

/// Fill every untranslated entry of `catalog` with a machine translation.
///
/// The header and entries that already have a translation are kept. For
/// plural entries the first form comes from the singular id and every other
/// form from the plural id. The form count is the header's `nplurals`, or the
/// entry's own count when the header has none. The first failure aborts and
/// is returned.
pub fn translate_catalog(
    catalog: &mut Catalog,
    translator: &dyn Translator,
    target_locale: &str,
    sentinel: &SentinelTemplate,
) -> Result<TranslateStats> {
    let header_forms = catalog
        .header()
        .and_then(|header| plural_form_count(header.string()));
    let mut stats = TranslateStats::default();
    for message in catalog.iter_mut() {
        if message.id().is_empty() {
            continue;
        }
        if !message.is_untranslated() {
            stats.skipped += 1;
            continue;
        }

        let singular = translate_protected(translator, message.id(), target_locale, sentinel)?;
        match message.plural_id().map(str::to_string) {
            Some(plural_id) => {
                let plural = translate_protected(translator, &plural_id, target_locale, sentinel)?;
                let forms = header_forms.unwrap_or(message.strings().len());
                let mut strings = vec![singular];
                strings.resize(forms, plural);
                message.set_strings(strings);
            }
            None => message.set_string(singular),
        }
        debug!(id = message.id(), "machine translated");
        stats.translated += 1;
    }
    Ok(stats)
}

/// `nplurals` from a header's `Plural-Forms` field.
fn plural_form_count(header: &str) -> Option<usize> {
    header_field(header, "Plural-Forms")?
        .split(';')
        .find_map(|part| part.trim().strip_prefix("nplurals=").map(str::to_string))
        .and_then(|count| count.trim().parse().ok())
        .filter(|count| *count > 0)
}
