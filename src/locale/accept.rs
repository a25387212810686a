//! `Accept-Language` parsing and negotiation against supported locales.

use fluent_langneg::{NegotiationStrategy, negotiate_languages};
use unic_langid::LanguageIdentifier;

/// One language range from the header: a tag or the `*` wildcard.
#[derive(Debug, Clone, PartialEq)]
enum LanguageRange {
    Any,
    Tag(LanguageIdentifier),
}

impl LanguageRange {
    fn specificity(&self) -> u8 {
        match self {
            LanguageRange::Any => 0,
            LanguageRange::Tag(_) => 1,
        }
    }

    fn matches(&self, locale: &LanguageIdentifier) -> bool {
        match self {
            LanguageRange::Any => true,
            LanguageRange::Tag(tag) => tag == locale,
        }
    }
}

/// A configured locale paired with its parsed identifier.
#[derive(Debug, PartialEq)]
struct Supported<'a> {
    tag: &'a str,
    id: LanguageIdentifier,
}

impl AsRef<LanguageIdentifier> for Supported<'_> {
    fn as_ref(&self) -> &LanguageIdentifier {
        &self.id
    }
}

/// A parsed `Accept-Language` header, ordered by descending quality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptLanguage {
    entries: Vec<(LanguageRange, f32)>,
}

impl AcceptLanguage {
    /// Parse a header value such as `fr-CH, fr;q=0.9, en;q=0.8, *;q=0.5`.
    ///
    /// Malformed quality values count as 1.0. Entries with quality 0 and
    /// tags that are not valid language identifiers are dropped.
    pub fn parse(header: &str) -> Self {
        let mut entries: Vec<(LanguageRange, f32)> = header
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                let range = match tag {
                    "" => return None,
                    "*" => LanguageRange::Any,
                    tag => LanguageRange::Tag(tag.parse().ok()?),
                };
                let quality = pieces
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0);
                (quality > 0.0).then_some((range, quality))
            })
            .collect();
        // Stable sort keeps header order among equal qualities.
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The accepted tags in preference order, `*` included.
    pub fn tags(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|(range, _)| match range {
            LanguageRange::Any => "*".to_string(),
            LanguageRange::Tag(tag) => tag.to_string(),
        })
    }

    /// Pick the supported locale the client prefers most.
    ///
    /// Exact tag matches (case and `-`/`_` insensitive, `*` matching anything)
    /// are considered first. At equal quality an explicit tag beats `*`, and
    /// remaining ties go to the earlier supported locale. When nothing
    /// matches exactly, the accepted tags are negotiated as ranges, so
    /// `fr-CA` accepts `fr` and `en` accepts `en-US`.
    pub fn best_match<'a>(&self, supported: &'a [String]) -> Option<&'a str> {
        let available: Vec<Supported<'a>> = supported
            .iter()
            .filter_map(|tag| {
                Some(Supported {
                    tag: tag.as_str(),
                    id: tag.parse().ok()?,
                })
            })
            .collect();
        self.exact_match(&available)
            .or_else(|| self.range_match(&available))
    }

    fn exact_match<'a>(&self, available: &[Supported<'a>]) -> Option<&'a str> {
        let mut best: Option<(&'a str, f32, u8)> = None;
        for server in available {
            for (range, quality) in &self.entries {
                let specificity = range.specificity();
                let better = best.is_none_or(|(_, best_quality, best_specificity)| {
                    *quality > best_quality
                        || (*quality == best_quality && specificity > best_specificity)
                });
                if better && range.matches(&server.id) {
                    best = Some((server.tag, *quality, specificity));
                }
            }
        }
        best.map(|(tag, _, _)| tag)
    }

    fn range_match<'a>(&self, available: &[Supported<'a>]) -> Option<&'a str> {
        let requested: Vec<LanguageIdentifier> = self
            .entries
            .iter()
            .filter_map(|(range, _)| match range {
                LanguageRange::Tag(tag) => Some(tag.clone()),
                LanguageRange::Any => None,
            })
            .collect();
        negotiate_languages(
            &requested,
            available,
            None,
            NegotiationStrategy::Filtering,
        )
        .first()
        .map(|supported| supported.tag)
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// The primary language subtag of `tag`, lowercased.
pub fn primary_language(tag: &str) -> String {
    match tag.parse::<LanguageIdentifier>() {
        Ok(langid) => langid.language.as_str().to_string(),
        Err(_) => normalize(tag)
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
