//! Locale display names and currency metadata.
//!
//! The built-in tables cover common languages and currencies; applications
//! with wider needs plug in their own [`LocaleData`].

use super::accept::primary_language;

/// Source of human-readable names for locales and currencies.
pub trait LocaleData {
    /// Name of `locale` in its own language (e.g. "Français").
    fn display_name(&self, locale: &str) -> Option<String>;
    /// Name of `locale` in English (e.g. "French").
    fn english_name(&self, locale: &str) -> Option<String>;
    /// Name of currency `code` as written in `locale`.
    fn currency_name(&self, locale: &str, code: &str) -> Option<String>;
    /// Symbol of currency `code` as written in `locale`.
    fn currency_symbol(&self, locale: &str, code: &str) -> Option<String>;
}

/// (language, native name, English name)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("ar", "العربية", "Arabic"),
    ("de", "Deutsch", "German"),
    ("en", "English", "English"),
    ("es", "español", "Spanish"),
    ("fr", "français", "French"),
    ("it", "italiano", "Italian"),
    ("ja", "日本語", "Japanese"),
    ("ko", "한국어", "Korean"),
    ("nl", "Nederlands", "Dutch"),
    ("pl", "polski", "Polish"),
    ("pt", "português", "Portuguese"),
    ("ru", "русский", "Russian"),
    ("sv", "svenska", "Swedish"),
    ("zh", "中文", "Chinese"),
];

/// (code, English, French, German, Spanish)
const CURRENCY_NAMES: &[(&str, &str, &str, &str, &str)] = &[
    ("AUD", "Australian Dollar", "dollar australien", "Australischer Dollar", "dólar australiano"),
    ("CAD", "Canadian Dollar", "dollar canadien", "Kanadischer Dollar", "dólar canadiense"),
    ("CHF", "Swiss Franc", "franc suisse", "Schweizer Franken", "franco suizo"),
    ("CNY", "Chinese Yuan", "yuan renminbi chinois", "Renminbi Yuan", "yuan"),
    ("EUR", "Euro", "euro", "Euro", "euro"),
    ("GBP", "British Pound", "livre sterling", "Britisches Pfund", "libra esterlina"),
    ("JPY", "Japanese Yen", "yen japonais", "Japanischer Yen", "yen"),
    ("USD", "US Dollar", "dollar des États-Unis", "US-Dollar", "dólar estadounidense"),
];

/// (code, default symbol)
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("AUD", "A$"),
    ("CAD", "CA$"),
    ("CHF", "CHF"),
    ("CNY", "CN¥"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("USD", "$"),
];

/// (language, code, symbol) where a language writes a symbol differently.
const LOCAL_SYMBOLS: &[(&str, &str, &str)] = &[
    ("fr", "AUD", "$AU"),
    ("fr", "CAD", "$CA"),
    ("fr", "USD", "$US"),
    ("fr", "JPY", "JPY"),
    ("fr", "GBP", "£GB"),
    ("ja", "JPY", "￥"),
    ("zh", "CNY", "¥"),
];

/// Locale data compiled into the crate.
///
/// Display names cover the fourteen languages in `LANGUAGES`, and the eight
/// currencies in `CURRENCY_NAMES`. Currency names are localized for English,
/// French, German and Spanish only; any other locale gets the English name
/// (a `ja` request sees "US Dollar"). Lookups outside these tables return
/// `None`. Supply a full CLDR-backed [`LocaleData`] when more is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLocaleData;

fn language_entry(locale: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    let language = primary_language(locale);
    LANGUAGES.iter().find(|(code, _, _)| *code == language)
}

impl LocaleData for BuiltinLocaleData {
    fn display_name(&self, locale: &str) -> Option<String> {
        language_entry(locale).map(|(_, native, _)| native.to_string())
    }

    fn english_name(&self, locale: &str) -> Option<String> {
        language_entry(locale).map(|(_, _, english)| english.to_string())
    }

    fn currency_name(&self, locale: &str, code: &str) -> Option<String> {
        let (_, en, fr, de, es) = CURRENCY_NAMES.iter().find(|entry| entry.0 == code)?;
        let name = match primary_language(locale).as_str() {
            "fr" => fr,
            "de" => de,
            "es" => es,
            _ => en,
        };
        Some(name.to_string())
    }

    fn currency_symbol(&self, locale: &str, code: &str) -> Option<String> {
        let language = primary_language(locale);
        LOCAL_SYMBOLS
            .iter()
            .find(|(lang, c, _)| *lang == language && *c == code)
            .map(|(_, _, symbol)| symbol)
            .or_else(|| {
                CURRENCY_SYMBOLS
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|(_, symbol)| symbol)
            })
            .map(|symbol| symbol.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        let data = BuiltinLocaleData;
        assert_eq!(data.display_name("fr").as_deref(), Some("français"));
        assert_eq!(data.english_name("fr-CA").as_deref(), Some("French"));
        assert_eq!(data.display_name("xx"), None);
    }

    #[test]
    fn test_currency_names_are_localized() {
        let data = BuiltinLocaleData;
        assert_eq!(data.currency_name("en", "USD").as_deref(), Some("US Dollar"));
        assert_eq!(data.currency_name("de-AT", "EUR").as_deref(), Some("Euro"));
        assert_eq!(
            data.currency_name("ja", "GBP").as_deref(),
            Some("British Pound")
        );
        assert_eq!(data.currency_name("en", "XYZ"), None);
    }

    #[test]
    fn test_currency_symbols() {
        let data = BuiltinLocaleData;
        assert_eq!(data.currency_symbol("en", "USD").as_deref(), Some("$"));
        assert_eq!(data.currency_symbol("fr", "USD").as_deref(), Some("$US"));
        assert_eq!(data.currency_symbol("fr", "EUR").as_deref(), Some("€"));
        assert_eq!(data.currency_symbol("en", "XYZ"), None);
    }
}
