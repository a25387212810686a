//! Per-request locale, timezone and currency resolution.
//!
//! A [`RequestContext`] lives for exactly one request. Each of the three
//! values is resolved on first read and cached; later reads in the same
//! request see the same value until [`RequestContext::refresh`] is called.

use std::{cell::OnceCell, collections::HashMap};

use anyhow::{Result, bail};
use tracing::debug;

use super::{
    accept::AcceptLanguage,
    data::{BuiltinLocaleData, LocaleData},
    format::CurrencyNameTemplate,
    session::{CURRENCY_KEY, LOCALE_KEY, Session, TIMEZONE_KEY},
    user::UserProfile,
};
use crate::config::Config;

/// The request signals locale resolution reads from.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Query string arguments.
    pub args: HashMap<String, String>,
    pub accept_languages: AcceptLanguage,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, name: &str, value: impl Into<String>) -> Self {
        self.args.insert(name.to_string(), value.into());
        self
    }

    pub fn with_accept_language(mut self, header: &str) -> Self {
        self.accept_languages = AcceptLanguage::parse(header);
        self
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    RequestArg,
    User,
    Session,
    AcceptLanguage,
    Default,
}

/// Values computed for one request, ready for templates and formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub locale: String,
    pub timezone: String,
    pub currency: String,
    /// Name of the locale in its own language.
    pub language_name: String,
    /// The currency rendered through the configured display template.
    pub currency_name: String,
}

/// A configured locale with its names, for language pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOption {
    pub code: String,
    pub display_name: String,
    pub english_name: String,
}

/// A configured currency with its localized name and symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// List the configured locales with their native and English names.
pub fn available_locales(config: &Config, data: &dyn LocaleData) -> Vec<LocaleOption> {
    config
        .locales
        .iter()
        .map(|code| LocaleOption {
            code: code.clone(),
            display_name: data.display_name(code).unwrap_or_else(|| code.clone()),
            english_name: data.english_name(code).unwrap_or_else(|| code.clone()),
        })
        .collect()
}

pub struct RequestContext<'r> {
    config: &'r Config,
    request: &'r Request,
    session: &'r mut dyn Session,
    user: Option<&'r mut dyn UserProfile>,
    data: &'r dyn LocaleData,
    locale: OnceCell<String>,
    timezone: OnceCell<String>,
    currency: OnceCell<String>,
}

impl<'r> RequestContext<'r> {
    pub fn new(config: &'r Config, request: &'r Request, session: &'r mut dyn Session) -> Self {
        Self {
            config,
            request,
            session,
            user: None,
            data: &BuiltinLocaleData,
            locale: OnceCell::new(),
            timezone: OnceCell::new(),
            currency: OnceCell::new(),
        }
    }

    /// Attach the authenticated user, if any.
    pub fn with_user(mut self, user: &'r mut dyn UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_locale_data(mut self, data: &'r dyn LocaleData) -> Self {
        self.data = data;
        self
    }

    /// The user whose profile stores preferences, when that integration is on.
    fn stored_user(&self) -> Option<&dyn UserProfile> {
        if self.config.store_locale_in_user {
            self.user.as_deref()
        } else {
            None
        }
    }

    fn uses_user_store(&self) -> bool {
        self.stored_user().is_some()
    }

    pub fn locale(&self) -> &str {
        self.locale.get_or_init(|| {
            let (locale, source) = self.detect_locale();
            debug!(locale = %locale, ?source, "resolved locale");
            locale
        })
    }

    pub fn timezone(&self) -> &str {
        self.timezone.get_or_init(|| {
            let (timezone, source) = self.detect_timezone();
            debug!(timezone = %timezone, ?source, "resolved timezone");
            timezone
        })
    }

    pub fn currency(&self) -> &str {
        self.currency.get_or_init(|| {
            let (currency, source) = self.detect_currency();
            debug!(currency = %currency, ?source, "resolved currency");
            currency
        })
    }

    fn detect_locale(&self) -> (String, Source) {
        if self.config.extract_locale_from_request
            && let Some(locale) = non_empty(self.request.args.get(&self.config.request_arg).cloned())
        {
            return (locale, Source::RequestArg);
        }
        if let Some(locale) = non_empty(self.stored_user().and_then(|u| u.locale())) {
            return (locale, Source::User);
        }
        if let Some(locale) = non_empty(self.session.get(LOCALE_KEY)) {
            return (locale, Source::Session);
        }
        if let Some(locale) = self.negotiate_locale() {
            return (locale.to_string(), Source::AcceptLanguage);
        }
        (self.config.default_locale.clone(), Source::Default)
    }

    fn detect_timezone(&self) -> (String, Source) {
        if let Some(timezone) = non_empty(self.stored_user().and_then(|u| u.timezone())) {
            return (timezone, Source::User);
        }
        if let Some(timezone) = non_empty(self.session.get(TIMEZONE_KEY)) {
            return (timezone, Source::Session);
        }
        (self.config.default_timezone.clone(), Source::Default)
    }

    fn detect_currency(&self) -> (String, Source) {
        if let Some(currency) = non_empty(self.stored_user().and_then(|u| u.currency())) {
            return (currency, Source::User);
        }
        if let Some(currency) = non_empty(self.session.get(CURRENCY_KEY)) {
            return (currency, Source::Session);
        }
        (self.config.default_currency.clone(), Source::Default)
    }

    /// Best configured locale for the request's `Accept-Language`, if any.
    pub fn negotiate_locale(&self) -> Option<&'r str> {
        let config: &'r Config = self.config;
        self.request.accept_languages.best_match(&config.locales)
    }

    /// Forget cached values so the next read resolves again.
    pub fn refresh(&mut self) {
        self.locale.take();
        self.timezone.take();
        self.currency.take();
    }

    /// Persist a new locale on the user profile, or in the session when no
    /// stored user is available. With `refresh`, the current request sees the
    /// new value immediately.
    pub fn set_locale(&mut self, locale: &str, refresh: bool) -> Result<()> {
        if self.uses_user_store() {
            self.update_user(Some(locale), None, None)?;
        } else {
            self.session.set(LOCALE_KEY, locale.to_string());
        }
        if refresh {
            self.refresh();
        }
        Ok(())
    }

    pub fn set_timezone(&mut self, timezone: &str) -> Result<()> {
        if self.uses_user_store() {
            self.update_user(None, Some(timezone), None)
        } else {
            self.session.set(TIMEZONE_KEY, timezone.to_string());
            Ok(())
        }
    }

    pub fn set_currency(&mut self, currency: &str) -> Result<()> {
        if self.uses_user_store() {
            self.update_user(None, None, Some(currency))
        } else {
            self.session.set(CURRENCY_KEY, currency.to_string());
            Ok(())
        }
    }

    /// Write all three preferences to the authenticated user and save.
    ///
    /// Values not given are filled from the currently resolved ones.
    pub fn update_user(
        &mut self,
        locale: Option<&str>,
        timezone: Option<&str>,
        currency: Option<&str>,
    ) -> Result<()> {
        let (locale, timezone, currency) = self.fill_preferences(locale, timezone, currency);
        let Some(user) = self.user.as_deref_mut() else {
            bail!("No authenticated user to update");
        };
        write_preferences(user, locale, timezone, currency)
    }

    /// Seed a newly signed-up user with this request's preferences.
    ///
    /// Does nothing when preferences are not stored on users.
    pub fn on_user_signup(&self, user: &mut dyn UserProfile) -> Result<()> {
        if !self.config.store_locale_in_user {
            return Ok(());
        }
        let (locale, timezone, currency) = self.fill_preferences(None, None, None);
        write_preferences(user, locale, timezone, currency)
    }

    fn fill_preferences(
        &self,
        locale: Option<&str>,
        timezone: Option<&str>,
        currency: Option<&str>,
    ) -> (String, String, String) {
        (
            locale.unwrap_or_else(|| self.locale()).to_string(),
            timezone.unwrap_or_else(|| self.timezone()).to_string(),
            currency.unwrap_or_else(|| self.currency()).to_string(),
        )
    }

    /// Snapshot of the resolved values with their display strings.
    pub fn resolve(&self) -> Result<ResolvedContext> {
        let locale = self.locale().to_string();
        let currency = self.currency().to_string();
        let language_name = self
            .data
            .display_name(&locale)
            .or_else(|| self.data.english_name(&locale))
            .unwrap_or_else(|| locale.clone());
        let template = CurrencyNameTemplate::parse(&self.config.currency_name_format)?;
        let option = self.currency_option(&currency);
        let currency_name = template.render(&option.code, &option.name, &option.symbol);

        Ok(ResolvedContext {
            timezone: self.timezone().to_string(),
            locale,
            currency,
            language_name,
            currency_name,
        })
    }

    /// Configured currencies with names and symbols in the resolved locale.
    pub fn available_currencies(&self) -> Vec<CurrencyOption> {
        self.config
            .currencies
            .iter()
            .map(|code| self.currency_option(code))
            .collect()
    }

    fn currency_option(&self, code: &str) -> CurrencyOption {
        let locale = self.locale();
        CurrencyOption {
            code: code.to_string(),
            name: self
                .data
                .currency_name(locale, code)
                .unwrap_or_else(|| code.to_string()),
            symbol: self
                .data
                .currency_symbol(locale, code)
                .unwrap_or_else(|| code.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn write_preferences(
    user: &mut dyn UserProfile,
    locale: String,
    timezone: String,
    currency: String,
) -> Result<()> {
    user.set_locale(locale);
    user.set_timezone(timezone);
    user.set_currency(currency);
    user.save()
}
