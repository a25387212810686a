//! Locale propagation through URL parameters.
//!
//! When the locale is taken from a request argument, that argument has to be
//! removed from route values before they reach handlers, and added back to
//! every generated URL so the choice sticks across links.

use std::collections::HashMap;

use super::accept::primary_language;
use crate::config::Config;

/// Remove the locale argument from matched route values.
///
/// Returns the removed value. Does nothing unless locale extraction from
/// requests is enabled.
pub fn strip_locale_param(config: &Config, values: &mut HashMap<String, String>) -> Option<String> {
    if !config.extract_locale_from_request {
        return None;
    }
    values.remove(&config.request_arg)
}

/// Add the current language to the values used to build a URL for `endpoint`.
///
/// Exempt endpoints (static files by default) and values that already carry
/// the argument are left alone. Only the primary language subtag is added.
pub fn add_locale_param(
    config: &Config,
    endpoint: &str,
    values: &mut HashMap<String, String>,
    locale: &str,
) {
    if !config.extract_locale_from_request
        || config
            .request_locale_arg_ignore_endpoints
            .iter()
            .any(|e| e == endpoint)
        || values.contains_key(&config.request_arg)
    {
        return;
    }
    values.insert(config.request_arg.clone(), primary_language(locale));
}
