//! Locale preferences stored on the authenticated user.

use anyhow::Result;

/// The three preference attributes a user store must expose.
pub trait UserProfile {
    fn locale(&self) -> Option<String>;
    fn timezone(&self) -> Option<String>;
    fn currency(&self) -> Option<String>;

    fn set_locale(&mut self, locale: String);
    fn set_timezone(&mut self, timezone: String);
    fn set_currency(&mut self, currency: String);

    /// Persist pending changes.
    fn save(&mut self) -> Result<()>;
}

/// Attribute names the preferences live under in a generic user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttributes {
    pub locale: String,
    pub timezone: String,
    pub currency: String,
}

impl Default for UserAttributes {
    fn default() -> Self {
        Self {
            locale: "locale".to_string(),
            timezone: "timezone".to_string(),
            currency: "currency".to_string(),
        }
    }
}

/// A user record addressed by attribute name (a database row, a document).
pub trait AttributeStore {
    fn get(&self, attribute: &str) -> Option<String>;
    fn set(&mut self, attribute: &str, value: String);
    fn save(&mut self) -> Result<()>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for &mut S {
    fn get(&self, attribute: &str) -> Option<String> {
        (**self).get(attribute)
    }

    fn set(&mut self, attribute: &str, value: String) {
        (**self).set(attribute, value)
    }

    fn save(&mut self) -> Result<()> {
        (**self).save()
    }
}

/// Adapts an [`AttributeStore`] to [`UserProfile`] using attribute names
/// chosen at configuration time.
pub struct AttributeProfile<S> {
    store: S,
    attributes: UserAttributes,
}

impl<S: AttributeStore> AttributeProfile<S> {
    pub fn new(store: S, attributes: UserAttributes) -> Self {
        Self { store, attributes }
    }
}

impl<S: AttributeStore> UserProfile for AttributeProfile<S> {
    fn locale(&self) -> Option<String> {
        self.store.get(&self.attributes.locale)
    }

    fn timezone(&self) -> Option<String> {
        self.store.get(&self.attributes.timezone)
    }

    fn currency(&self) -> Option<String> {
        self.store.get(&self.attributes.currency)
    }

    fn set_locale(&mut self, locale: String) {
        self.store.set(&self.attributes.locale, locale);
    }

    fn set_timezone(&mut self, timezone: String) {
        self.store.set(&self.attributes.timezone, timezone);
    }

    fn set_currency(&mut self, currency: String) {
        self.store.set(&self.attributes.currency, currency);
    }

    fn save(&mut self) -> Result<()> {
        self.store.save()
    }
}
