use std::collections::HashMap;

pub const LOCALE_KEY: &str = "locale";
pub const TIMEZONE_KEY: &str = "timezone";
pub const CURRENCY_KEY: &str = "currency";

/// Per-visitor key/value storage owned by the web framework.
pub trait Session {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory session, for tests and for frameworks that hand over a map.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl Session for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
