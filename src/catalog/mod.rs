//! Message catalogs.
//!
//! ## Module Structure
//!
//! - `message`: `Message` and `MessageKey`
//! - `po`: gettext PO reader and writer
//! - `merge`: first-writer-wins union of catalogs
//! - `file`: scoped open / mutate / write-back of catalog files

pub mod file;
pub mod merge;
pub mod message;
pub mod po;

use std::collections::HashMap;

pub use file::{CatalogFile, edit_catalog};
pub use merge::{MergeStats, merge};
pub use message::{Message, MessageKey};

/// An ordered collection of messages with unique keys.
///
/// Insertion order is preserved for output; a key index gives constant-time
/// membership checks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: Option<String>,
    messages: Vec<Message>,
    index: HashMap<MessageKey, usize>,
    /// Entries marked obsolete (`#~`). Kept for round-tripping, never indexed.
    obsolete: Vec<Message>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            ..Self::default()
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    /// Insert `message` unless its key is already present.
    ///
    /// Returns false (and drops `message`) when an entry with the same key exists.
    pub fn insert(&mut self, message: Message) -> bool {
        if self.index.contains_key(message.key()) {
            return false;
        }
        self.index.insert(message.key().clone(), self.messages.len());
        self.messages.push(message);
        true
    }

    pub fn contains(&self, key: &MessageKey) -> bool {
        self.index.contains_key(key)
    }

    /// Membership by id alone, for messages without context.
    pub fn contains_id(&self, id: &str) -> bool {
        self.contains(&MessageKey::new(id))
    }

    pub fn get(&self, key: &MessageKey) -> Option<&Message> {
        self.index.get(key).map(|&i| &self.messages[i])
    }

    pub fn get_mut(&mut self, key: &MessageKey) -> Option<&mut Message> {
        self.index.get(key).map(|&i| &mut self.messages[i])
    }

    pub fn header(&self) -> Option<&Message> {
        self.get(&MessageKey::new(""))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Mutable access to entries. Keys are immutable, so the index stays valid.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Message> {
        self.messages.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.messages.iter().map(Message::key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn obsolete(&self) -> &[Message] {
        &self.obsolete
    }

    pub fn push_obsolete(&mut self, message: Message) {
        self.obsolete.push(message);
    }
}

impl IntoIterator for Catalog {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
