use std::fmt;

/// Identity of a message inside a catalog: the source string plus its
/// optional disambiguating context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: Option<String>,
    pub id: String,
}

impl MessageKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            context: None,
            id: id.into(),
        }
    }

    pub fn with_context(context: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            id: id.into(),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{}|{}", context, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A single catalog entry.
///
/// The id (and context, and plural id) are fixed at construction. Only the
/// translated strings and the descriptive metadata can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    key: MessageKey,
    plural_id: Option<String>,
    /// One string for singular messages, one per plural form otherwise.
    strings: Vec<String>,
    /// Source references (`#: file.py:12`).
    pub locations: Vec<String>,
    /// Flags such as `fuzzy` or `python-format` (`#, ...`).
    pub flags: Vec<String>,
    /// Comments written by translators (`# ...`).
    pub translator_comments: Vec<String>,
    /// Comments extracted from source code (`#. ...`).
    pub extracted_comments: Vec<String>,
    /// Previous-id lines kept verbatim (`#| ...`), without the marker.
    pub previous: Vec<String>,
}

impl Message {
    pub fn new(id: impl Into<String>) -> Self {
        Self::from_key(MessageKey::new(id))
    }

    pub fn from_key(key: MessageKey) -> Self {
        Self {
            key,
            plural_id: None,
            strings: vec![String::new()],
            locations: Vec::new(),
            flags: Vec::new(),
            translator_comments: Vec::new(),
            extracted_comments: Vec::new(),
            previous: Vec::new(),
        }
    }

    /// A plural message with `forms` empty translations.
    pub fn plural(key: MessageKey, plural_id: impl Into<String>, forms: usize) -> Self {
        Self {
            plural_id: Some(plural_id.into()),
            strings: vec![String::new(); forms.max(1)],
            ..Self::from_key(key)
        }
    }

    pub fn with_string(mut self, string: impl Into<String>) -> Self {
        self.set_string(string);
        self
    }

    pub fn key(&self) -> &MessageKey {
        &self.key
    }

    pub fn id(&self) -> &str {
        &self.key.id
    }

    pub fn context(&self) -> Option<&str> {
        self.key.context.as_deref()
    }

    pub fn plural_id(&self) -> Option<&str> {
        self.plural_id.as_deref()
    }

    pub fn is_plural(&self) -> bool {
        self.plural_id.is_some()
    }

    /// The catalog header is the entry with an empty id and no context.
    pub fn is_header(&self) -> bool {
        self.key.id.is_empty() && self.key.context.is_none()
    }

    /// The singular translation (first plural form for plural messages).
    pub fn string(&self) -> &str {
        self.strings.first().map(String::as_str).unwrap_or_default()
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        match self.strings.first_mut() {
            Some(first) => *first = string.into(),
            None => self.strings.push(string.into()),
        }
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Replace every form. An empty list resets to a single empty form.
    pub fn set_strings(&mut self, strings: Vec<String>) {
        self.strings = if strings.is_empty() {
            vec![String::new()]
        } else {
            strings
        };
    }

    /// True when no form has been translated yet.
    pub fn is_untranslated(&self) -> bool {
        self.strings.iter().all(String::is_empty)
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|f| f == "fuzzy")
    }
}
