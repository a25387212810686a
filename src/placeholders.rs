//! Placeholder protection for machine translation.
//!
//! Free-text translation services tend to mangle `%(name)s` format
//! placeholders (translating the name, dropping the parentheses, moving the
//! trailing `s`). Before a string is sent out, every named placeholder is
//! swapped for a positional sentinel such as `##0##`, which survives
//! translation as inert text, and swapped back afterwards.
//!
//! ```
//! use polyglot::placeholders::{decode, encode, SentinelTemplate};
//!
//! let sentinel = SentinelTemplate::default();
//! let encoded = encode("Hello %(name)s, you have %(count)s messages", &sentinel);
//! assert_eq!(encoded.text, "Hello ##0##, you have ##1## messages");
//! assert_eq!(encoded.placeholders, vec!["name", "count"]);
//!
//! let restored = decode(&encoded.text, &encoded.placeholders, &sentinel);
//! assert_eq!(restored, "Hello %(name)s, you have %(count)s messages");
//! ```

use std::{fmt, str::FromStr, sync::LazyLock};

use anyhow::{Result, bail};
use regex::{Captures, Regex};

static NAMED_PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\(([A-Za-z_][A-Za-z0-9_]*)\)s").unwrap());

/// Marker inside a sentinel template that is replaced by the placeholder index.
const INDEX_MARKER: &str = "{}";

/// Shape of the positional token that stands in for a named placeholder.
///
/// The template holds exactly one `{}` marking where the zero-based index goes,
/// e.g. `##{}##` renders index 2 as `##2##`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelTemplate {
    prefix: String,
    suffix: String,
}

impl SentinelTemplate {
    pub fn new(template: &str) -> Result<Self> {
        let Some((prefix, suffix)) = template.split_once(INDEX_MARKER) else {
            bail!("Sentinel template must contain '{{}}': \"{}\"", template);
        };
        if suffix.contains(INDEX_MARKER) {
            bail!(
                "Sentinel template must contain '{{}}' exactly once: \"{}\"",
                template
            );
        }
        if prefix.is_empty() && suffix.is_empty() {
            bail!("Sentinel template must have text around '{{}}'");
        }
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Sentinel with spaces around the index, used around machine translation.
    pub fn spaced() -> Self {
        Self {
            prefix: "## ".to_string(),
            suffix: " ##".to_string(),
        }
    }

    pub fn render(&self, index: usize) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }
}

impl Default for SentinelTemplate {
    fn default() -> Self {
        Self {
            prefix: "##".to_string(),
            suffix: "##".to_string(),
        }
    }
}

impl FromStr for SentinelTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for SentinelTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, INDEX_MARKER, self.suffix)
    }
}

/// Output of [`encode`]: the protected text and the placeholder names by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub text: String,
    pub placeholders: Vec<String>,
}

/// Replace each `%(name)s` in `s`, left to right, with a sentinel carrying its index.
pub fn encode(s: &str, sentinel: &SentinelTemplate) -> Encoded {
    let mut placeholders = Vec::new();
    let text = NAMED_PLACEHOLDER_REGEX
        .replace_all(s, |caps: &Captures| {
            placeholders.push(caps[1].to_string());
            sentinel.render(placeholders.len() - 1)
        })
        .into_owned();
    Encoded { text, placeholders }
}

/// Restore named placeholders from their sentinels.
///
/// Sentinels the translation step mangled or dropped cannot be recognized and
/// are left as they are.
pub fn decode(s: &str, placeholders: &[String], sentinel: &SentinelTemplate) -> String {
    // Highest index first so `##1##` is never replaced inside `##11##`-style
    // sentinels when the template has no suffix.
    let mut result = s.to_string();
    for (index, name) in placeholders.iter().enumerate().rev() {
        result = result.replace(&sentinel.render(index), &format!("%({})s", name));
    }
    result
}
