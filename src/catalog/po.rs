//! gettext PO catalog reader and writer.
//!
//! Handles the subset of the format produced by extraction tools: comments of
//! every kind, `msgctxt`, plural forms, multi-line strings and obsolete
//! (`#~`) entries. Line wrapping is not reproduced on output.

use std::{fmt::Write as _, fs, path::Path};

use anyhow::{Context, Result, bail};
use tracing::warn;

use super::{Catalog, Message, MessageKey};

/// Read and parse a PO file.
pub fn read_po(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    parse_po(&content).with_context(|| format!("Failed to parse catalog: {}", path.display()))
}

/// Serialize and write a catalog to `path`.
pub fn write_po(path: &Path, catalog: &Catalog) -> Result<()> {
    fs::write(path, to_po_string(catalog))
        .with_context(|| format!("Failed to write catalog: {}", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    PluralId,
    Str(usize),
}

#[derive(Debug, Default)]
struct PendingEntry {
    context: Option<String>,
    id: Option<String>,
    plural_id: Option<String>,
    strings: Vec<(usize, String)>,
    locations: Vec<String>,
    flags: Vec<String>,
    translator_comments: Vec<String>,
    extracted_comments: Vec<String>,
    previous: Vec<String>,
    obsolete: bool,
    current: Option<Field>,
}

impl PendingEntry {
    fn has_strings(&self) -> bool {
        !self.strings.is_empty()
    }

    fn append(&mut self, field: Field, text: &str) {
        match field {
            Field::Context => self.context.get_or_insert_default().push_str(text),
            Field::Id => self.id.get_or_insert_default().push_str(text),
            Field::PluralId => self.plural_id.get_or_insert_default().push_str(text),
            Field::Str(n) => {
                if let Some((_, s)) = self.strings.iter_mut().find(|(i, _)| *i == n) {
                    s.push_str(text);
                } else {
                    self.strings.push((n, text.to_string()));
                }
            }
        }
    }

    fn into_message(self) -> Option<(Message, bool)> {
        let id = self.id?;
        let key = MessageKey {
            context: self.context,
            id,
        };
        let mut strings = self.strings;
        strings.sort_by_key(|(n, _)| *n);
        let mut message = match self.plural_id {
            Some(plural_id) => {
                let forms = strings.last().map_or(2, |(n, _)| n + 1);
                let mut message = Message::plural(key, plural_id, forms);
                let mut all = vec![String::new(); forms];
                for (n, s) in strings {
                    all[n] = s;
                }
                message.set_strings(all);
                message
            }
            None => {
                let string = strings.into_iter().next().map(|(_, s)| s).unwrap_or_default();
                Message::from_key(key).with_string(string)
            }
        };
        message.locations = self.locations;
        message.flags = self.flags;
        message.translator_comments = self.translator_comments;
        message.extracted_comments = self.extracted_comments;
        message.previous = self.previous;
        Some((message, self.obsolete))
    }
}

/// Parse PO text into a catalog.
///
/// Duplicate keys keep the first occurrence. The catalog locale is taken from
/// the header's `Language:` field when present.
pub fn parse_po(content: &str) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    let mut pending = PendingEntry::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let mut line = raw_line.trim();
        let mut obsolete = false;
        if let Some(rest) = line.strip_prefix("#~") {
            obsolete = true;
            line = rest.trim_start();
        }

        if line.is_empty() {
            if !obsolete {
                finish_entry(&mut catalog, std::mem::take(&mut pending));
            }
            continue;
        }

        // `#~|` carries the previous id of an obsolete entry.
        let comment = if obsolete && line.starts_with('|') {
            Some(line)
        } else {
            line.strip_prefix('#')
        };
        if let Some(comment) = comment {
            // A comment after the strings starts the next entry.
            if pending.has_strings() {
                finish_entry(&mut catalog, std::mem::take(&mut pending));
            }
            pending.obsolete |= obsolete;
            parse_comment(&mut pending, comment);
            continue;
        }

        if line.starts_with('"') {
            let Some(field) = pending.current else {
                bail!("line {}: string continuation without a keyword", line_no);
            };
            let text = unquote(line).with_context(|| format!("line {}", line_no))?;
            pending.append(field, &text);
            continue;
        }

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .with_context(|| format!("line {}: expected keyword and string", line_no))?;
        let field = match keyword {
            "msgctxt" => Field::Context,
            "msgid" => Field::Id,
            "msgid_plural" => Field::PluralId,
            "msgstr" => Field::Str(0),
            _ => match keyword
                .strip_prefix("msgstr[")
                .and_then(|s| s.strip_suffix(']'))
                .and_then(|n| n.parse::<usize>().ok())
            {
                Some(n) => Field::Str(n),
                None => bail!("line {}: unknown keyword '{}'", line_no, keyword),
            },
        };

        if matches!(field, Field::Context | Field::Id) && pending.has_strings() {
            finish_entry(&mut catalog, std::mem::take(&mut pending));
        }

        let text = unquote(rest.trim()).with_context(|| format!("line {}", line_no))?;
        pending.obsolete |= obsolete;
        pending.current = Some(field);
        pending.append(field, &text);
    }
    finish_entry(&mut catalog, pending);

    let locale = catalog
        .header()
        .and_then(|header| header_field(header.string(), "Language"))
        .filter(|l| !l.is_empty());
    catalog.set_locale(locale);

    Ok(catalog)
}

fn parse_comment(pending: &mut PendingEntry, comment: &str) {
    if let Some(rest) = comment.strip_prefix(':') {
        pending
            .locations
            .extend(rest.split_whitespace().map(str::to_string));
    } else if let Some(rest) = comment.strip_prefix(',') {
        pending.flags.extend(
            rest.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        );
    } else if let Some(rest) = comment.strip_prefix('.') {
        pending.extracted_comments.push(rest.trim().to_string());
    } else if let Some(rest) = comment.strip_prefix('|') {
        pending.previous.push(rest.trim().to_string());
    } else {
        let text = comment.strip_prefix(' ').unwrap_or(comment);
        pending.translator_comments.push(text.to_string());
    }
}

fn finish_entry(catalog: &mut Catalog, pending: PendingEntry) {
    let Some((message, obsolete)) = pending.into_message() else {
        return;
    };
    if obsolete {
        catalog.push_obsolete(message);
    } else {
        let key = message.key().clone();
        if !catalog.insert(message) {
            warn!(key = %key, "duplicate message in catalog, keeping the first");
        }
    }
}

/// Look up a `Name: value` line in a header string.
pub fn header_field(header: &str, name: &str) -> Option<String> {
    header.lines().find_map(|line| {
        let (field, value) = line.split_once(':')?;
        (field.trim() == name).then(|| value.trim().to_string())
    })
}

fn unquote(s: &str) -> Result<String> {
    let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        bail!("expected a quoted string, found: {}", s);
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => bail!("dangling escape at end of string: {}", s),
        }
    }
    Ok(out)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Render a catalog as PO text.
pub fn to_po_string(catalog: &Catalog) -> String {
    let mut out = String::new();
    let active = catalog.iter().map(|m| (m, ""));
    let obsolete = catalog.obsolete().iter().map(|m| (m, "#~ "));
    for (i, (message, prefix)) in active.chain(obsolete).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_message(&mut out, message, prefix);
    }
    out
}

fn write_message(out: &mut String, message: &Message, prefix: &str) {
    for comment in &message.translator_comments {
        if comment.is_empty() {
            let _ = writeln!(out, "#");
        } else {
            let _ = writeln!(out, "# {}", comment);
        }
    }
    for comment in &message.extracted_comments {
        let _ = writeln!(out, "#. {}", comment);
    }
    for location in &message.locations {
        let _ = writeln!(out, "#: {}", location);
    }
    if !message.flags.is_empty() {
        let _ = writeln!(out, "#, {}", message.flags.join(", "));
    }
    for previous in &message.previous {
        let _ = writeln!(out, "{}#| {}", prefix, previous);
    }
    if let Some(context) = message.context() {
        write_field(out, prefix, "msgctxt", context);
    }
    write_field(out, prefix, "msgid", message.id());
    match message.plural_id() {
        Some(plural_id) => {
            write_field(out, prefix, "msgid_plural", plural_id);
            for (n, s) in message.strings().iter().enumerate() {
                write_field(out, prefix, &format!("msgstr[{}]", n), s);
            }
        }
        None => write_field(out, prefix, "msgstr", message.string()),
    }
}

fn write_field(out: &mut String, prefix: &str, keyword: &str, value: &str) {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() > 1 {
        let _ = writeln!(out, "{}{} \"\"", prefix, keyword);
        for segment in segments {
            let _ = writeln!(out, "{}\"{}\"", prefix, escape(segment));
        }
    } else {
        let _ = writeln!(out, "{}{} \"{}\"", prefix, keyword, escape(value));
    }
}
