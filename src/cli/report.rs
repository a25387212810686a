//! Console output for CLI commands.
//!
//! Separate from the workflow so polyglot can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::run::CommandSummary;
use crate::{config::CONFIG_FILE_NAME, progress::Progress};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Prints workflow progress: steps to stdout, warnings in red to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrinter;

impl Progress for ConsolePrinter {
    fn step(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}

pub fn print_translation_updated(locale: &str) {
    print_translation_updated_to(locale, &mut io::stdout().lock());
}

pub fn print_translation_updated_to<W: Write>(locale: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Translation '{}' updated", locale).green()
    );
}

/// Print the final summary of a command.
pub fn print(summary: &CommandSummary) {
    print_to(summary, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(summary: &CommandSummary, writer: &mut W) {
    let message = match summary {
        CommandSummary::Extracted(summary) => {
            let mut message = format!(
                "Extracted {} {} from {} source {}",
                summary.messages,
                plural(summary.messages, "message", "messages"),
                summary.roots,
                plural(summary.roots, "root", "roots")
            );
            if summary.merged.added > 0 {
                message.push_str(&format!(
                    " ({} from additional roots)",
                    summary.merged.added
                ));
            }
            message
        }
        // The event subscriber has already reported these.
        CommandSummary::Initialized { .. } => return,
        CommandSummary::Updated { locales } if !locales.is_empty() => return,
        CommandSummary::Updated { .. } => {
            let _ = writeln!(writer, "{} no locale catalogs found", "warning:".bold().yellow());
            return;
        }
        CommandSummary::Compiled => "Compiled all translations".to_string(),
        CommandSummary::Translated { locale, stats } => format!(
            "Translated {} {} in '{}'",
            stats.translated,
            plural(stats.translated, "message", "messages"),
            locale
        ),
        CommandSummary::ConfigCreated => format!("Created {}", CONFIG_FILE_NAME),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::MergeStats, extract::ExtractSummary, translate::TranslateStats};

    fn render(summary: &CommandSummary) -> String {
        colored::control::set_override(false);
        let mut output = Vec::new();
        print_to(summary, &mut output);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_extract_summary() {
        let summary = CommandSummary::Extracted(ExtractSummary {
            roots: 2,
            messages: 1,
            merged: MergeStats {
                added: 1,
                skipped: 3,
            },
        });
        assert_eq!(
            render(&summary),
            "✓ Extracted 1 message from 2 source roots (1 from additional roots)\n"
        );
    }

    #[test]
    fn test_translate_and_config_summary() {
        let summary = CommandSummary::Translated {
            locale: "fr".to_string(),
            stats: TranslateStats {
                translated: 4,
                skipped: 0,
            },
        };
        assert_eq!(render(&summary), "✓ Translated 4 messages in 'fr'\n");
        assert_eq!(
            render(&CommandSummary::ConfigCreated),
            "✓ Created .polyglotrc.json\n"
        );
    }

    #[test]
    fn test_update_without_locales_warns() {
        let summary = CommandSummary::Updated {
            locales: Vec::new(),
        };
        assert_eq!(render(&summary), "warning: no locale catalogs found\n");
        assert_eq!(
            render(&CommandSummary::Updated {
                locales: vec!["fr".to_string()]
            }),
            ""
        );
    }
}
