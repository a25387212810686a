//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable strings into the master catalog
//! - `init`: Create the catalog for a new locale
//! - `update`: Refresh every locale catalog from the master catalog
//! - `compile`: Compile locale catalogs for runtime use
//! - `gotrans`: Machine-translate a locale's untranslated entries
//! - `config`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::extract::parse_keyword_list;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        self.common.verbose
    }
}

/// Arguments accepted by every command.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory holding the configuration and translations (default: current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BinArgs {
    /// Catalog tool executable (overrides config file)
    #[arg(long)]
    pub bin: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub tool: BinArgs,

    /// Extra translator function names, comma-separated
    #[arg(long)]
    pub keywords: Option<String>,
}

impl ExtractCommand {
    pub fn keywords(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .map(parse_keyword_list)
            .unwrap_or_default()
    }
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Locale to create, e.g. `fr` or `pt_BR`
    pub locale: String,

    #[command(flatten)]
    pub tool: BinArgs,

    /// Machine-translate the new catalog
    #[arg(long)]
    pub gotrans: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub tool: BinArgs,

    /// Skip extraction and update from the existing master catalog
    #[arg(long)]
    pub no_extract: bool,

    /// Machine-translate every updated catalog
    #[arg(long)]
    pub gotrans: bool,
}

#[derive(Debug, Args)]
pub struct CompileCommand {
    #[command(flatten)]
    pub tool: BinArgs,
}

#[derive(Debug, Args)]
pub struct GotransCommand {
    /// Locale whose catalog is translated
    pub locale: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings into the master catalog
    Extract(ExtractCommand),
    /// Create the catalog for a new locale
    Init(InitCommand),
    /// Update all locale catalogs from the master catalog
    Update(UpdateCommand),
    /// Compile all locale catalogs
    Compile(CompileCommand),
    /// Machine-translate the untranslated entries of a locale
    Gotrans(GotransCommand),
    /// Create a default .polyglotrc.json configuration file
    Config,
}

impl Command {
    /// Whether the command needs a machine translator.
    pub fn translates(&self) -> bool {
        match self {
            Command::Init(cmd) => cmd.gotrans,
            Command::Update(cmd) => cmd.gotrans,
            Command::Gotrans(_) => true,
            Command::Extract(_) | Command::Compile(_) | Command::Config => false,
        }
    }
}
