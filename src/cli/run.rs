use std::{
    env, fs,
    path::{self, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::{
    args::{Arguments, Command},
    report::{self, ConsolePrinter},
};
use crate::{
    config::{CONFIG_FILE_NAME, Config, default_config_json, load_config},
    events::{EventBus, TranslationUpdated},
    extract::ExtractSummary,
    runner::ShellRunner,
    translate::{GoogleTranslator, TranslateStats},
    workflow::Workflow,
};

/// What a command did, for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSummary {
    Extracted(ExtractSummary),
    Initialized { locale: String },
    Updated { locales: Vec<String> },
    Compiled,
    Translated { locale: String, stats: TranslateStats },
    ConfigCreated,
}

pub fn run(Arguments { common, command }: Arguments) -> Result<CommandSummary> {
    let Some(command) = command else {
        bail!("No command provided. Use --help to see available commands.");
    };

    // The catalog tool runs inside the project root; paths handed to it are absolute.
    let project_root = match common.project_root {
        Some(root) => path::absolute(&root)
            .with_context(|| format!("Failed to resolve project root {}", root.display()))?,
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    // `config` never reads an existing file.
    let config = if matches!(command, Command::Config) {
        Config::default()
    } else {
        let loaded = load_config(&project_root)?;
        if !loaded.from_file {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        }
        loaded.config
    };
    run_workflow(&config, &project_root, command)
}

fn run_workflow(config: &Config, project_root: &Path, command: Command) -> Result<CommandSummary> {
    let runner = ShellRunner::in_dir(project_root);
    let printer = ConsolePrinter;
    let mut events = EventBus::new();
    events.subscribe(|event: &TranslationUpdated| report::print_translation_updated(&event.locale));

    let translator = if command.translates() {
        Some(GoogleTranslator::new()?)
    } else {
        None
    };

    let mut workflow = Workflow::new(config, project_root, &runner)
        .with_progress(&printer)
        .with_events(&events);
    if let Some(translator) = &translator {
        workflow = workflow.with_translator(translator);
    }

    match command {
        Command::Extract(cmd) => {
            let keywords = cmd.keywords();
            let summary = workflow
                .with_bin(cmd.tool.bin)
                .with_keywords(keywords)
                .extract()?;
            Ok(CommandSummary::Extracted(summary))
        }
        Command::Init(cmd) => {
            workflow
                .with_bin(cmd.tool.bin)
                .init(&cmd.locale, cmd.gotrans)?;
            Ok(CommandSummary::Initialized { locale: cmd.locale })
        }
        Command::Update(cmd) => {
            let locales = workflow
                .with_bin(cmd.tool.bin)
                .update(!cmd.no_extract, cmd.gotrans)?;
            Ok(CommandSummary::Updated { locales })
        }
        Command::Compile(cmd) => {
            workflow.with_bin(cmd.tool.bin).compile()?;
            Ok(CommandSummary::Compiled)
        }
        Command::Gotrans(cmd) => {
            let stats = workflow.translate(&cmd.locale)?;
            Ok(CommandSummary::Translated {
                locale: cmd.locale,
                stats,
            })
        }
        Command::Config => {
            create_config(project_root)?;
            Ok(CommandSummary::ConfigCreated)
        }
    }
}

fn create_config(project_root: &Path) -> Result<PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
