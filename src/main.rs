mod cli;
mod commands;
mod paths;
mod ui;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use settings::SettingsStore;
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    /// Settings file given on the command line or via `TEMPSWEEP_SETTINGS`
    pub settings: Option<String>,
}

impl Context {
    /// Resolved settings file location
    pub fn settings_path(&self) -> Result<PathBuf> {
        paths::settings_file(self.settings.as_deref())
    }

    /// Load the settings store. A missing file is not created until the
    /// first save.
    pub fn open_settings(&self) -> Result<SettingsStore> {
        let path = self.settings_path()?;
        SettingsStore::open(&path, false)
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings: cli.settings,
    };

    let result = match cli.command {
        Command::Bin(args) => commands::bin::run(&ctx, args),
        Command::Settings(cmd) => commands::settings::run(&ctx, cmd),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tempsweep", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        ui::error(&format!("{e:#}"));
        std::process::exit(1);
    }
    Ok(())
}
