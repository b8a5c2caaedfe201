use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "tempsweep")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Report recycle bin usage and manage tempsweep settings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "TEMPSWEEP_SETTINGS", value_name = "FILE")]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how much the recycle bin holds
    Bin(BinArgs),

    /// Read and write persisted settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Recycle Bin
// ============================================================================

#[derive(clap::Args)]
pub struct BinArgs {
    /// Volume roots to query (default: every bin)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Read one setting, falling back to a default
    Get {
        /// Group element (e.g. Window)
        parent: String,
        /// Setting name within the group (e.g. Width)
        child: String,
        /// Value printed when the setting is unset or not of this type
        #[arg(short, long)]
        default: Option<String>,
        /// How to interpret the stored text
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Write one setting and save the file
    Set {
        /// Group element (e.g. Window)
        parent: String,
        /// Setting name within the group (e.g. Width)
        child: String,
        /// Value to store
        value: String,
        /// Validate and normalise the value as this type
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Remove one setting and save the file
    Unset {
        /// Group element
        parent: String,
        /// Setting name within the group
        child: String,
    },

    /// List every stored setting
    List,

    /// Show where settings are stored
    Path,
}

/// Value types a setting can be read or written as
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Double,
}
