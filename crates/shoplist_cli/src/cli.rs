use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shopping list manager with a built-in essentials catalog
#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Toggle catalog essentials, add custom items and export the list")]
#[command(version)]
pub struct Cli {
    /// SQLite database holding the list (defaults to the user data dir)
    #[arg(long, global = true, env = "SHOPLIST_DB")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "SHOPLIST_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "SHOPLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the essentials catalog with list membership
    Catalog {
        /// Only show groups/items containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show the current list
    List,
    /// Add a custom item
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Add an item from the essentials catalog
    Check {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove an item by name
    Uncheck {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove an item by ID (a unique prefix is enough)
    Remove { id: String },
    /// Remove every item
    Clear {
        /// Confirm clearing the entire list
        #[arg(long)]
        yes: bool,
    },
    /// Write the list as a plain-text report
    Export {
        /// Output file
        #[arg(short, long, default_value = shoplist_core::EXPORT_FILE_NAME)]
        out: PathBuf,
        /// Print the report instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
}

impl Commands {
    /// Stable subcommand name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog { .. } => "catalog",
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Check { .. } => "check",
            Self::Uncheck { .. } => "uncheck",
            Self::Remove { .. } => "remove",
            Self::Clear { .. } => "clear",
            Self::Export { .. } => "export",
        }
    }
}
