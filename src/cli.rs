//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Append timestamped log lines to today's Markdown daily note
#[derive(Parser, Debug, Default)]
#[command(name = "daylog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Without a subcommand, prompts for one manual entry
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add an entry (prompts on stdin when no text is given)
    Add {
        /// Entry text; multiple words are joined with spaces
        text: Vec<String>,

        /// Format with the api template instead of the manual one
        #[arg(long)]
        api: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve `GET /log?log=<text>` on localhost
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Show entries waiting for today's note
    Pending {
        /// Drop the pending entries instead of printing them
        #[arg(long)]
        clear: bool,
    },

    /// Print the config file path and resolved settings
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

impl Command {
    /// Interactive manual entry, used when no subcommand is given
    pub fn prompt() -> Self {
        Self::Add {
            text: Vec::new(),
            api: false,
            json: false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
