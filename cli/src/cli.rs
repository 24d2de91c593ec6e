//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{builder::BoolishValueParser, ArgAction, Parser, Subcommand};
use tmac_core::DEFAULT_BASE_URL;

/// TMAC (Task Management API Client)
#[derive(Parser, Debug)]
#[command(name = "tmac")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the todo API
    #[arg(long, env = "TMAC_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level implied by the `-v` count, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List todos, or a single user's todos when --user is given
    List {
        /// Only show todos owned by this user id
        #[arg(short, long)]
        user: Option<String>,

        /// Only show complete (true) or pending (false) todos
        #[arg(short, long, value_parser = BoolishValueParser::new())]
        complete: Option<bool>,

        /// Also write the listed todos as JSON to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Show task statistics for a user
    Stat {
        /// The user id to show statistics for
        user: String,
    },

    /// List users
    Users {
        /// Also write the users as JSON to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}
