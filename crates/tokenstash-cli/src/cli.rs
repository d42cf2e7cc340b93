//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use tokenstash_core::{ApiBase, DEFAULT_TOKEN_KEY, StorageScope};

use crate::commands::Commands;

/// Log in against an authentication API and call its protected endpoint
/// with the stored bearer token.
#[derive(Parser, Debug)]
#[command(name = "tokenstash")]
#[command(author, version = env!("TOKENSTASH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the token is kept.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Base URL of the authentication API
    #[arg(long, env = "TOKENSTASH_API", default_value = "http://localhost:5001", global = true)]
    pub api: ApiBase,

    /// Token storage lifetime: durable (on disk) or ephemeral (in memory)
    #[arg(long, env = "TOKENSTASH_SCOPE", default_value = "durable", global = true)]
    pub scope: StorageScope,

    /// Storage key the token is kept under
    #[arg(long, env = "TOKENSTASH_KEY", default_value = DEFAULT_TOKEN_KEY, global = true)]
    pub key: String,

    /// Directory for durable storage [default: platform data directory]
    #[arg(long, env = "TOKENSTASH_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}
