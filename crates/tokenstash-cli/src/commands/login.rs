//! Login command implementation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use tokenstash_core::Credentials;

use crate::cli::Settings;
use crate::output;
use crate::session::open_session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(short, long)]
    pub username: String,

    /// Account password
    #[arg(short, long, env = "TOKENSTASH_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, settings: &Settings) -> Result<ExitCode> {
    let session = open_session(settings)?;

    eprintln!("{}", "Logging in...".dimmed());

    let status = session
        .client
        .login(Credentials::new(args.username, args.password))
        .await;

    Ok(output::report(&status))
}
