//! Subcommand implementations.

mod call_protected;
mod login;
mod logout;
mod shell;
mod status;

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use tracing::warn;

use tokenstash_core::StorageScope;

use crate::cli::Settings;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exchange credentials for a token and store it
    Login(login::LoginArgs),

    /// Call the protected endpoint with the stored token
    CallProtected(call_protected::CallProtectedArgs),

    /// Remove the stored token
    Logout(logout::LogoutArgs),

    /// Display the stored session
    Status(status::StatusArgs),

    /// Interactive session; ephemeral tokens live until it exits
    Shell(shell::ShellArgs),
}

pub async fn handle(cmd: Commands, settings: &Settings) -> Result<ExitCode> {
    if settings.scope == StorageScope::Ephemeral && !matches!(cmd, Commands::Shell(_)) {
        warn!("Ephemeral storage does not outlive this command; use 'tokenstash shell' to keep the token");
    }

    match cmd {
        Commands::Login(args) => login::run(args, settings).await,
        Commands::CallProtected(args) => call_protected::run(args, settings).await,
        Commands::Logout(args) => logout::run(args, settings).await,
        Commands::Status(args) => status::run(args, settings).await,
        Commands::Shell(args) => shell::run(args, settings).await,
    }
}
