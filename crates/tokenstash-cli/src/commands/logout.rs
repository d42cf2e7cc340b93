//! Logout command implementation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::open_session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, settings: &Settings) -> Result<ExitCode> {
    let session = open_session(settings)?;
    let status = session.client.logout().await;
    Ok(output::report(&status))
}
