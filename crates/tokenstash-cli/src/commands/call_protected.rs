//! Protected call command implementation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::cli::Settings;
use crate::output;
use crate::session::open_session;

#[derive(Args, Debug)]
pub struct CallProtectedArgs {}

pub async fn run(_args: CallProtectedArgs, settings: &Settings) -> Result<ExitCode> {
    let session = open_session(settings)?;
    let status = session.client.call_protected().await;
    Ok(output::report(&status))
}
