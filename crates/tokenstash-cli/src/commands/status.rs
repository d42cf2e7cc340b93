//! Status command implementation.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use serde::Serialize;

use tokenstash_core::{SessionState, StorageScope};

use crate::cli::Settings;
use crate::output;
use crate::session::{CliSession, open_session};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    api: String,
    scope: StorageScope,
    key: String,
    logged_in: bool,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored_at: Option<DateTime<Utc>>,
}

pub async fn run(args: StatusArgs, settings: &Settings) -> Result<ExitCode> {
    let session = open_session(settings)?;
    print(&session, args.json).await?;
    Ok(ExitCode::SUCCESS)
}

/// Print the state of `session`. Never touches the network.
pub(crate) async fn print(session: &CliSession, json: bool) -> Result<()> {
    let client = &session.client;

    let state = client.state().await.context("Failed to read token storage")?;
    let stored_at = match state {
        SessionState::LoggedIn => session
            .store
            .entry(client.key())
            .context("Failed to read token storage")?
            .map(|entry| entry.updated_at),
        SessionState::LoggedOut => None,
    };

    let report = StatusReport {
        api: client.auth().base().to_string(),
        scope: client.scope(),
        key: client.key().to_string(),
        logged_in: state.is_logged_in(),
        location: session.store.location(),
        stored_at,
    };

    if json {
        return output::json_pretty(&report);
    }

    output::field("API", &report.api);
    output::field("Scope", report.scope.label());
    output::field("Key", &report.key);
    output::field("State", &state.to_string());
    output::field("Location", &report.location);
    if let Some(at) = report.stored_at {
        output::field(
            "Stored",
            &at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        );
    }

    Ok(())
}
