//! Output formatting helpers.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use tokenstash_core::{Status, StatusKind};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the status line of a session operation.
///
/// Protected endpoint bodies go to stdout untouched so they can be piped.
pub fn status(status: &Status) {
    match status.kind {
        StatusKind::Response => println!("{}", status.message),
        StatusKind::LoggedIn | StatusKind::LoggedOut => success(&status.message),
        StatusKind::Rejected | StatusKind::NotAuthenticated | StatusKind::Failed => {
            error(&status.message)
        }
    }
}

/// Print a status line and map it to the process exit code.
pub fn report(status: &Status) -> ExitCode {
    self::status(status);
    if status.kind.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
