//! Interactive shell implementation.
//!
//! One store lives for the whole shell. With the ephemeral scope this is
//! the tab-scoped deployment: the token disappears when the shell exits.

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use tokenstash_core::{Credentials, StorageScope};

use crate::cli::Settings;
use crate::commands::status;
use crate::output;
use crate::session::open_session;

const PROMPT: &str = "tokenstash> ";

const HELP: &str = "\
Commands:
  login <username> [password]  exchange credentials for a token
  call                         call the protected endpoint
  logout                       remove the stored token
  status                       show the stored session
  help                         show this help
  exit                         leave the shell";

#[derive(Args, Debug)]
pub struct ShellArgs {}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Login { username: String, password: String },
    Call,
    Logout,
    Status,
    Help,
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let parsed = match command {
        "login" => {
            let username = words.next().unwrap_or_default().to_string();
            let password = words.next().unwrap_or_default().to_string();
            ShellCommand::Login { username, password }
        }
        "call" | "call-protected" => ShellCommand::Call,
        "logout" => ShellCommand::Logout,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };

    if words.next().is_some() {
        return Err(format!("Too many arguments for '{}'. Type 'help'.", command));
    }

    Ok(Some(parsed))
}

fn prompt(interactive: bool) {
    if interactive {
        eprint!("{}", PROMPT);
        let _ = std::io::stderr().flush();
    }
}

pub async fn run(_args: ShellArgs, settings: &Settings) -> Result<ExitCode> {
    let session = open_session(settings)?;
    let client = &session.client;
    let interactive = std::io::stdin().is_terminal();

    info!(scope = %client.scope(), api = %client.auth().base(), "Shell started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt(interactive);
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Login { username, password })) => {
                let status = client.login(Credentials::new(username, password)).await;
                output::status(&status);
            }
            Ok(Some(ShellCommand::Call)) => output::status(&client.call_protected().await),
            Ok(Some(ShellCommand::Logout)) => output::status(&client.logout().await),
            Ok(Some(ShellCommand::Status)) => {
                if let Err(e) = status::print(&session, false).await {
                    output::error(&format!("{:#}", e));
                }
            }
            Ok(Some(ShellCommand::Help)) => println!("{}", HELP),
            Ok(Some(ShellCommand::Exit)) => break,
            Err(msg) => output::error(&msg),
        }
        prompt(interactive);
    }

    if client.scope() == StorageScope::Ephemeral {
        info!("Shell closed, ephemeral token discarded");
    }

    Ok(ExitCode::SUCCESS)
}
