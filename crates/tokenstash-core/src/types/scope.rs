//! Storage scope and session state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Lifetime of the storage a token is kept in.
///
/// This is the only axis on which deployments of the session client
/// differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    /// Survives restarts until explicitly cleared.
    #[default]
    Durable,
    /// Lives only as long as the owning session (the "tab").
    Ephemeral,
}

impl StorageScope {
    /// Short name used on the command line and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageScope::Durable => "durable",
            StorageScope::Ephemeral => "ephemeral",
        }
    }

    /// Human-readable name used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            StorageScope::Durable => "durable storage",
            StorageScope::Ephemeral => "ephemeral storage",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "durable" | "local" => Ok(StorageScope::Durable),
            "ephemeral" | "session" | "tab" => Ok(StorageScope::Ephemeral),
            _ => Err(InvalidInputError::StorageScope {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Whether a token is currently held in a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

impl SessionState {
    pub fn is_logged_in(self) -> bool {
        self == SessionState::LoggedIn
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::LoggedOut => f.write_str("logged out"),
            SessionState::LoggedIn => f.write_str("logged in"),
        }
    }
}
