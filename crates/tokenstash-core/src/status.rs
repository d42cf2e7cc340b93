//! The one-line status reported after every session operation.

use std::fmt;

use crate::error::Error;
use crate::types::StorageScope;

/// Shown when a protected call is attempted without a stored token.
pub const NOT_AUTHENTICATED: &str = "No token! Login first.";

/// Shown after logout, whether or not a token was present.
pub const LOGGED_OUT: &str = "Logged out. Token removed.";

/// Prefix for every failure rendered into the status line.
pub const ERROR_PREFIX: &str = "Error: ";

/// What kind of outcome a [`Status`] reports.
///
/// The kind never changes the message text; front ends use it for
/// colouring and exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    /// The server issued a token and it was stored.
    LoggedIn,
    /// The server answered login without a token.
    Rejected,
    /// No token was stored; nothing was sent.
    NotAuthenticated,
    /// The protected endpoint answered; its body is the message.
    Response,
    /// The token was removed.
    LoggedOut,
    /// Transport, protocol or storage failure.
    Failed,
}

impl StatusKind {
    /// Returns true for outcomes a caller should treat as unsuccessful.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            StatusKind::Rejected | StatusKind::NotAuthenticated | StatusKind::Failed
        )
    }
}

/// Outcome of the last session operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn logged_in(scope: StorageScope) -> Self {
        Self::new(
            StatusKind::LoggedIn,
            format!("Logged in! Token stored in {}.", scope.label()),
        )
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Rejected, message)
    }

    pub fn not_authenticated() -> Self {
        Self::new(StatusKind::NotAuthenticated, NOT_AUTHENTICATED)
    }

    pub fn response(body: impl Into<String>) -> Self {
        Self::new(StatusKind::Response, body)
    }

    pub fn logged_out() -> Self {
        Self::new(StatusKind::LoggedOut, LOGGED_OUT)
    }

    pub fn failed(err: &Error) -> Self {
        Self::new(StatusKind::Failed, format!("{ERROR_PREFIX}{err}"))
    }

    pub fn as_str(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[test]
    fn login_message_names_scope() {
        assert_eq!(
            Status::logged_in(StorageScope::Durable).to_string(),
            "Logged in! Token stored in durable storage."
        );
        assert_eq!(
            Status::logged_in(StorageScope::Ephemeral).to_string(),
            "Logged in! Token stored in ephemeral storage."
        );
    }

    #[test]
    fn failure_carries_prefix_and_detail() {
        let err = Error::from(TransportError::Connection {
            message: "connection refused".to_string(),
        });
        let status = Status::failed(&err);
        assert_eq!(status.kind, StatusKind::Failed);
        assert!(status.message.starts_with(ERROR_PREFIX));
        assert!(status.message.ends_with("connection refused"));
    }

    #[test]
    fn failure_kinds() {
        assert!(Status::rejected("nope").kind.is_failure());
        assert!(Status::not_authenticated().kind.is_failure());
        assert!(!Status::logged_out().kind.is_failure());
        assert!(!Status::response("{}").kind.is_failure());
    }
}
