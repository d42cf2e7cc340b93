//! Session client: login, protected call, logout.

use std::sync::Arc;

use serde_json::{Number, Value};

use tracing::{debug, info, instrument, warn};

use tokenstash_core::{
    Credentials, DEFAULT_TOKEN_KEY, Error, Result, SessionState, SessionToken, Status, StorageScope,
    TokenStore,
};

use crate::client::AuthClient;

/// Client that keeps its bearer token in an injected store.
///
/// The store decides the token's lifetime; everything else is the same
/// for every scope. Each operation returns the [`Status`] to show the
/// user. Failures are rendered into that status rather than returned.
#[derive(Clone)]
pub struct SessionClient {
    auth: AuthClient,
    store: Arc<dyn TokenStore>,
    key: String,
}

impl SessionClient {
    /// Create a session client storing its token under the default key.
    pub fn new(auth: AuthClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            auth,
            store,
            key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }

    /// Use `key` as the storage key for the token.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Returns the scope of the backing store.
    pub fn scope(&self) -> StorageScope {
        self.store.scope()
    }

    /// Returns the storage key the token lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Exchange credentials for a token and store it.
    ///
    /// A response without a token leaves storage untouched and reports
    /// the server's message verbatim.
    #[instrument(skip(self, credentials), fields(scope = %self.scope(), username = credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Status {
        self.try_login(credentials)
            .await
            .unwrap_or_else(|e| Self::failure("login", &e))
    }

    /// Call the protected endpoint with the stored token.
    ///
    /// Without a token no request is sent.
    #[instrument(skip(self), fields(scope = %self.scope()))]
    pub async fn call_protected(&self) -> Status {
        self.try_call_protected()
            .await
            .unwrap_or_else(|e| Self::failure("protected call", &e))
    }

    /// Remove the stored token. Safe to call when logged out.
    #[instrument(skip(self), fields(scope = %self.scope()))]
    pub async fn logout(&self) -> Status {
        match self.store.remove(&self.key).await {
            Ok(()) => {
                info!("Logged out");
                Status::logged_out()
            }
            Err(e) => Self::failure("logout", &e),
        }
    }

    /// Report whether a token is currently stored.
    pub async fn state(&self) -> Result<SessionState> {
        Ok(match self.stored_token().await? {
            Some(_) => SessionState::LoggedIn,
            None => SessionState::LoggedOut,
        })
    }

    /// Read the stored token. An empty stored value counts as absent.
    pub async fn stored_token(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .store
            .get(&self.key)
            .await?
            .and_then(SessionToken::new))
    }

    async fn try_login(&self, credentials: Credentials) -> Result<Status> {
        let response = self.auth.login(&credentials).await?;

        match response.token {
            Some(token) => {
                self.store.set(&self.key, token.as_str()).await?;
                info!("Logged in, token stored");
                Ok(Status::logged_in(self.scope()))
            }
            None => {
                debug!("Login answered without a token");
                Ok(Status::rejected(response.message.unwrap_or_default()))
            }
        }
    }

    async fn try_call_protected(&self) -> Result<Status> {
        let Some(token) = self.stored_token().await? else {
            debug!("No stored token, skipping request");
            return Ok(Status::not_authenticated());
        };

        let mut body = self.auth.protected(&token).await?;
        integral_floats_as_integers(&mut body);

        Ok(Status::response(body.to_string()))
    }

    fn failure(action: &str, err: &Error) -> Status {
        warn!(action, error = %err, "Session operation failed");
        Status::failed(err)
    }
}

/// Largest magnitude JavaScript still prints without an exponent.
const JS_PLAIN_LIMIT: f64 = 1e21;

/// Rewrite floats with no fractional part as integers, so `1.0` and `1e2`
/// echo as `1` and `100`, matching how JavaScript prints numbers.
fn integral_floats_as_integers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            let Some(f) = n.as_f64() else { return };
            if f.fract() != 0.0 || f.abs() >= JS_PLAIN_LIMIT {
                return;
            }
            let int = if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(Number::from(f as i64))
            } else if f >= 0.0 && f < u64::MAX as f64 {
                Some(Number::from(f as u64))
            } else {
                None
            };
            if let Some(int) = int {
                *n = int;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_as_integers),
        Value::Object(map) => map.values_mut().for_each(integral_floats_as_integers),
        _ => {}
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("base", self.auth.base())
            .field("scope", &self.scope())
            .field("key", &self.key)
            .finish()
    }
}
