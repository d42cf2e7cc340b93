//! HTTP client for the authentication API.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use tokenstash_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use tokenstash_core::{ApiBase, Credentials, Result, SessionToken};

use crate::endpoints::{LOGIN, PROTECTED};

fn map_transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

/// Text of a truthy scalar `token` value. `null`, `false`, `""` and `0`
/// are no token; objects and arrays are not accepted.
fn token_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// What the login endpoint answered.
///
/// The HTTP status is not part of this: a body with a token is a
/// successful login, anything else is a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Issued token, if the body carried a truthy scalar `token` field.
    pub token: Option<SessionToken>,
    /// Server-provided `message`, verbatim. Non-string values are kept as
    /// their JSON text.
    pub message: Option<String>,
}

impl LoginResponse {
    fn from_body(body: &Value) -> Self {
        let token = body.get("token").and_then(token_text).and_then(SessionToken::new);

        let message = body.get("message").map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        Self { token, message }
    }
}

/// HTTP client bound to one API base.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base: ApiBase,
}

impl AuthClient {
    /// Create a new client for the given API base.
    pub fn new(base: ApiBase) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tokenstash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_transport)?;

        Ok(Self { client, base })
    }

    /// Returns the API base this client is configured for.
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Submit credentials to the login endpoint.
    #[instrument(skip(self, credentials), fields(base = %self.base, username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.base.endpoint_url(LOGIN);
        debug!(%url, "Submitting credentials");

        let response = self
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(map_transport)?;

        let body = Self::json_body(response).await?;
        let login = LoginResponse::from_body(&body);

        debug!(issued = login.token.is_some(), "Login answered");
        Ok(login)
    }

    /// Call the protected endpoint with a bearer token.
    ///
    /// Whatever JSON the server answers with is returned, whatever the
    /// status code; the server's authorization decision is not interpreted.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn protected(&self, token: &SessionToken) -> Result<Value> {
        let url = self.base.endpoint_url(PROTECTED);
        debug!(%url, "Calling protected endpoint");

        let auth = HeaderValue::from_str(&token.bearer())
            .map_err(|_| InvalidInputError::TokenHeader)?;

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_transport)?;

        Self::json_body(response).await
    }

    /// Read a response body as JSON.
    async fn json_body(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        trace!(status = %status, "HTTP response");

        let bytes = response.bytes().await.map_err(map_transport)?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ProtocolError::new(status.as_u16(), e.to_string()).into())
    }
}
