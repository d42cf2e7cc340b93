//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the authentication API.
///
/// The login and protected endpoints are resolved relative to it.
/// Bearer tokens travel in headers, so plain HTTP is accepted only for
/// loopback hosts.
///
/// # Example
///
/// ```
/// use tokenstash_core::ApiBase;
///
/// let base = ApiBase::new("http://localhost:5001").unwrap();
/// assert_eq!(base.endpoint_url("login"), "http://localhost:5001/login");
/// assert_eq!(base.origin_slug(), "localhost_5001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Create a new API base from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiBase {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the URL of an endpoint below this base.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.as_str(), endpoint.trim_start_matches('/'))
    }

    /// Returns the base URL without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns a filesystem-safe `host_port` name for this origin.
    ///
    /// Durable storage is kept per origin, so two APIs on different ports
    /// never see each other's tokens.
    pub fn origin_slug(&self) -> String {
        let host = self.0.host_str().unwrap_or("unknown");
        let port = self.0.port_or_known_default().unwrap_or(0);
        format!("{}_{}", host, port)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiBase {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        let is_localhost = url.host_str().is_some_and(|h| {
            h == "localhost" || h == "127.0.0.1" || h == "::1" || h == "[::1]"
        });

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiBase {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiBase {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiBase {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiBase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiBase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiBase::new(&s).map_err(serde::de::Error::custom)
    }
}
