//! tokenstash-core - Core types and traits for the bearer-token session client.

pub mod credentials;
pub mod error;
pub mod status;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use status::{Status, StatusKind};
pub use tokens::SessionToken;
pub use traits::TokenStore;
pub use types::{ApiBase, SessionState, StorageScope};

/// Storage key the token lives under unless configured otherwise.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
