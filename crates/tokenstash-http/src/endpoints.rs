//! Endpoint paths below the API base.

/// Endpoint that exchanges credentials for a token (POST).
pub const LOGIN: &str = "login";

/// Endpoint that requires a bearer token (GET).
pub const PROTECTED: &str = "protected";
