//! tokenstash-http - HTTP session client.
//!
//! [`AuthClient`] speaks to the login and protected endpoints.
//! [`SessionClient`] combines it with a [`TokenStore`](tokenstash_core::TokenStore)
//! to provide login, protected calls and logout.

mod client;
mod endpoints;
mod session;

pub use client::{AuthClient, LoginResponse};
pub use endpoints::{LOGIN, PROTECTED};
pub use session::SessionClient;
