//! Core traits for token storage.

mod store;

pub use store::TokenStore;
