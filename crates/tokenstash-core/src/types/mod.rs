//! Validated types used across tokenstash.

mod api_base;
mod scope;

pub use api_base::ApiBase;
pub use scope::{SessionState, StorageScope};
