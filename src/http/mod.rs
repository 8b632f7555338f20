//! HTTP transport for the data layer.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind, GENERIC_MESSAGE, TIMEOUT_MESSAGE};
