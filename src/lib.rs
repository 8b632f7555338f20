//! Client data layer for the e-portfolio backend.
//!
//! - [`api`]: request descriptors for every backend entity
//! - [`http`]: the client with bearer injection and the re-auth interceptor
//! - [`store`]: state containers with fetch lifecycle and pagination
//! - [`notify`]: the global toast queue
//! - [`session`]: token, storage and navigation collaborators

pub mod api;
pub mod config;
pub mod http;
pub mod notify;
pub mod observability;
pub mod session;
pub mod store;
