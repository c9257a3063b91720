// File: src/client.rs
//! Backend gateway: one HTTP call per operation, mapped into view-model types.
mod core;
pub mod endpoint;

pub use self::core::ApiClient;
