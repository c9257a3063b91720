// File: src/lib.rs
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod paths;
pub mod platform;
pub mod session;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use session::Session;

// --- ANDROID SUPPORT ---
#[cfg(target_os = "android")]
pub mod mobile;

#[cfg(target_os = "android")]
uniffi::setup_scaffolding!();
