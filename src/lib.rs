//! # Hashwatch API
//!
//! A read-only mining dashboard served to holders of an unguessable
//! capability token, with no user accounts.
//!
//! ## Features
//!
//! - **Self-checking tokens**: base-58 tokens carrying a double-SHA-256
//!   checksum, validated without a session lookup
//! - **Per-token rate limiting**: fixed-window budget keyed by the token's
//!   lookup hash
//! - **Deterministic cache validators**: canonical-serialization ETags with
//!   minute-bucket timestamp quantization, so polling is cheap
//! - **Anti-enumeration**: every token or authorization failure answers the
//!   same empty 404

pub mod api;
pub mod canonical;
pub mod config;
pub mod error;
pub mod etag;
pub mod persistence;
pub mod rate_limit;
pub mod server;
pub mod time;
pub mod token;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use server::Server;

/// Version of the hashwatch-api crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
