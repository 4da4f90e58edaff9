//! Interview Core — shared error type and ingestion configuration.

pub mod config;
pub mod error;

pub use config::IngestConfig;
pub use error::{Error, Result};
