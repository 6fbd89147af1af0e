//! # Storage Layer
//!
//! Persistence for console objects and configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Instances | JSONL (one JSON object per line) | `file.jsonl` (configurable) |
//! | Config | TOML | `hbnb.toml` or the user config directory |
//!
//! ## Concurrency Safety
//!
//! - [`FileStorage`] uses file locking (`fs2`) while reading and writing
//! - Writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Storage`] - Interface the console dispatches against
//! - [`FileStorage`] - In-memory objects backed by a JSONL file
//! - [`Config`] - Console configuration

mod config;
mod file;
mod store;

pub use config::{Config, ConfigError, LOCAL_CONFIG_FILE};
pub use file::FileStorage;
pub use store::Storage;
