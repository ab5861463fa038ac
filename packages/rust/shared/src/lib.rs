//! Shared error model and configuration for Tokyon.
//!
//! This crate is the foundation depended on by all other Tokyon crates.
//! It provides:
//! - [`TokyonError`], the infrastructure error type
//! - Configuration ([`AppConfig`], credential resolution, config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConsultantConfig, ContentConfig, PipefyConfig, PipefyCredentials, ServerConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, TokyonError};
