//! Configuration file loading for gavel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GAVEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./gavel.toml` or `./.gavel.toml`
//! 4. Global: `$XDG_CONFIG_HOME/gavel/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDebateConfig, FileLoggingConfig, FileQuorumConfig, FileStorageConfig,
    FileVotingConfig,
};
pub use loader::ConfigLoader;
