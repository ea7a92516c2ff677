//! Infrastructure layer for gavel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDebateConfig, FileLoggingConfig, FileQuorumConfig,
    FileStorageConfig, FileVotingConfig,
};
pub use logging::JsonlProceedingsLogger;
pub use store::JsonFileMeetingStore;
