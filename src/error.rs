use std::path::PathBuf;

use thiserror::Error;

use crate::core::allocator::AllocationError;
use crate::core::config::ConfigError;

#[derive(Debug, Error)]
pub enum VlsmError {
    #[error("failed to initialize logger: {reason}")]
    LoggerInit { reason: String },

    #[error("config file does not exist: {path}")]
    MissingConfigFile { path: PathBuf },

    #[error("failed to read config file {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    #[error("invalid config: {source}")]
    ConfigParse {
        #[from]
        source: ConfigError,
    },

    #[error("too many host requirements: {count} (limit {limit})")]
    TooManyRequests { count: usize, limit: u32 },

    #[error("{source}")]
    Allocation {
        #[from]
        source: AllocationError,
    },

    #[error("failed to serialize result: {reason}")]
    ReportSerialize { reason: String },
}

impl VlsmError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}
