//! Error types and exit codes for namevault

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for namevault operations
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Failed to parse shard {}: {message}", path.display())]
    ShardParse { path: PathBuf, message: String },

    #[error("Invalid record: {message}")]
    Validation { message: String },

    #[error("No shard files found in {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("No valid records found in {}", path.display())]
    NoRecords { path: PathBuf },

    #[error("Generated id '{id}' collides with an existing record")]
    DuplicateId { id: String },

    #[error("Name already exists: {name}")]
    DuplicateName { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON error: {message}")]
    Json { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Shorthand for a record-level validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convert error to an exit code:
    /// - 0: Success
    /// - 1: Source missing / IO error
    /// - 2: Configuration or input validation error
    /// - 3: No usable data
    /// - 4: Internal defect (id collision, serialization)
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::SourceNotFound { .. } => ExitCode::from(1),
            Self::ShardParse { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
            Self::Config { .. } => ExitCode::from(2),
            Self::Validation { .. } => ExitCode::from(2),
            Self::DuplicateName { .. } => ExitCode::from(2),
            Self::NoRecords { .. } => ExitCode::from(3),
            Self::DuplicateId { .. } => ExitCode::from(4),
            Self::Json { .. } => ExitCode::from(4),
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            message: e.to_string(),
        }
    }
}

/// Result type alias for namevault operations
pub type Result<T> = std::result::Result<T, VaultError>;
