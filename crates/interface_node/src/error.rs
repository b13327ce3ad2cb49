//! Node error handling

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::CoreError;
use domain_policy::PolicyError;

/// Node error types
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed script: {0}")]
    ScriptParse(#[from] serde_json::Error),

    #[error("No command script given")]
    MissingScript,

    #[error("Deployment failed: {0}")]
    Deploy(#[from] PolicyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
