use thiserror::Error;

use crate::config::ConfigError;
use crate::ir::module::ModuleError;
use crate::weave::CommitError;

/// General weaver-level errors
#[derive(Debug, Error)]
pub enum WeaveError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Module load/save error
    #[error("Module error: {0}")]
    Module(#[from] ModuleError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),
}
