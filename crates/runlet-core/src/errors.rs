//! Error types for the execution service.
//!
//! Every variant except `Config` is absorbed inside the executor: the public
//! `execute` boundary folds errors into the returned result value, using each
//! variant's display string as the caller-visible `stderr` text. `Config`
//! surfaces only from configuration loading at startup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Failed to create scratch file: {0}")]
    Scratch(String),
    #[error("Execution failed: {0}")]
    Launch(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
