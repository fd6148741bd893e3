//! Core library for the Runlet execution service.
//!
//! Runlet accepts arbitrary untrusted source text plus a language tag, writes
//! the source into a uniquely named scratch script, runs the matching
//! interpreter as a supervised child process under a wall-clock deadline, and
//! returns the captured output streams, exit status, and timing. The scratch
//! artifact is removed on every exit path.
//!
//! # Architecture Overview
//!
//! - **Runtime bindings**: an enumerated mapping from language tags to
//!   interpreter argument vectors (never shell strings)
//! - **Scratch artifacts**: per-execution temporary scripts with guaranteed,
//!   silent cleanup
//! - **Process supervision**: bounded waits, separate stream capture, and
//!   process-group teardown on timeout
//! - **Configuration system**: YAML configuration with environment overrides
//!   and an administrative timeout ceiling
//!
//! Every failure mode is folded into the returned [`ExecutionResult`]; the
//! `execute` boundary never raises. Transport layers (HTTP or otherwise) are
//! external callers of this crate and carry no execution logic of their own.

pub mod config;
pub mod core_types;
pub mod errors;
pub mod executors;

pub use config::ExecutorConfig;
pub use core_types::{ExecutionRequest, ExecutionResult};
pub use errors::ExecError;
pub use executors::{CodeExecutor, NativeCodeExecutor};
