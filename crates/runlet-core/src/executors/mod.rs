//! Code execution environments for supervised runtime evaluation.
//!
//! Provides the `CodeExecutor` trait and a native implementation that runs
//! untrusted source through host interpreters resolved from an enumerated
//! binding table, with timeout enforcement and guaranteed scratch cleanup.

use async_trait::async_trait;

use crate::core_types::ExecutionResult;

pub mod bindings;
pub mod native;
pub mod scratch;

pub use bindings::{RuntimeBinding, RuntimeBindings, RuntimeProbe};
pub use native::NativeCodeExecutor;
pub use scratch::ScratchFile;

#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Run `code` under the runtime selected by `language`.
    ///
    /// Never returns an error: every failure mode (unsupported language,
    /// scratch failure, spawn failure, timeout) is folded into the result.
    async fn execute_code(
        &self,
        language: &str,
        code: &str,
        timeout: Option<u64>,
    ) -> ExecutionResult;
}
