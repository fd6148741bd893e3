//! Native code executor: supervised child processes running host interpreters.
//!
//! This executor provides no OS-level sandboxing (no namespaces, seccomp, or
//! cgroups); its guarantees are lifecycle ones: bounded wall-clock time,
//! separate stream capture, process-group teardown on timeout, and scratch
//! cleanup on every exit path.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tokio::time::Duration;

use super::bindings::{RuntimeBinding, RuntimeBindings};
use super::scratch::ScratchFile;
use super::CodeExecutor;
use crate::config::ExecutorConfig;
use crate::core_types::{ExecutionRequest, ExecutionResult};
use crate::errors::ExecError;

/// Extension given to scratch files whose language tag has no binding; the
/// artifact is created before dispatch, so a suffix is still needed.
const UNBOUND_EXTENSION: &str = "txt";

pub struct NativeCodeExecutor {
    config: ExecutorConfig,
    bindings: RuntimeBindings,
}

/// Captured child outcome before timing is attached.
struct RawOutcome {
    stdout: String,
    stderr: String,
    exit_code: i32,
    timed_out: bool,
}

impl Default for NativeCodeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeCodeExecutor {
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Build an executor from a configuration, layering any configured extra
    /// bindings over the built-in table.
    pub fn with_config(config: ExecutorConfig) -> Self {
        let mut bindings = RuntimeBindings::default();
        for extra in &config.bindings {
            bindings.insert(
                &extra.language,
                RuntimeBinding::new(&extra.program, &extra.extension),
            );
        }
        Self { config, bindings }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn bindings(&self) -> &RuntimeBindings {
        &self.bindings
    }

    /// Run one request to completion.
    ///
    /// Never returns an error and never panics on untrusted input: every
    /// failure mode is folded into the result, with the error's display
    /// string as `stderr` and the `-1` sentinel as `exit_code`. Elapsed time
    /// spans scratch creation through cleanup.
    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        let started = Instant::now();
        let language = request.normalized_language();
        let timeout = self.config.effective_timeout(request.timeout);

        let outcome = self.run(&language, &request.code, timeout).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(raw) => ExecutionResult {
                stdout: raw.stdout,
                stderr: raw.stderr,
                exit_code: raw.exit_code,
                timed_out: raw.timed_out,
                elapsed_ms,
            },
            Err(err) => {
                log::warn!("execution of '{}' snippet not run: {}", language, err);
                ExecutionResult {
                    stdout: String::new(),
                    stderr: err.to_string(),
                    exit_code: -1,
                    timed_out: false,
                    elapsed_ms,
                }
            }
        }
    }

    async fn run(
        &self,
        language: &str,
        code: &str,
        timeout: Duration,
    ) -> Result<RawOutcome, ExecError> {
        let extension = self
            .bindings
            .resolve(language)
            .map(|b| b.extension.clone())
            .unwrap_or_else(|| UNBOUND_EXTENSION.to_string());

        // The scratch guard covers every path below, including early returns
        // and panics during capture.
        let scratch =
            ScratchFile::create(code.as_bytes(), &extension, self.config.scratch_dir.as_deref())
                .await?;

        let binding = self
            .bindings
            .resolve(language)
            .ok_or_else(|| ExecError::UnsupportedLanguage(language.to_string()))?;

        log::debug!(
            "launching {} on {} ({} source bytes, {}s timeout)",
            binding.program,
            scratch.path().display(),
            code.len(),
            timeout.as_secs()
        );

        let mut cmd = binding.command(scratch.path());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| ExecError::Launch(format!("{}: {}", binding.program, e)))?;

        let stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| ExecError::Launch("stdout pipe was not captured".to_string()))?;
        let stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| ExecError::Launch("stderr pipe was not captured".to_string()))?;

        // Drain both pipes concurrently so a chatty child can not deadlock
        // against a full pipe buffer while we wait on it.
        let stdout_task = tokio::spawn(drain(stdout_pipe));
        let stderr_task = tokio::spawn(drain(stderr_pipe));

        // `Child::wait` is cancel safe, so losing the race against the
        // deadline does not lose the exit status.
        let mut timed_out = false;
        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => Some(status.map_err(|e| ExecError::Launch(e.to_string()))?),
            Err(_) => {
                timed_out = true;
                log::warn!(
                    "execution exceeded {}s, killing {} and its process group",
                    timeout.as_secs(),
                    binding.program
                );
                kill_process_group(&child);
                let _ = child.kill().await;
                // Reap so no zombie outlives the request.
                let _ = child.wait().await;
                None
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let mut stderr = String::from_utf8_lossy(&stderr).into_owned();

        let exit_code = match status {
            Some(status) => status.code().unwrap_or(-1),
            None => {
                stderr.push_str(&format!(
                    "\nExecution timed out after {} seconds.",
                    timeout.as_secs()
                ));
                -1
            }
        };

        Ok(RawOutcome {
            stdout,
            stderr,
            exit_code,
            timed_out,
        })
        // scratch drops here; its directory is gone before timing stops
    }
}

#[async_trait]
impl CodeExecutor for NativeCodeExecutor {
    async fn execute_code(
        &self,
        language: &str,
        code: &str,
        timeout: Option<u64>,
    ) -> ExecutionResult {
        let mut request = ExecutionRequest::new(code, language);
        request.timeout = timeout;
        self.execute(&request).await
    }
}

async fn drain<R>(mut pipe: R) -> Vec<u8>
where
    R: AsyncReadExt + Unpin,
{
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf).await;
    buf
}

/// Send SIGKILL to the child's whole process group so interpreter-spawned
/// grandchildren do not survive the deadline.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Some(pid) = child.id() {
        // A negative pid addresses the process group created at spawn.
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}
