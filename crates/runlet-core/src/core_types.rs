//! Request and result types forming the contract between the execution
//! service and its callers.
//!
//! These types are the entire caller-facing surface: a request carries the
//! source text, a language tag, and an optional timeout; the result carries
//! both output streams, the exit status, and wall-clock timing. No state
//! outlives a single request.

use serde::{Deserialize, Serialize};

/// Language used when a request omits or blanks the tag.
pub const DEFAULT_LANGUAGE: &str = "python";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested wall-clock timeout in seconds. Missing values use the
    /// configured default; values above the administrative ceiling are
    /// silently served at the ceiling.
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Case-folded language tag; empty tags fall back to the default.
    pub fn normalized_language(&self) -> String {
        let tag = self.language.trim().to_lowercase();
        if tag.is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            tag
        }
    }
}

/// Outcome of one execution.
///
/// `exit_code` is the child's real exit code for runs that terminated
/// normally (a non-zero exit is program failure, not service failure), and
/// the `-1` sentinel for everything else: unsupported language, scratch
/// failure, spawn failure, timeout, or a signal-terminated child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    #[serde(rename = "returncode")]
    pub exit_code: i32,
    pub timed_out: bool,
    /// Wall-clock time from scratch creation through cleanup, inclusive of
    /// any timeout wait.
    #[serde(rename = "runtime_ms")]
    pub elapsed_ms: u64,
}

impl ExecutionResult {
    /// Whether the execution ran to completion with exit code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_case_folded() {
        let request = ExecutionRequest::new("print(1)", "PyThOn");
        assert_eq!(request.normalized_language(), "python");
    }

    #[test]
    fn empty_language_falls_back_to_default() {
        let request = ExecutionRequest::new("print(1)", "  ");
        assert_eq!(request.normalized_language(), "python");
    }

    #[test]
    fn request_defaults_from_json() {
        let request: ExecutionRequest = serde_json::from_str(r#"{"code": "1 + 1"}"#).unwrap();
        assert_eq!(request.language, "python");
        assert_eq!(request.timeout, None);
    }

    #[test]
    fn result_uses_wire_field_names() {
        let result = ExecutionResult {
            stdout: "hi".into(),
            stderr: String::new(),
            exit_code: 0,
            timed_out: false,
            elapsed_ms: 12,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["returncode"], 0);
        assert_eq!(json["runtime_ms"], 12);
        assert_eq!(json["timed_out"], false);
    }

    #[test]
    fn success_requires_zero_exit_and_no_timeout() {
        let ok = ExecutionResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            timed_out: false,
            elapsed_ms: 0,
        };
        assert!(ok.success());

        let timed_out = ExecutionResult {
            timed_out: true,
            ..ok.clone()
        };
        assert!(!timed_out.success());

        let failed = ExecutionResult {
            exit_code: 2,
            ..ok
        };
        assert!(!failed.success());
    }
}
