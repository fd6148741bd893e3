//! Runtime bindings: the enumerated mapping from language tags to
//! interpreter invocations.
//!
//! A binding always resolves to the argument vector `[program, <script>]`.
//! Commands are never assembled from shell strings, so request content can
//! not inject arguments or paths.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use which::which;

#[derive(Debug, Clone)]
pub struct RuntimeBinding {
    /// Interpreter binary, resolved via `PATH` (or an absolute path).
    pub program: String,
    /// Script filename extension, without the leading dot.
    pub extension: String,
}

impl RuntimeBinding {
    pub fn new(program: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extension: extension.into(),
        }
    }

    /// The full argument vector for running `script`.
    pub fn argv(&self, script: &Path) -> Vec<String> {
        vec![self.program.clone(), script.display().to_string()]
    }

    /// Build the process command for running `script`.
    pub fn command(&self, script: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(script);
        cmd
    }
}

/// Probed availability of one binding's interpreter.
#[derive(Debug, Clone)]
pub struct RuntimeProbe {
    pub language: String,
    pub program: String,
    pub path: Option<PathBuf>,
}

/// Case-folded lookup table from language tags to runtime bindings.
pub struct RuntimeBindings {
    table: HashMap<String, RuntimeBinding>,
}

impl Default for RuntimeBindings {
    fn default() -> Self {
        let mut table = HashMap::new();
        let python = RuntimeBinding::new("python3", "py");
        let node = RuntimeBinding::new("node", "js");
        for tag in ["python", "python3"] {
            table.insert(tag.to_string(), python.clone());
        }
        for tag in ["javascript", "node", "nodejs"] {
            table.insert(tag.to_string(), node.clone());
        }
        Self { table }
    }
}

impl RuntimeBindings {
    pub fn resolve(&self, language: &str) -> Option<&RuntimeBinding> {
        self.table.get(language.trim().to_lowercase().as_str())
    }

    pub fn insert(&mut self, language: &str, binding: RuntimeBinding) {
        self.table.insert(language.trim().to_lowercase(), binding);
    }

    /// Known language tags, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.table.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Look up each binding's interpreter on the host, in tag order.
    pub fn probe(&self) -> Vec<RuntimeProbe> {
        self.languages()
            .into_iter()
            .map(|language| {
                let binding = &self.table[&language];
                RuntimeProbe {
                    program: binding.program.clone(),
                    path: which(&binding.program).ok(),
                    language,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_binds_python_and_node() {
        let bindings = RuntimeBindings::default();
        assert_eq!(bindings.resolve("python").unwrap().program, "python3");
        assert_eq!(bindings.resolve("javascript").unwrap().program, "node");
        assert_eq!(bindings.resolve("node").unwrap().program, "node");
        assert_eq!(bindings.resolve("python3").unwrap().extension, "py");
        assert_eq!(bindings.resolve("nodejs").unwrap().extension, "js");
    }

    #[test]
    fn lookup_is_case_folded() {
        let bindings = RuntimeBindings::default();
        assert!(bindings.resolve("PYTHON").is_some());
        assert!(bindings.resolve("  Node ").is_some());
    }

    #[test]
    fn unknown_tag_does_not_resolve() {
        let bindings = RuntimeBindings::default();
        assert!(bindings.resolve("ruby").is_none());
        assert!(bindings.resolve("").is_none());
    }

    #[test]
    fn argv_is_program_then_script_path() {
        let bindings = RuntimeBindings::default();
        let binding = bindings.resolve("python").unwrap();
        let argv = binding.argv(Path::new("/tmp/snippet_x.py"));
        assert_eq!(argv, vec!["python3", "/tmp/snippet_x.py"]);
    }

    #[test]
    fn inserted_binding_overrides_and_folds() {
        let mut bindings = RuntimeBindings::default();
        bindings.insert("Lua", RuntimeBinding::new("lua5.4", "lua"));
        assert_eq!(bindings.resolve("lua").unwrap().program, "lua5.4");
    }

    #[test]
    fn probe_covers_every_tag() {
        let bindings = RuntimeBindings::default();
        let probes = bindings.probe();
        assert_eq!(probes.len(), bindings.languages().len());
        assert!(probes.iter().any(|p| p.language == "python"));
    }
}
