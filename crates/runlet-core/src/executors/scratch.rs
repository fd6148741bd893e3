//! Scratch artifacts: per-execution temporary scripts with guaranteed cleanup.

use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::ExecError;

/// A uniquely named script file owned by exactly one in-flight execution.
///
/// The file lives in its own `runlet-exec-*` temporary directory and is named
/// `snippet_<uuid>.<ext>`, never derived from request content. Dropping the
/// guard removes the directory recursively; removal failures are swallowed,
/// so cleanup can neither mask a result nor raise past the executor.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    _dir: TempDir,
}

impl ScratchFile {
    /// Create a scratch script holding exactly `source`.
    ///
    /// `scratch_root` overrides the system temp dir as the parent location.
    pub async fn create(
        source: &[u8],
        extension: &str,
        scratch_root: Option<&Path>,
    ) -> Result<Self, ExecError> {
        let builder = {
            let mut b = Builder::new();
            b.prefix("runlet-exec-");
            b
        };
        let dir = match scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ExecError::Scratch(e.to_string()))?;

        let filename = format!("snippet_{}.{}", Uuid::new_v4(), extension);
        let path = dir.path().join(filename);

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| ExecError::Scratch(e.to_string()))?;
        file.write_all(source)
            .await
            .map_err(|e| ExecError::Scratch(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ExecError::Scratch(e.to_string()))?;

        Ok(Self { path, _dir: dir })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn holds_exact_source_bytes() {
        let scratch = ScratchFile::create(b"print('hi')\n", "py", None)
            .await
            .unwrap();
        let content = std::fs::read(scratch.path()).unwrap();
        assert_eq!(content, b"print('hi')\n");
        let name = scratch.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("snippet_"));
        assert!(name.ends_with(".py"));
    }

    #[tokio::test]
    async fn drop_removes_file_and_directory() {
        let scratch = ScratchFile::create(b"1 + 1", "js", None).await.unwrap();
        let path = scratch.path().to_path_buf();
        let dir = path.parent().unwrap().to_path_buf();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn identical_sources_get_distinct_paths() {
        let a = ScratchFile::create(b"same", "py", None).await.unwrap();
        let b = ScratchFile::create(b"same", "py", None).await.unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn respects_scratch_root() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchFile::create(b"x", "txt", Some(root.path()))
            .await
            .unwrap();
        assert!(scratch.path().starts_with(root.path()));
    }

    #[tokio::test]
    async fn missing_root_is_a_scratch_error() {
        let err = ScratchFile::create(b"x", "txt", Some(Path::new("/nonexistent/runlet-root")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create scratch file"));
    }
}
