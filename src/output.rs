// Reading the token document and writing artifacts

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::ast::Target;
use crate::error::GenerateError;
use crate::generator::Artifact;

/// Default token document, relative to the project root
pub const DEFAULT_TOKENS: &str = "design-tokens/tokens.json";

/// Where each artifact lands
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    overrides: HashMap<Target, PathBuf>,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overrides: HashMap::new(),
        }
    }

    /// Place a target somewhere other than its default path.
    /// Relative paths resolve against the root.
    pub fn with_path(mut self, target: Target, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(target, path.into());
        self
    }

    pub fn path_for(&self, target: Target) -> PathBuf {
        match self.overrides.get(&target) {
            Some(path) => self.root.join(path),
            None => self.root.join(target.default_path()),
        }
    }
}

/// Read the source document
pub fn read_source(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write every artifact to its path in the layout.
///
/// Each file is written to a temporary sibling and renamed into place, so a
/// failed write never leaves a truncated artifact behind.
pub fn write_artifacts(
    artifacts: &[Artifact],
    layout: &OutputLayout,
) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = layout.path_for(artifact.target);
        write_atomic(&path, &artifact.contents)?;
        info!(artifact = %artifact.target, path = %path.display(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !dir.exists() {
        warn!(dir = %dir.display(), "creating output directory");
        fs::create_dir_all(&dir).map_err(|source| GenerateError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    let write_err = |source: std::io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(&dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
