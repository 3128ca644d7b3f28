/// Output artifact resolver
///
/// Confirms that a run which exited cleanly actually left its output file.
use std::path::{Path, PathBuf};

use super::error::ResolveError;

/// Finds the file the external program promised to write.
///
/// The artifact belongs to the external program: it is only ever read here,
/// never created or removed.
#[derive(Debug, Clone)]
pub struct ResultResolver {
    artifact: PathBuf,
}

impl ResultResolver {
    pub fn new(artifact: PathBuf) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Path of the output artifact after a clean exit.
    /// Exit status 0 alone does not prove the file was written.
    pub fn resolve(&self) -> Result<PathBuf, ResolveError> {
        if self.artifact.is_file() {
            Ok(self.artifact.clone())
        } else {
            Err(ResolveError::MissingOutputArtifact {
                path: self.artifact.clone(),
            })
        }
    }
}
