use crate::error::{QcError, Result};
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Output files held in temporaries beside their destinations until [`commit`] moves
/// them all into place.
///
/// Dropping an uncommitted set removes the temporaries, so a run that fails while
/// staging leaves none of its outputs behind.
///
/// [`commit`]: StagedOutputs::commit
#[derive(Default)]
pub struct StagedOutputs {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `content` to a temporary in the directory of `path`.
    pub fn stage(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp_file = Builder::new()
            .prefix(".amplicon-qc")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| QcError::io(path, e))?;
        temp_file
            .write_all(content)
            .and_then(|_| temp_file.flush())
            .map_err(|e| QcError::io(path, e))?;

        self.staged.push((temp_file, path.to_path_buf()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Moves every staged file to its destination and returns the written paths.
    ///
    /// If one move fails, the files already moved by this call are removed again.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written: Vec<PathBuf> = Vec::with_capacity(self.staged.len());
        for (temp_file, path) in self.staged {
            if let Err(e) = temp_file.persist(&path) {
                for done in &written {
                    if let Err(remove_err) = std::fs::remove_file(done) {
                        warn!("Could not remove {} after a failed write: {}", done.display(), remove_err);
                    }
                }
                return Err(QcError::io(&path, e.error));
            }
            debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
