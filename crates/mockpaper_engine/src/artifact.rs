//! Staging area for generated archives.
//!
//! Each successful generation is written to its own file in a private
//! temporary directory. The file stays there until it is released (a newer
//! submission replaced it) or the store is dropped, which removes the whole
//! directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use mockpaper_logging::{client_debug, client_warn};
use tempfile::{NamedTempFile, TempDir};
use thiserror::Error;

use crate::{ArtifactId, StoredArtifact};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not create staging directory: {0}")]
    Staging(io::Error),
    #[error("could not stage archive: {0}")]
    Write(io::Error),
    #[error("staged archive is gone: {0}")]
    Missing(PathBuf),
    #[error("{path} is not a usable output directory: {source}")]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("could not save archive: {0}")]
    Export(io::Error),
}

pub struct ArtifactStore {
    dir: TempDir,
    next_id: AtomicU64,
}

impl ArtifactStore {
    pub fn new() -> Result<Self, ArtifactError> {
        let dir = tempfile::Builder::new()
            .prefix("mockpaper_")
            .tempdir()
            .map_err(ArtifactError::Staging)?;
        Ok(Self {
            dir,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self, bytes: &[u8]) -> Result<StoredArtifact, ArtifactError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.path_for(id);
        fs::write(&path, bytes).map_err(ArtifactError::Write)?;
        client_debug!("Staged artifact {} at {:?}", id, path);
        Ok(StoredArtifact {
            id,
            path,
            byte_len: bytes.len() as u64,
        })
    }

    /// Remove a staged archive. Releasing twice is harmless.
    pub fn release(&self, id: ArtifactId) {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => client_debug!("Released artifact {}", id),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => client_warn!("Failed to release artifact {} at {:?}: {}", id, path, err),
        }
    }

    fn path_for(&self, id: ArtifactId) -> PathBuf {
        self.dir.path().join(format!("artifact-{id}.zip"))
    }
}

/// Save a staged archive as `{dir}/{file_name}`, creating `dir` if needed.
///
/// The copy goes through a temp file in `dir` and is renamed into place, so
/// an existing archive of the same name is replaced whole or not at all.
pub fn export_artifact(
    staged: &Path,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ArtifactError> {
    let bytes = match fs::read(staged) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ArtifactError::Missing(staged.to_path_buf()));
        }
        Err(err) => return Err(ArtifactError::Export(err)),
    };

    prepare_output_dir(dir)?;
    let target = dir.join(file_name);
    let mut tmp = NamedTempFile::new_in(dir).map_err(ArtifactError::Export)?;
    tmp.write_all(&bytes).map_err(ArtifactError::Export)?;
    tmp.as_file_mut().sync_all().map_err(ArtifactError::Export)?;
    tmp.persist(&target)
        .map_err(|err| ArtifactError::Export(err.error))?;
    client_debug!("Exported {} bytes to {:?}", bytes.len(), target);
    Ok(target)
}

fn prepare_output_dir(dir: &Path) -> Result<(), ArtifactError> {
    let output_dir = |source: io::Error| ArtifactError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(output_dir(io::Error::other("not a directory"))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(output_dir)
        }
        Err(err) => Err(output_dir(err)),
    }
}
