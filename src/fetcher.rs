//! Scratch-file staging for remote PDFs.
//!
//! A [`TempAssetFetcher`] downloads one object into a randomly named file in a
//! caller-chosen scratch directory and owns that file until it is released.
//! Release is explicit via [`TempAssetFetcher::close`]; dropping the fetcher is
//! a best-effort fallback that runs the same cleanup.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::ObjectStore;
use crate::types::{DocumentIdentity, ObjectLocator};

/// Length of generated scratch file names.
pub const SCRATCH_NAME_LEN: usize = 10;

/// Returns `len` characters drawn from `[A-Za-z0-9]`.
///
/// `thread_rng` is a CSPRNG, so names from concurrent fetchers sharing a
/// directory collide only with negligible probability.
pub fn generate_scratch_name(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Owner of one downloaded scratch file.
#[derive(Debug)]
pub struct TempAssetFetcher {
    locator: ObjectLocator,
    identity: DocumentIdentity,
    path: PathBuf,
    released: bool,
}

impl TempAssetFetcher {
    /// Download `locator` into a fresh file under `scratch_dir`.
    ///
    /// Blocks until the store client returns. A store failure is returned
    /// unchanged and no fetcher is created.
    pub fn fetch(
        store: &dyn ObjectStore,
        locator: ObjectLocator,
        identity: DocumentIdentity,
        scratch_dir: &Path,
    ) -> Result<Self, StoreError> {
        let path = scratch_dir.join(generate_scratch_name(SCRATCH_NAME_LEN));
        debug!("Fetching {} into {}", locator, path.display());

        store.download(locator.bucket(), locator.key(), &path)?;

        Ok(Self {
            locator,
            identity,
            path,
            released: false,
        })
    }

    /// Local path of the scratch file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source object.
    pub fn locator(&self) -> &ObjectLocator {
        &self.locator
    }

    /// Identity supplied at construction.
    pub fn identity(&self) -> &DocumentIdentity {
        &self.identity
    }

    /// Whether cleanup has already run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Delete the scratch file. Returns true if this call removed it.
    ///
    /// Safe to call repeatedly. A file that is already gone is not an error,
    /// and other I/O failures are logged rather than returned.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed scratch file {}", self.path.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Scratch file {} already removed", self.path.display());
                false
            }
            Err(e) => {
                warn!(
                    "Failed to remove scratch file {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// Consume the fetcher and delete its scratch file.
    pub fn close(mut self) {
        self.release();
    }
}

impl Drop for TempAssetFetcher {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_name_shape() {
        let name = generate_scratch_name(SCRATCH_NAME_LEN);
        assert_eq!(name.len(), 10);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_scratch_name_custom_length() {
        assert_eq!(generate_scratch_name(0), "");
        assert_eq!(generate_scratch_name(32).len(), 32);
    }
}
