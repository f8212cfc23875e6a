//! The object store capability used to stage remote PDFs locally.

use std::path::Path;

use crate::error::StoreError;

/// A blob store that can copy one object to a local file.
///
/// Calls block the current thread until the object is fully written to
/// `destination`. Implementations own their transport, auth and retry policy.
pub trait ObjectStore: Send + Sync {
    /// Copy `bucket`/`key` to `destination`, creating or truncating the file.
    fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), StoreError>;
}
