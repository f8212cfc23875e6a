#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::loader::S3PdfLoader;
use crate::parser::PdfParser;
use crate::store::ObjectStore;
use crate::types::{DocumentIdentity, LoadOptions, ObjectLocator, PageRecord};

/// Shared store client, parser and scratch directory for loading PDFs one at a time.
pub struct PdfLoaderService {
    store: Arc<dyn ObjectStore>,
    parser: Arc<dyn PdfParser>,
    scratch_dir: PathBuf,
    options: LoadOptions,
}

impl PdfLoaderService {
    pub const SERVICE_TYPE: &'static str = "PDF_LOADER";
    pub const CAPABILITY_DESCRIPTION: &'static str =
        "Load PDF documents from S3 as per-page text";

    pub fn new(store: Arc<dyn ObjectStore>, parser: Arc<dyn PdfParser>) -> Self {
        Self {
            store,
            parser,
            scratch_dir: std::env::temp_dir(),
            options: LoadOptions::default(),
        }
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Download a PDF and return a loader that owns its scratch file.
    ///
    /// Prefer [`with_loader`](Self::with_loader) unless the loader must outlive
    /// the current scope; a loader returned here should be closed explicitly.
    pub fn open(&self, locator: ObjectLocator, identity: DocumentIdentity) -> Result<S3PdfLoader> {
        S3PdfLoader::builder()
            .store(Arc::clone(&self.store))
            .parser(Arc::clone(&self.parser))
            .locator(locator)
            .identity(identity)
            .scratch_dir(self.scratch_dir.clone())
            .options(self.options.clone())
            .build()
    }

    /// Run `f` against a freshly downloaded loader, then delete its scratch file.
    ///
    /// The scratch file is removed whether `f` succeeds or fails.
    pub fn with_loader<T, F>(
        &self,
        locator: ObjectLocator,
        identity: DocumentIdentity,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(&S3PdfLoader) -> Result<T>,
    {
        let loader = self.open(locator, identity)?;
        let result = f(&loader);
        loader.close();
        result
    }

    pub fn load_document(
        &self,
        locator: ObjectLocator,
        identity: DocumentIdentity,
    ) -> Result<Vec<PageRecord>> {
        self.with_loader(locator, identity, |loader| loader.load())
    }
}
