#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{LoaderError, Result};
use crate::fetcher::TempAssetFetcher;
use crate::parser::{ContentCleaner, PdfParser};
use crate::store::ObjectStore;
use crate::types::{DocumentIdentity, LoadOptions, ObjectLocator, PageMetadata, PageRecord};

/// Loads one PDF from an object store as per-page text records.
///
/// The PDF is downloaded once when the loader is built. Every call to
/// [`load`](Self::load) re-parses the local copy. Call [`close`](Self::close)
/// when done to delete the scratch file.
pub struct S3PdfLoader {
    fetcher: TempAssetFetcher,
    parser: Arc<dyn PdfParser>,
    cleaner: Option<ContentCleaner>,
}

impl S3PdfLoader {
    pub fn builder() -> S3PdfLoaderBuilder {
        S3PdfLoaderBuilder::new()
    }

    /// Parse the scratch file into one record per page, in page order.
    ///
    /// Either every page is returned or an error is; the scratch file is left
    /// untouched in both cases.
    pub fn load(&self) -> Result<Vec<PageRecord>> {
        debug!(
            "Loading {} from {}",
            self.fetcher.locator(),
            self.fetcher.path().display()
        );

        let document = self.parser.open(self.fetcher.path())?;
        let identity = self.fetcher.identity();

        let pages = (0..document.page_count())
            .map(|index| -> Result<PageRecord> {
                let text = document.extract_text(index)?;
                let text = match &self.cleaner {
                    Some(cleaner) => cleaner.clean(&text),
                    None => text,
                };
                Ok(PageRecord::new(text, PageMetadata::new(identity, index)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} pages from {}", pages.len(), self.fetcher.locator());
        Ok(pages)
    }

    pub fn scratch_path(&self) -> &Path {
        self.fetcher.path()
    }

    pub fn locator(&self) -> &ObjectLocator {
        self.fetcher.locator()
    }

    pub fn identity(&self) -> &DocumentIdentity {
        self.fetcher.identity()
    }

    /// Delete the scratch file and consume the loader.
    pub fn close(self) {
        self.fetcher.close();
    }
}

#[derive(Default)]
pub struct S3PdfLoaderBuilder {
    store: Option<Arc<dyn ObjectStore>>,
    parser: Option<Arc<dyn PdfParser>>,
    bucket: Option<String>,
    key: Option<String>,
    identity: DocumentIdentity,
    scratch_dir: Option<PathBuf>,
    options: LoadOptions,
}

impl S3PdfLoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn PdfParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn locator(mut self, locator: ObjectLocator) -> Self {
        self.bucket = Some(locator.bucket().to_string());
        self.key = Some(locator.key().to_string());
        self
    }

    pub fn document_id(mut self, document_id: impl Into<String>) -> Self {
        self.identity.document_id = document_id.into();
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.identity.filename = filename.into();
        self
    }

    pub fn identity(mut self, identity: DocumentIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Directory for the scratch file. Defaults to the OS temp directory.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the configuration, then download the PDF.
    ///
    /// All configuration checks run before the store is contacted.
    pub fn build(self) -> Result<S3PdfLoader> {
        let parser = self.parser.ok_or(LoaderError::ParserUnavailable)?;
        let store = self.store.ok_or(LoaderError::StoreUnavailable)?;
        let bucket = self
            .bucket
            .ok_or_else(|| LoaderError::config("bucket is required"))?;
        let key = self
            .key
            .ok_or_else(|| LoaderError::config("object key is required"))?;

        let cleaner = if self.options.clean_content {
            let cleaner = ContentCleaner::new()
                .map_err(|e| LoaderError::config(format!("invalid cleanup pattern: {e}")))?;
            Some(cleaner)
        } else {
            None
        };

        let scratch_dir = self.scratch_dir.unwrap_or_else(std::env::temp_dir);

        let fetcher = TempAssetFetcher::fetch(
            store.as_ref(),
            ObjectLocator::new(bucket, key),
            self.identity,
            &scratch_dir,
        )?;

        Ok(S3PdfLoader {
            fetcher,
            parser,
            cleaner,
        })
    }
}
