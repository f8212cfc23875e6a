//! # S3 PDF Loader Plugin
//!
//! Downloads a PDF from Amazon S3 (or an S3-compatible store) into a local
//! scratch file and extracts its text page by page. Each page becomes a
//! [`PageRecord`] carrying the text plus `document_id`, `source` and `page`
//! metadata, ready for chunking or indexing.
//!
//! ## Features
//!
//! - Blocking download through any [`ObjectStore`] (S3 via [`S3StoreClient`])
//! - Per-page text extraction through any [`PdfParser`] (`lopdf` via [`LopdfParser`])
//! - Collision-resistant scratch file names and explicit, idempotent cleanup
//! - Optional whitespace and control-character cleanup of page text
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use elizaos_plugin_s3_pdf::{LopdfParser, S3PdfLoader, S3StoreClient, S3StoreConfig};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = S3StoreConfig::new("access_key", "secret_key", "us-east-1");
//!     let loader = S3PdfLoader::builder()
//!         .store(Arc::new(S3StoreClient::new(config)?))
//!         .parser(Arc::new(LopdfParser::new()))
//!         .bucket("my-bucket")
//!         .key("reports/q3.pdf")
//!         .document_id("doc-42")
//!         .filename("q3.pdf")
//!         .build()?;
//!
//!     let pages = loader.load();
//!     loader.close();
//!     for page in pages? {
//!         println!("{}: {}", page.metadata.page, page.page_content);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod parser;
pub mod service;
pub mod store;
pub mod types;

pub use client::S3StoreClient;
pub use config::S3StoreConfig;
pub use error::{LoaderError, PdfError, Result, StoreError};
pub use fetcher::{generate_scratch_name, TempAssetFetcher, SCRATCH_NAME_LEN};
pub use loader::{S3PdfLoader, S3PdfLoaderBuilder};
pub use parser::{ContentCleaner, LopdfParser, PdfDocument, PdfParser};
pub use service::PdfLoaderService;
pub use store::ObjectStore;
pub use types::*;

use anyhow::Result as AnyhowResult;
use std::sync::Arc;

/// Creates a PDF loader service using environment variables for configuration.
///
/// Reads the S3 settings documented on [`S3StoreConfig::from_env`] plus:
/// - `PDF_LOADER_SCRATCH_DIR` (optional, defaults to the OS temp directory)
/// - `PDF_LOADER_CLEAN_CONTENT` (optional, `true` or `1` enables text cleanup)
pub fn get_pdf_loader_service() -> AnyhowResult<PdfLoaderService> {
    let store = S3StoreClient::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to create S3 store client: {}", e))?;

    let mut service = PdfLoaderService::new(Arc::new(store), Arc::new(LopdfParser::new()));

    if let Ok(dir) = std::env::var("PDF_LOADER_SCRATCH_DIR") {
        if !dir.is_empty() {
            service = service.with_scratch_dir(dir);
        }
    }

    if let Ok(flag) = std::env::var("PDF_LOADER_CLEAN_CONTENT") {
        service = service.with_options(LoadOptions::new().clean_content(config::parse_flag(&flag)));
    }

    Ok(service)
}
