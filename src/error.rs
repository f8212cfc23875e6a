//! Error types for the S3 PDF loader plugin

use thiserror::Error;

/// Errors reported by an object store client.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// The object does not exist
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// The credentials in use may not read the object
    #[error("Access denied: s3://{bucket}/{key}")]
    AccessDenied {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// AWS SDK error
    #[error("AWS error: {message}")]
    AwsError {
        /// Error message
        message: String,
    },

    /// Local file system error while writing the destination
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a configuration error with the given message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates an AWS error with the given message.
    pub fn aws<S: Into<String>>(message: S) -> Self {
        Self::AwsError {
            message: message.into(),
        }
    }
}

/// Errors reported by a PDF parser.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file is not a readable PDF
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    /// The file could not be opened
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Page index out of range
    #[error("Page not found: {0}")]
    PageNotFound(usize),

    /// Text extraction failed for a single page
    #[error("Text extraction failed on page {page}: {message}")]
    ExtractionError {
        /// Zero-based page index
        page: usize,
        /// Error message
        message: String,
    },
}

/// Errors surfaced by the loader.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No PDF parser was supplied
    #[error("PDF parser not configured: supply one with `parser(..)`, e.g. `LopdfParser`")]
    ParserUnavailable,

    /// No object store client was supplied
    #[error("Object store client not configured: supply one with `store(..)`, e.g. `S3StoreClient`")]
    StoreUnavailable,

    /// Any other missing or invalid setting
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// Download failure, passed through from the store client
    #[error(transparent)]
    Download(#[from] StoreError),

    /// Parse failure, passed through from the PDF parser
    #[error(transparent)]
    Parse(#[from] PdfError),
}

impl LoaderError {
    /// Creates a configuration error with the given message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Returns true for the errors raised before any network I/O happens.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ParserUnavailable | Self::StoreUnavailable | Self::ConfigError { .. }
        )
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
