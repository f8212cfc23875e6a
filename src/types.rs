#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where the source PDF lives in the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocator {
    bucket: String,
    key: String,
}

impl ObjectLocator {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Caller-supplied identifiers copied into every page's metadata.
///
/// Neither field is validated; empty strings are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIdentity {
    pub document_id: String,
    pub filename: String,
}

impl DocumentIdentity {
    pub fn new(document_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub document_id: String,
    /// Display filename of the source document
    pub source: String,
    /// Zero-based page index
    pub page: usize,
}

impl PageMetadata {
    pub fn new(identity: &DocumentIdentity, page: usize) -> Self {
        Self {
            document_id: identity.document_id.clone(),
            source: identity.filename.clone(),
            page,
        }
    }

    /// Metadata as a JSON object keyed `document_id`, `source` and `page`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "document_id".to_string(),
            Value::String(self.document_id.clone()),
        );
        map.insert("source".to_string(), Value::String(self.source.clone()));
        map.insert("page".to_string(), Value::from(self.page));
        map
    }
}

/// Text of one PDF page plus its identifying metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_content: String,
    pub metadata: PageMetadata,
}

impl PageRecord {
    pub fn new(page_content: String, metadata: PageMetadata) -> Self {
        Self {
            page_content,
            metadata,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Normalize whitespace and strip control characters from page text.
    pub clean_content: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to clean content.
    pub fn clean_content(mut self, clean: bool) -> Self {
        self.clean_content = clean;
        self
    }
}
