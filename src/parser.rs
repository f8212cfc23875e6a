#![allow(missing_docs)]

use lopdf::Document;
use regex::Regex;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::error::PdfError;

/// Opens local PDF files.
pub trait PdfParser: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, PdfError>;
}

/// A parsed PDF whose pages are addressed by zero-based index in physical order.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    fn extract_text(&self, index: usize) -> Result<String, PdfError>;
}

/// [`PdfParser`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

impl LopdfParser {
    pub fn new() -> Self {
        Self
    }
}

impl PdfParser for LopdfParser {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, PdfError> {
        debug!("Opening PDF file: {}", path.display());

        let file = File::open(path)?;
        let document =
            Document::load_from(file).map_err(|e| PdfError::ParseError(e.to_string()))?;

        // get_pages is keyed by 1-based page number in ascending order
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!("Parsed PDF with {} pages", page_numbers.len());

        Ok(Box::new(LopdfDocument {
            document,
            page_numbers,
        }))
    }
}

struct LopdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn extract_text(&self, index: usize) -> Result<String, PdfError> {
        let page_number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or(PdfError::PageNotFound(index))?;

        self.document
            .extract_text(&[page_number])
            .map_err(|e| PdfError::ExtractionError {
                page: index,
                message: e.to_string(),
            })
    }
}

/// Normalizes extracted page text.
pub struct ContentCleaner {
    control_char_regex: Regex,
    whitespace_regex: Regex,
    trailing_space_regex: Regex,
}

impl ContentCleaner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            control_char_regex: Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]")?,
            whitespace_regex: Regex::new(r"[^\S\r\n]+")?,
            trailing_space_regex: Regex::new(r"[ \t]+(\r?\n)")?,
        })
    }

    pub fn clean(&self, content: &str) -> String {
        let cleaned = self.control_char_regex.replace_all(content, "");
        let cleaned = self.whitespace_regex.replace_all(&cleaned, " ");
        let cleaned = self.trailing_space_regex.replace_all(&cleaned, "$1");
        cleaned.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        let cleaner = ContentCleaner::new().unwrap();
        assert_eq!(cleaner.clean("  a \t  b  \nc\x07  "), "a b\nc");
    }

    #[test]
    fn test_clean_keeps_line_breaks() {
        let cleaner = ContentCleaner::new().unwrap();
        assert_eq!(cleaner.clean("line one   \r\nline two"), "line one\r\nline two");
    }

    #[test]
    fn test_open_missing_file_is_file_error() {
        let result = LopdfParser::new().open(Path::new("/definitely/not/here.pdf"));
        assert!(matches!(result, Err(PdfError::FileError(_))));
    }
}
