//! Error and warning types for docoutline.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading layouts or producing results.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON decoding or encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout provider could not decode a page or a whole document.
    #[error("Layout read error in {document} (page {page}): {message}")]
    LayoutRead {
        /// Document identifier (file name or caller-supplied id)
        document: String,
        /// 1-indexed page number, 0 when the whole document failed
        page: u32,
        /// Provider message
        message: String,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The ranking descriptor is missing persona, task or documents.
    #[error("Invalid metadata descriptor: {0}")]
    InvalidMetadata(String),

    /// Error while rendering output JSON.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a layout read error for a single page.
    pub fn layout(document: impl Into<String>, page: u32, message: impl Into<String>) -> Self {
        Error::LayoutRead {
            document: document.into(),
            page,
            message: message.into(),
        }
    }

    /// Whether this error only affects one page of a document.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Error::LayoutRead { page, .. } if *page > 0)
            || matches!(self, Error::PageOutOfRange(..))
    }
}

/// Non-fatal conditions recorded while processing a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A page could not be decoded and was left out.
    PageSkipped {
        /// 1-indexed page number
        page: u32,
        /// Reason reported by the layout provider
        message: String,
    },
    /// The document yielded no text blocks.
    EmptyDocument,
    /// Every relevance vector was zero; ranking falls back to input order.
    DegenerateCorpus,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PageSkipped { page, message } => {
                write!(f, "page {} skipped: {}", page, message)
            }
            Warning::EmptyDocument => write!(f, "document has no extractable text"),
            Warning::DegenerateCorpus => {
                write!(f, "all section vectors are empty; ranking is by input order")
            }
        }
    }
}
