//! Batch processing over many documents.
//!
//! Two modes share one [`BatchProcessor`]:
//!
//! - outline mode: every layout document in a directory gets its own
//!   outline JSON
//! - ranking mode: the documents listed by a [`RankingDescriptor`] are
//!   segmented into sections, pooled, and ranked against the persona + task
//!   query
//!
//! Per-document failures are values ([`DocumentStatus`]), never aborts.
//! Only an unusable descriptor fails a ranking run.

mod descriptor;
mod processor;

pub use descriptor::RankingDescriptor;
pub use processor::{resolve_document, BatchProcessor, RankingRun, METADATA_FILE};

use std::fmt;

use crate::error::{Error, Warning};

/// What happened to one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Processed; possibly with skipped pages or other warnings
    Ok {
        /// Number of headings in the outline
        headings: usize,
        warnings: Vec<Warning>,
    },
    /// Could not be loaded or analyzed
    Failed {
        /// Error message
        error: String,
    },
}

/// Per-document result of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStatus {
    /// Document name (file name or descriptor entry)
    pub document: String,
    pub outcome: Outcome,
}

impl DocumentStatus {
    /// A successfully processed document.
    pub fn ok(document: impl Into<String>, headings: usize, warnings: Vec<Warning>) -> Self {
        Self {
            document: document.into(),
            outcome: Outcome::Ok { headings, warnings },
        }
    }

    /// A document that failed.
    pub fn failed(document: impl Into<String>, error: &Error) -> Self {
        Self {
            document: document.into(),
            outcome: Outcome::Failed {
                error: error.to_string(),
            },
        }
    }

    /// Whether the document was processed.
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok { .. })
    }

    /// Warnings of a processed document; empty for failures.
    pub fn warnings(&self) -> &[Warning] {
        match &self.outcome {
            Outcome::Ok { warnings, .. } => warnings,
            Outcome::Failed { .. } => &[],
        }
    }

    pub(crate) fn log(&self) {
        match &self.outcome {
            Outcome::Ok { headings, warnings } => {
                log::info!("{}: {} headings", self.document, headings);
                for warning in warnings {
                    log::warn!("{}: {}", self.document, warning);
                }
            }
            Outcome::Failed { error } => log::warn!("{}: failed: {}", self.document, error),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Ok { headings, warnings } if warnings.is_empty() => {
                write!(f, "{}: ok ({} headings)", self.document, headings)
            }
            Outcome::Ok { headings, warnings } => write!(
                f,
                "{}: ok ({} headings, {} warnings)",
                self.document,
                headings,
                warnings.len()
            ),
            Outcome::Failed { error } => write!(f, "{}: failed: {}", self.document, error),
        }
    }
}
