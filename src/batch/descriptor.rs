//! Ranking run descriptor (`metadata.json`).

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ranking::build_query;

/// Persona, task and documents of one ranking run.
///
/// Accepted shapes:
///
/// ```json
/// {"persona": "Travel Planner", "job_to_be_done": "Plan a trip",
///  "documents": ["a.pdf", "b.pdf"]}
/// ```
///
/// or with `{"role": ...}`, `{"task": ...}` and
/// `{"filename": ..., "title": ...}` objects in place of the strings.
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingDescriptor {
    pub persona: String,
    pub job_to_be_done: String,
    /// Document file names, in processing order
    pub documents: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Role { role: String },
    Task { task: String },
}

impl TextField {
    fn into_string(self) -> String {
        match self {
            TextField::Plain(s) | TextField::Role { role: s } | TextField::Task { task: s } => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentEntry {
    Name(String),
    Entry { filename: String },
}

impl DocumentEntry {
    fn into_name(self) -> String {
        match self {
            DocumentEntry::Name(s) | DocumentEntry::Entry { filename: s } => s,
        }
    }
}

#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    persona: Option<TextField>,
    #[serde(default)]
    job_to_be_done: Option<TextField>,
    #[serde(default)]
    documents: Option<Vec<DocumentEntry>>,
}

impl RankingDescriptor {
    /// Create a descriptor, validating that nothing is missing.
    pub fn new(
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        documents: Vec<String>,
    ) -> Result<Self> {
        let descriptor = Self {
            persona: persona.into().trim().to_string(),
            job_to_be_done: job_to_be_done.into().trim().to_string(),
            documents,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            Error::InvalidMetadata(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&data)
    }

    /// Parse from JSON bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let raw: RawDescriptor =
            serde_json::from_slice(data).map_err(|e| Error::InvalidMetadata(e.to_string()))?;

        let persona = raw
            .persona
            .map(TextField::into_string)
            .ok_or_else(|| Error::InvalidMetadata("missing persona".into()))?;
        let job = raw
            .job_to_be_done
            .map(TextField::into_string)
            .ok_or_else(|| Error::InvalidMetadata("missing job_to_be_done".into()))?;
        let documents = raw
            .documents
            .ok_or_else(|| Error::InvalidMetadata("missing documents".into()))?
            .into_iter()
            .map(DocumentEntry::into_name)
            .collect();

        Self::new(persona, job, documents)
    }

    /// Query text the sections are ranked against.
    pub fn query(&self) -> String {
        build_query(&self.persona, &self.job_to_be_done)
    }

    fn validate(&self) -> Result<()> {
        if self.persona.is_empty() {
            return Err(Error::InvalidMetadata("persona is empty".into()));
        }
        if self.job_to_be_done.is_empty() {
            return Err(Error::InvalidMetadata("job_to_be_done is empty".into()));
        }
        if self.documents.is_empty() {
            return Err(Error::InvalidMetadata("document list is empty".into()));
        }
        if self.documents.iter().any(|d| d.trim().is_empty()) {
            return Err(Error::InvalidMetadata("document name is empty".into()));
        }
        Ok(())
    }
}
