//! Relevance-ranking output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::json::{to_json, JsonFormat};
use crate::error::Result;
use crate::model::RankedSection;

/// Run description echoed at the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Requested documents, in descriptor order
    pub documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 timestamp (UTC)
    pub processed_at: String,
}

/// A ranked section reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub importance_rank: usize,
}

/// A ranked section's text excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub refined_text: String,
}

/// The relevance-ranking output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankingReport {
    /// Build a report from ranked sections, best first.
    pub fn new(
        documents: Vec<String>,
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        processed_at: DateTime<Utc>,
        ranked: &[RankedSection],
        excerpt_chars: usize,
    ) -> Self {
        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.section.document_id.clone(),
                page: r.section.start_page,
                section_title: r.section.title.clone(),
                importance_rank: r.rank,
            })
            .collect();

        let subsection_analysis = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.section.document_id.clone(),
                page: r.section.start_page,
                section_title: r.section.title.clone(),
                refined_text: excerpt(&r.section.body_text, excerpt_chars),
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                documents,
                persona: persona.into(),
                job_to_be_done: job_to_be_done.into(),
                processed_at: processed_at.to_rfc3339(),
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Render the report as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

/// Collapse whitespace runs and keep at most `max_chars` characters.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => collapsed[..cut].to_string(),
        None => collapsed,
    }
}
