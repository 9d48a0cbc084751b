//! Rendering module for converting results to output JSON.

mod json;
mod outline;
mod report;

pub use json::{to_json, JsonFormat};
pub use outline::{outline_to_json, OutlineEntry, OutlineJson};
pub use report::{excerpt, ExtractedSection, RankingReport, ReportMetadata, SubsectionAnalysis};
