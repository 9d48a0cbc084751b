//! # docoutline
//!
//! Heading outlines and persona-driven section ranking for documents whose
//! text layout has already been extracted.
//!
//! The input is positioned text (blocks of lines of runs with font name,
//! size and bounding box) from a layout engine. From it the library infers
//! a document title and an H1/H2/H3 heading outline, cuts the pages into
//! sections, and ranks sections against a free-text query.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{extract_outline, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     // Layout dump produced by the layout engine
//!     let outline = extract_outline("report.json")?;
//!
//!     let json = render::outline_to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Normalize**: engine blocks become [`TextBlock`]s with aggregate style
//! - **Estimate**: one pass over all blocks yields the document's [`SizeProfile`]
//! - **Classify**: blocks are scored from a data-driven [`ScoringTable`],
//!   the title is resolved and the hierarchy repaired
//! - **Segment / Rank**: headings cut pages into [`Section`]s, which are
//!   ranked by TF-IDF cosine similarity
//!
//! Every document owns its own intermediate state, so batches run in
//! parallel with Rayon.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod layout;
pub mod model;
pub mod ranking;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, DocumentAnalysis, ErrorMode, OutlineExtractor, ScoringTable, SizeProfile,
};
pub use batch::{BatchProcessor, DocumentStatus, Outcome, RankingDescriptor, RankingRun};
pub use error::{Error, Result, Warning};
pub use layout::{LayoutDocument, LayoutProvider, PageLayout};
pub use model::{
    BBox, HeadingCandidate, HeadingLevel, Outline, RankedSection, Section, TextBlock,
};
pub use ranking::{segment_sections, RankOptions, Ranking, RelevanceRanker};
pub use render::{JsonFormat, OutlineJson, RankingReport};

use std::path::Path;

/// Extract the outline of a layout dump file.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_outline;
///
/// let outline = extract_outline("report.json").unwrap();
/// println!("{} ({} headings)", outline.title, outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    Ok(analyze_file(path, AnalysisOptions::default())?.outline)
}

/// Run the full analysis of a layout dump file with custom options.
///
/// # Example
///
/// ```no_run
/// use docoutline::{analyze_file, AnalysisOptions};
///
/// let options = AnalysisOptions::new().strict();
/// let analysis = analyze_file("report.json", options).unwrap();
/// println!("median size {}", analysis.profile.median_size);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P, options: AnalysisOptions) -> Result<DocumentAnalysis> {
    let doc = LayoutDocument::from_path(path)?;
    OutlineExtractor::new(options).extract(&doc)
}

/// Extract the outline of a layout dump held in memory.
pub fn outline_from_bytes(data: &[u8]) -> Result<Outline> {
    let doc = LayoutDocument::from_bytes(data)?;
    Ok(OutlineExtractor::default().extract(&doc)?.outline)
}

/// Extract the outline of any layout provider.
pub fn outline_from_provider<P: LayoutProvider + ?Sized>(provider: &P) -> Result<Outline> {
    Ok(OutlineExtractor::default().extract(provider)?.outline)
}

/// Convert a layout dump file to outline JSON.
///
/// # Example
///
/// ```no_run
/// use docoutline::{to_outline_json, JsonFormat};
///
/// let json = to_outline_json("report.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.outline.json", json).unwrap();
/// ```
pub fn to_outline_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline(path)?;
    render::outline_to_json(&outline, format)
}

/// Rank sections against a query with default options.
pub fn rank_sections(query: &str, sections: Vec<Section>) -> Ranking {
    RelevanceRanker::default().rank(query, sections)
}

/// Builder for outline extraction and ranking runs.
///
/// # Example
///
/// ```no_run
/// use docoutline::DocOutline;
///
/// let json = DocOutline::new()
///     .strict()
///     .sequential()
///     .compact()
///     .analyze("report.json")?
///     .to_json()?;
/// # Ok::<(), docoutline::Error>(())
/// ```
pub struct DocOutline {
    analysis_options: AnalysisOptions,
    rank_options: RankOptions,
    format: JsonFormat,
}

impl DocOutline {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            analysis_options: AnalysisOptions::default(),
            rank_options: RankOptions::default(),
            format: JsonFormat::Pretty,
        }
    }

    /// Fail on the first undecodable page.
    pub fn strict(mut self) -> Self {
        self.analysis_options = self.analysis_options.strict();
        self
    }

    /// Skip undecodable pages with a warning (the default).
    pub fn lenient(mut self) -> Self {
        self.analysis_options = self.analysis_options.with_error_mode(ErrorMode::Lenient);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.analysis_options = self.analysis_options.sequential();
        self
    }

    /// Replace the heading scoring table.
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.analysis_options = self.analysis_options.with_scoring(scoring);
        self
    }

    /// Set the number of ranked sections kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.rank_options = self.rank_options.with_top_k(top_k);
        self
    }

    /// Emit compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Analyze a layout dump file.
    pub fn analyze<P: AsRef<Path>>(self, path: P) -> Result<OutlineResult> {
        let doc = LayoutDocument::from_path(path)?;
        self.analyze_provider(&doc)
    }

    /// Analyze a layout dump held in memory.
    pub fn analyze_bytes(self, data: &[u8]) -> Result<OutlineResult> {
        let doc = LayoutDocument::from_bytes(data)?;
        self.analyze_provider(&doc)
    }

    /// Analyze any layout provider.
    pub fn analyze_provider<P: LayoutProvider + ?Sized>(self, provider: &P) -> Result<OutlineResult> {
        let analysis = OutlineExtractor::new(self.analysis_options).extract(provider)?;
        Ok(OutlineResult {
            analysis,
            format: self.format,
        })
    }

    /// Rank the documents listed in `<dir>/metadata.json`.
    pub fn rank_directory<P: AsRef<Path>>(self, dir: P) -> Result<RankingRun> {
        let dir = dir.as_ref();
        let descriptor = RankingDescriptor::from_path(dir.join(batch::METADATA_FILE))?;
        Ok(self.into_processor().rank_directory(dir, &descriptor))
    }

    /// Build a batch processor with these settings.
    pub fn into_processor(self) -> BatchProcessor {
        BatchProcessor::new(self.analysis_options, self.rank_options).with_format(self.format)
    }
}

impl Default for DocOutline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of analyzing one document.
pub struct OutlineResult {
    /// The analysis
    pub analysis: DocumentAnalysis,
    format: JsonFormat,
}

impl OutlineResult {
    /// The outline.
    pub fn outline(&self) -> &Outline {
        &self.analysis.outline
    }

    /// Convert the outline to JSON.
    pub fn to_json(&self) -> Result<String> {
        render::outline_to_json(&self.analysis.outline, self.format)
    }

    /// Cut the document's pages into sections at its headings.
    pub fn sections(&self) -> Vec<Section> {
        segment_sections(
            &self.analysis.document_id,
            &self.analysis.outline,
            &self.analysis.page_texts,
        )
    }

    /// Non-fatal conditions met during analysis.
    pub fn warnings(&self) -> &[Warning] {
        &self.analysis.warnings
    }
}
