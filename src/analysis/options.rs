//! Analysis options and the heading scoring table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Error handling mode for undecodable pages
    pub error_mode: ErrorMode,

    /// Weights and thresholds for heading classification
    pub scoring: ScoringTable,

    /// Whether batch runs process documents in parallel
    pub parallel: bool,

    /// Ignore headings on pages that mention "table of contents"
    pub skip_toc_pages: bool,

    /// Ignore text repeated on many pages (running headers/footers)
    pub filter_repeated_text: bool,

    /// Longest text (in characters) that may still be a heading
    pub max_heading_chars: usize,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first undecodable page.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Replace the scoring table.
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable the table-of-contents page filter.
    pub fn with_toc_filter(mut self, enabled: bool) -> Self {
        self.skip_toc_pages = enabled;
        self
    }

    /// Enable or disable the repeated-text filter.
    pub fn with_repeated_text_filter(mut self, enabled: bool) -> Self {
        self.filter_repeated_text = enabled;
        self
    }

    /// Set the maximum heading length in characters.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            scoring: ScoringTable::default(),
            parallel: true,
            skip_toc_pages: true,
            filter_repeated_text: true,
            max_heading_chars: 100,
        }
    }
}

/// Error handling mode for pages the layout provider cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    Strict,
    /// Skip the page with a warning and continue
    #[default]
    Lenient,
}

/// Score contributed by each heading signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub keyword: u32,
    pub numbered: u32,
    /// Bold or all-caps
    pub emphasis: u32,
    pub short_single_line: u32,
    /// Near the top of the page or after a large gap
    pub top_or_gap: u32,
    pub followed_by_body: u32,
    pub size_tier: u32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            keyword: 3,
            numbered: 2,
            emphasis: 2,
            short_single_line: 2,
            top_or_gap: 1,
            followed_by_body: 1,
            size_tier: 1,
        }
    }
}

/// Minimum score for each heading level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self { h1: 5, h2: 4, h3: 3 }
    }
}

/// Title resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleOptions {
    /// Metadata titles containing any of these (case-insensitive) are ignored
    pub rejected_signatures: Vec<String>,

    /// Metadata titles ending in one of these extensions are ignored
    pub rejected_extensions: Vec<String>,

    /// Fraction of the first page searched by the fallback
    pub title_band_ratio: f32,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            rejected_signatures: vec![
                "Microsoft Word".to_string(),
                "Microsoft PowerPoint".to_string(),
                "Untitled".to_string(),
            ],
            rejected_extensions: ["pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "cdr", "txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            title_band_ratio: 0.25,
        }
    }
}

/// All weights and thresholds of the heading classifier.
///
/// The defaults are empirically chosen; tuning is a data change. A table
/// can be loaded from JSON, with omitted fields keeping their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    pub weights: SignalWeights,
    pub thresholds: LevelThresholds,

    /// Blocks with fewer words count as short
    pub max_short_words: usize,

    /// Vertical gap (page units) that counts as a section break
    pub large_gap: f32,

    /// Allowed distance between a block size and a tier size
    pub size_tolerance: f32,

    /// Fraction of the page height treated as "near the top"
    pub top_band_ratio: f32,

    /// Sizes at or below this are decorative artifacts
    pub min_size: f32,

    /// Sizes at or above this are decorative artifacts
    pub max_size: f32,

    /// Median used when a document has no valid sizes
    pub default_median: f32,

    /// Ratio between consecutive derived heading tiers
    pub tier_decay: f32,

    /// Ratio between the last heading tier and a derived body tier
    pub body_decay: f32,

    pub title: TitleOptions,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            thresholds: LevelThresholds::default(),
            max_short_words: 15,
            large_gap: 20.0,
            size_tolerance: 0.5,
            top_band_ratio: 0.15,
            min_size: 5.0,
            max_size: 100.0,
            default_median: 12.0,
            tier_decay: 0.9,
            body_decay: 0.8,
            title: TitleOptions::default(),
        }
    }
}

impl ScoringTable {
    /// Load a table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Whether a size lies inside the accepted visual range.
    pub fn is_valid_size(&self, size: f32) -> bool {
        size > self.min_size && size < self.max_size
    }
}
