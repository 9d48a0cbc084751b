//! Outline analysis.
//!
//! Turns provider layout into an [`Outline`](crate::model::Outline) in
//! three stages with explicit hand-off between them:
//!
//! 1. [`normalize`]: engine blocks become [`TextBlock`](crate::model::TextBlock)s
//! 2. [`stats`]: one pass over all blocks yields a [`SizeProfile`]
//! 3. [`scorer`]: each block is scored against that profile, then the
//!    title is resolved and the hierarchy repaired
//!
//! [`OutlineExtractor`] runs all three.

pub mod filters;
pub mod hierarchy;
pub mod normalize;
mod options;
mod pipeline;
pub mod scorer;
pub mod stats;
pub mod title;

pub use filters::CandidateFilter;
pub use hierarchy::repair_hierarchy;
pub use normalize::{normalize_document, NormalizedLayout};
pub use options::{
    AnalysisOptions, ErrorMode, LevelThresholds, ScoringTable, SignalWeights, TitleOptions,
};
pub use pipeline::{DocumentAnalysis, OutlineExtractor};
pub use scorer::{HeadingScorer, Signals};
pub use stats::SizeProfile;
pub use title::{ResolvedTitle, TitleResolver, TitleSource};
