//! Section segmentation and relevance ranking.
//!
//! A document's repaired outline cuts its page texts into
//! [`Section`](crate::model::Section)s; sections from one or more
//! documents are then ranked against a persona + task query in a shared
//! TF-IDF vector space.

mod ranker;
pub mod segment;
pub mod vectorizer;

pub use ranker::{build_query, RankOptions, Ranking, RelevanceRanker};
pub use segment::segment_sections;
pub use vectorizer::{cosine_similarity, stop_words, tokenize, TermVector, Vectorizer};
