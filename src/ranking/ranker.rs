//! Relevance ranking of sections against a query.

use super::vectorizer::{cosine_similarity, Vectorizer};
use crate::error::Warning;
use crate::model::{RankedSection, Section};

/// Options for relevance ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    /// Number of sections kept in the ranking
    pub top_k: usize,

    /// Longest excerpt (in characters) written per section
    pub excerpt_chars: usize,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the excerpt length.
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            excerpt_chars: 1000,
        }
    }
}

/// Ranked sections plus anything worth reporting about the corpus.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Best sections first, ranks 1..=n
    pub sections: Vec<RankedSection>,

    pub warnings: Vec<Warning>,
}

impl Ranking {
    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Whether ranking fell back to input order.
    pub fn is_degenerate(&self) -> bool {
        self.warnings.contains(&Warning::DegenerateCorpus)
    }
}

/// Build the query text from a persona and the job they want done.
pub fn build_query(persona: &str, job: &str) -> String {
    format!("{} {}", persona.trim(), job.trim()).trim().to_string()
}

/// Ranks sections by cosine similarity to a query.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    options: RankOptions,
}

impl RelevanceRanker {
    /// Create a ranker with the given options.
    pub fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Similarity of every section to the query, in input order.
    ///
    /// The query is one more entry of the corpus the vector space is
    /// fitted on, so query-only terms still carry an IDF weight.
    pub fn score(&self, query: &str, sections: &[Section]) -> Vec<f64> {
        let corpus: Vec<&str> = std::iter::once(query)
            .chain(sections.iter().map(|s| s.body_text.as_str()))
            .collect();
        let (_, vectors) = Vectorizer::fit_transform(&corpus);

        let (query_vec, section_vecs) = match vectors.split_first() {
            Some(split) => split,
            None => return Vec::new(),
        };
        section_vecs
            .iter()
            .map(|v| cosine_similarity(query_vec, v))
            .collect()
    }

    /// Rank sections, best first, keeping the top K.
    ///
    /// The sort is stable, so equal scores keep their input order. When
    /// every score is zero the ranking is input order and a
    /// [`Warning::DegenerateCorpus`] is recorded.
    pub fn rank(&self, query: &str, sections: Vec<Section>) -> Ranking {
        let scores = self.score(query, &sections);
        let mut warnings = Vec::new();

        if !sections.is_empty() && scores.iter().all(|s| *s == 0.0) {
            log::warn!(
                "No section shares a weighted term with the query; keeping input order"
            );
            warnings.push(Warning::DegenerateCorpus);
        }

        let mut scored: Vec<(Section, f64)> = sections.into_iter().zip(scores).collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let sections = scored
            .into_iter()
            .take(self.options.top_k)
            .enumerate()
            .map(|(i, (section, relevance_score))| RankedSection {
                section,
                relevance_score,
                rank: i + 1,
            })
            .collect();

        Ranking { sections, warnings }
    }
}
