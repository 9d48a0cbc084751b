//! Heading scorer: structural signals, scores, and level assignment.
//!
//! Every block is scored independently from a fixed set of signals. The
//! weights and thresholds live in a [`ScoringTable`], so tuning never
//! needs a new code path. A block becomes a heading only when its score
//! clears a level threshold *and* its size sits on that level's tier:
//!
//! | Level | Score | Size |
//! |-------|-------|------|
//! | H1 | `>= thresholds.h1` | `≈ h1_size`, or page 1 near the top |
//! | H2 | `>= thresholds.h2` | `≈ h2_size` |
//! | H3 | `>= thresholds.h3` | `≈ h3_size` |

use regex::Regex;

use super::filters::CandidateFilter;
use super::options::{ScoringTable, SignalWeights};
use super::stats::SizeProfile;
use crate::model::{HeadingCandidate, HeadingLevel, TextBlock};

/// Signals observed for one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// Section word, enumerated prefix, or short capitalized prefix ending in a period
    pub is_keyword: bool,
    /// Dotted/decimal numbering prefix
    pub is_numbered: bool,
    /// Bold or all caps
    pub is_emphasized: bool,
    /// Few words on exactly one line
    pub is_short_single_line: bool,
    /// Near the page top, or far below the preceding block
    pub is_top_or_gap: bool,
    /// The next block is a long, multi-line paragraph
    pub is_followed_by_body: bool,
    /// Size close to one of the heading tiers
    pub size_tier_match: bool,
}

impl Signals {
    /// Sum of the weights of the signals that fired.
    pub fn score(&self, weights: &SignalWeights) -> u32 {
        [
            (self.is_keyword, weights.keyword),
            (self.is_numbered, weights.numbered),
            (self.is_emphasized, weights.emphasis),
            (self.is_short_single_line, weights.short_single_line),
            (self.is_top_or_gap, weights.top_or_gap),
            (self.is_followed_by_body, weights.followed_by_body),
            (self.size_tier_match, weights.size_tier),
        ]
        .iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, weight)| *weight)
        .sum()
    }
}

/// Greedy single-pass heading classifier.
pub struct HeadingScorer {
    table: ScoringTable,
    section_word_regex: Regex,
    enumerated_regex: Regex,
    capitalized_prefix_regex: Regex,
    numbered_regex: Regex,
}

impl HeadingScorer {
    /// Create a scorer with the given table.
    pub fn new(table: ScoringTable) -> Self {
        Self {
            table,
            section_word_regex: Regex::new(
                r"(?i)^(chapter|section|part|appendix|annex|phase|abstract|summary|introduction|overview|background|conclusions?|references|bibliography|glossary|acknowledge?ments|table\s+of\s+contents|revision\s+history)\b",
            )
            .unwrap(),
            enumerated_regex: Regex::new(
                r"^(\d{1,2}(\.\d{1,2})*\.?|[A-Za-z][.)]|[IVXLC]{1,6}[.)])\s+\S",
            )
            .unwrap(),
            capitalized_prefix_regex: Regex::new(
                r"^[A-Z][A-Za-z'-]{0,19}(\s+[A-Z][A-Za-z'-]{0,19}){0,2}\.(\s|$)",
            )
            .unwrap(),
            numbered_regex: Regex::new(r"^\d{1,2}(\.\d{1,2})*\.?\s+\S").unwrap(),
        }
    }

    /// The scoring table in use.
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Whether text carries a lexical heading cue.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.section_word_regex.is_match(text)
            || self.enumerated_regex.is_match(text)
            || self.capitalized_prefix_regex.is_match(text)
    }

    /// Whether text starts with a dotted/decimal section number.
    pub fn is_numbered(&self, text: &str) -> bool {
        self.numbered_regex.is_match(text)
    }

    /// Evaluate the signals of `blocks[index]` against its neighbours.
    pub fn signals(&self, blocks: &[TextBlock], index: usize, profile: &SizeProfile) -> Signals {
        let t = &self.table;
        let block = &blocks[index];
        let text = block.text.trim();

        let prev = index
            .checked_sub(1)
            .and_then(|i| blocks.get(i))
            .filter(|p| p.page == block.page);
        let has_large_gap = prev
            .map(|p| block.top() - p.bottom() > t.large_gap)
            .unwrap_or(false);

        let is_followed_by_body = blocks
            .get(index + 1)
            .filter(|n| n.page == block.page)
            .map(|next| next.word_count >= t.max_short_words && next.line_count > 1)
            .unwrap_or(false);

        Signals {
            is_keyword: self.is_keyword(text),
            is_numbered: self.is_numbered(text),
            is_emphasized: block.is_bold || block.is_all_caps,
            is_short_single_line: block.word_count < t.max_short_words && block.line_count == 1,
            is_top_or_gap: block.is_within_top_band(t.top_band_ratio) || has_large_gap,
            is_followed_by_body,
            size_tier_match: profile.matches_heading_tier(block.avg_size, t.size_tolerance),
        }
    }

    /// Map a score and size to a level, or `None` for body text.
    pub fn level_for(&self, block: &TextBlock, score: u32, profile: &SizeProfile) -> Option<HeadingLevel> {
        let t = &self.table;
        let near = |tier: f32| (block.avg_size - tier).abs() <= t.size_tolerance;

        let page_one_top = block.page == 1 && block.is_within_top_band(t.top_band_ratio);
        if score >= t.thresholds.h1 && (near(profile.h1_size) || page_one_top) {
            Some(HeadingLevel::H1)
        } else if score >= t.thresholds.h2 && near(profile.h2_size) {
            Some(HeadingLevel::H2)
        } else if score >= t.thresholds.h3 && near(profile.h3_size) {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }

    /// Classify every admitted block, returning `(block index, candidate)`
    /// pairs in block order.
    pub fn classify(
        &self,
        blocks: &[TextBlock],
        profile: &SizeProfile,
        filter: &CandidateFilter,
    ) -> Vec<(usize, HeadingCandidate)> {
        blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| filter.admits(block))
            .filter_map(|(i, block)| {
                let score = self.signals(blocks, i, profile).score(&self.table.weights);
                self.level_for(block, score, profile).map(|level| {
                    let candidate = HeadingCandidate::new(
                        block.text.trim(),
                        block.page,
                        level,
                        score,
                        block.top(),
                    );
                    (i, candidate)
                })
            })
            .collect()
    }
}

impl Default for HeadingScorer {
    fn default() -> Self {
        Self::new(ScoringTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::AnalysisOptions;
    use crate::model::BBox;

    fn block(text: &str, page: u32, y: f32, size: f32, bold: bool, lines: usize) -> TextBlock {
        TextBlock {
            text: text.into(),
            page,
            bbox: BBox::new(72.0, y, 500.0, y + size * lines as f32),
            page_height: 792.0,
            avg_size: size,
            dominant_font: String::new(),
            is_bold: bold,
            is_all_caps: false,
            word_count: text.split_whitespace().count(),
            line_count: lines,
        }
    }

    fn body(page: u32, y: f32) -> TextBlock {
        block(
            "The committee reviewed every submission received during the period and \
             recorded its findings in the appendix attached to this report.",
            page,
            y,
            10.0,
            false,
            3,
        )
    }

    fn profile(blocks: &[TextBlock]) -> SizeProfile {
        SizeProfile::estimate(blocks, &ScoringTable::default())
    }

    #[test]
    fn test_keyword_patterns() {
        let scorer = HeadingScorer::default();
        assert!(scorer.is_keyword("Chapter 3: Results"));
        assert!(scorer.is_keyword("appendix B"));
        assert!(scorer.is_keyword("2.4 Budget"));
        assert!(scorer.is_keyword("B. Timeline"));
        assert!(scorer.is_keyword("IV. Scope"));
        assert!(scorer.is_keyword("Milestones. The plan covers"));
        assert!(!scorer.is_keyword("the quick brown fox"));
        assert!(!scorer.is_keyword("Sections were reviewed"));
    }

    #[test]
    fn test_numbered_pattern() {
        let scorer = HeadingScorer::default();
        assert!(scorer.is_numbered("1. Introduction"));
        assert!(scorer.is_numbered("1.1 Background"));
        assert!(scorer.is_numbered("10.2.3 Details"));
        assert!(!scorer.is_numbered("2019 was a good year"));
        assert!(!scorer.is_numbered("Introduction 1"));
    }

    #[test]
    fn test_signals_and_score() {
        let scorer = HeadingScorer::default();
        let blocks = vec![
            body(1, 100.0),
            block("1. Introduction", 1, 200.0, 18.0, true, 1),
            body(1, 230.0),
        ];
        let p = profile(&blocks);
        let s = scorer.signals(&blocks, 1, &p);

        assert!(s.is_keyword);
        assert!(s.is_numbered);
        assert!(s.is_emphasized);
        assert!(s.is_short_single_line);
        assert!(s.is_top_or_gap); // 200 - 130 > 20
        assert!(s.is_followed_by_body);
        assert!(s.size_tier_match);
        assert_eq!(s.score(&SignalWeights::default()), 12);
    }

    #[test]
    fn test_gap_only_counts_on_same_page() {
        let scorer = HeadingScorer::default();
        let blocks = vec![body(1, 600.0), block("Plain words", 2, 400.0, 10.0, false, 1)];
        let p = profile(&blocks);
        assert!(!scorer.signals(&blocks, 1, &p).is_top_or_gap);
    }

    #[test]
    fn test_body_on_next_page_does_not_follow() {
        let scorer = HeadingScorer::default();
        let blocks = vec![
            block("Closing Remarks", 1, 740.0, 14.0, true, 1),
            body(2, 80.0),
            block("Closing Remarks", 2, 300.0, 14.0, true, 1),
            body(2, 320.0),
        ];
        let p = profile(&blocks);
        assert!(!scorer.signals(&blocks, 0, &p).is_followed_by_body);
        assert!(scorer.signals(&blocks, 2, &p).is_followed_by_body);
    }

    #[test]
    fn test_level_requires_matching_tier() {
        let scorer = HeadingScorer::default();
        let blocks = vec![
            block("Big", 2, 300.0, 18.0, false, 1),
            block("Mid", 2, 400.0, 14.0, false, 1),
            block("Small", 2, 500.0, 12.0, false, 1),
            body(2, 600.0),
        ];
        let p = profile(&blocks);

        assert_eq!(scorer.level_for(&blocks[0], 5, &p), Some(HeadingLevel::H1));
        assert_eq!(scorer.level_for(&blocks[0], 4, &p), None);
        assert_eq!(scorer.level_for(&blocks[1], 4, &p), Some(HeadingLevel::H2));
        assert_eq!(scorer.level_for(&blocks[2], 3, &p), Some(HeadingLevel::H3));
        assert_eq!(scorer.level_for(&blocks[3], 9, &p), None);
    }

    #[test]
    fn test_page_one_top_promotes_to_h1() {
        let scorer = HeadingScorer::default();
        let blocks = vec![
            block("Big", 1, 400.0, 18.0, false, 1),
            block("Report Prepared For The Board", 1, 50.0, 14.0, true, 1),
        ];
        let p = profile(&blocks);
        assert_eq!(scorer.level_for(&blocks[1], 5, &p), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_classify_skips_filtered_blocks() {
        let scorer = HeadingScorer::default();
        let blocks = vec![
            block("1. Introduction", 1, 300.0, 18.0, true, 1),
            body(1, 330.0),
            block("Table of Contents", 2, 300.0, 18.0, true, 1),
            block("1. Introduction", 2, 340.0, 14.0, true, 1),
            block("2. Scope", 2, 360.0, 12.0, true, 1),
        ];
        let texts = vec![String::new(), "Table of Contents".to_string()];
        let filter = CandidateFilter::new(&blocks, &texts, &AnalysisOptions::default());
        let p = profile(&blocks);

        let found = scorer.classify(&blocks, &p, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, 0);
        assert_eq!(found[0].1.level, HeadingLevel::H1);
        assert_eq!(found[0].1.y_position, 300.0);
    }
}
