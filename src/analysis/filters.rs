//! Pre-scoring filters that rule blocks out as headings.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::options::AnalysisOptions;
use crate::model::TextBlock;

/// Rejects blocks that can never be headings: running headers and
/// footers, table-of-contents entries, overlong text, and date lines.
pub struct CandidateFilter {
    repeated: HashSet<String>,
    toc_pages: HashSet<u32>,
    max_chars: usize,
    date_regex: Regex,
}

impl CandidateFilter {
    /// Build a filter for one document.
    pub fn new(blocks: &[TextBlock], page_texts: &[String], options: &AnalysisOptions) -> Self {
        let repeated = if options.filter_repeated_text {
            repeated_texts(blocks, page_texts.len())
        } else {
            HashSet::new()
        };

        let toc_pages = if options.skip_toc_pages {
            page_texts
                .iter()
                .enumerate()
                .filter(|(_, text)| text.to_lowercase().contains("table of contents"))
                .map(|(i, _)| i as u32 + 1)
                .collect()
        } else {
            HashSet::new()
        };

        Self {
            repeated,
            toc_pages,
            max_chars: options.max_heading_chars,
            date_regex: Regex::new(r"(?i)^\d{1,2}\s+[a-z]{3,9}\.?,?\s+\d{4}$").unwrap(),
        }
    }

    /// Whether the block may still be classified as a heading.
    pub fn admits(&self, block: &TextBlock) -> bool {
        let text = block.text.trim();
        !(text.chars().count() > self.max_chars
            || self.toc_pages.contains(&block.page)
            || self.repeated.contains(text)
            || self.date_regex.is_match(text))
    }

    /// Pages treated as table of contents.
    pub fn toc_pages(&self) -> &HashSet<u32> {
        &self.toc_pages
    }
}

/// Texts occurring more than `max(2, pages / 2)` times.
fn repeated_texts(blocks: &[TextBlock], page_count: usize) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for block in blocks {
        *counts.entry(block.text.trim()).or_insert(0) += 1;
    }
    let limit = (page_count as f32 * 0.5).max(2.0);
    counts
        .into_iter()
        .filter(|(_, count)| *count as f32 > limit)
        .map(|(text, _)| text.to_string())
        .collect()
}
