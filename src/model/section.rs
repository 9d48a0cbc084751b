//! Section types produced by segmentation and ranking.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A contiguous run of pages introduced by one heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Source document identifier
    pub document_id: String,

    /// First page of the section (1-indexed)
    pub start_page: u32,

    /// Last page of the section (inclusive)
    pub end_page: u32,

    /// Heading text that opens the section
    pub title: String,

    /// Full text of every page in the range
    pub body_text: String,
}

impl Section {
    /// Pages covered by the section.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start_page..=self.end_page
    }

    /// Number of pages covered.
    pub fn page_span(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page) + 1
    }
}

/// A section with its relevance score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub section: Section,

    /// Cosine similarity to the query, in [0, 1]
    pub relevance_score: f64,

    /// 1-based position in the ranking
    pub rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_pages() {
        let section = Section {
            document_id: "a.pdf".into(),
            start_page: 2,
            end_page: 4,
            title: "Methods".into(),
            body_text: String::new(),
        };
        assert_eq!(section.pages().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(section.page_span(), 3);
    }
}
