//! Heading and outline types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Heading level in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1 = top level).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level for a numeric depth, if it is one of the three supported.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block classified as a heading, pending hierarchy repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Assigned level
    pub level: HeadingLevel,

    /// Sum of signal weights that fired
    pub score: u32,

    /// Top edge of the heading on its page
    pub y_position: f32,
}

impl HeadingCandidate {
    /// Create a new heading candidate.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        level: HeadingLevel,
        score: u32,
        y_position: f32,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            level,
            score,
            y_position,
        }
    }

    /// Reading-order comparison: page first, then vertical position.
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.page.cmp(&other.page).then(
            self.y_position
                .partial_cmp(&other.y_position)
                .unwrap_or(Ordering::Equal),
        )
    }
}

/// Document title plus the ordered heading sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty when none could be resolved)
    pub title: String,

    /// Headings in reading order
    pub headings: Vec<HeadingCandidate>,
}

impl Outline {
    /// Create an outline from a title and headings.
    pub fn new(title: impl Into<String>, headings: Vec<HeadingCandidate>) -> Self {
        Self {
            title: title.into(),
            headings,
        }
    }

    /// An outline with no title and no headings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Heading levels in order.
    pub fn levels(&self) -> Vec<HeadingLevel> {
        self.headings.iter().map(|h| h.level).collect()
    }

    /// Whether headings are sorted by (page, y position).
    pub fn is_in_reading_order(&self) -> bool {
        self.headings
            .windows(2)
            .all(|w| w[0].reading_order(&w[1]) != Ordering::Greater)
    }
}
