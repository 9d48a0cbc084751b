//! Layout provider abstraction.
//!
//! Provides a trait-based interface to whatever text-layout engine opened
//! the document, isolating the analysis pipeline from the concrete engine.
//! A provider yields, per page, blocks of lines of positioned text runs.
//!
//! Pages are addressed by 1-indexed page number throughout.

mod document;

pub use document::LayoutDocument;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::BBox;

/// A run of text sharing one font and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(alias = "font_name", default)]
    pub font: String,

    /// Font size in points
    pub size: f32,

    /// Run bounding box
    #[serde(default)]
    pub bbox: BBox,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            bbox,
        }
    }

    /// Whether the font name carries a bold weight marker.
    pub fn is_bold(&self) -> bool {
        let name = self.font.to_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }
}

/// A visual line made of text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    #[serde(default)]
    pub bbox: BBox,

    #[serde(default)]
    pub spans: Vec<TextRun>,
}

impl LayoutLine {
    /// Create a line from runs; the box covers all run boxes.
    pub fn from_runs(spans: Vec<TextRun>) -> Self {
        let bbox = spans
            .iter()
            .fold(BBox::default(), |acc, run| acc.union(&run.bbox));
        Self { bbox, spans }
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A block of lines as grouped by the layout engine.
///
/// Blocks without lines (images, drawings) are carried but contain no text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    #[serde(default)]
    pub bbox: BBox,

    #[serde(default)]
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Create a block from lines; the box covers all line boxes.
    pub fn from_lines(lines: Vec<LayoutLine>) -> Self {
        let bbox = lines
            .iter()
            .fold(BBox::default(), |acc, line| acc.union(&line.bbox));
        Self { bbox, lines }
    }

    /// Block text with lines separated by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One page of layout output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    #[serde(default)]
    pub number: u32,

    /// Page width in points
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Blocks in reading order
    #[serde(default)]
    pub blocks: Vec<LayoutBlock>,

    /// Set when the engine failed to decode this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageLayout {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
            error: None,
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Create a page that the engine could not decode.
    pub fn unreadable(number: u32, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::letter(number)
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Add a single-line, single-run block.
    pub fn add_text(&mut self, text: impl Into<String>, font: impl Into<String>, size: f32, bbox: BBox) {
        let line = LayoutLine::from_runs(vec![TextRun::new(text, font, size, bbox)]);
        self.add_block(LayoutBlock::from_lines(vec![line]));
    }

    /// Plain text of the page: block texts separated by newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Boxes of the lines whose text contains `needle`.
    pub fn search_for(&self, needle: &str) -> Vec<BBox> {
        if needle.is_empty() {
            return Vec::new();
        }
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .filter(|l| l.text().contains(needle))
            .map(|l| l.bbox)
            .collect()
    }
}

/// Abstract interface to a document layout engine.
///
/// Implementations provide page enumeration, per-page layout, literal text
/// search and document metadata, without exposing engine-specific types.
pub trait LayoutProvider {
    /// Identifier used in logs and errors.
    fn document_id(&self) -> &str;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Layout of one page (1-indexed).
    fn page(&self, number: u32) -> Result<Cow<'_, PageLayout>>;

    /// Title recorded in the document metadata, if any.
    fn metadata_title(&self) -> Option<&str>;

    /// Bounding boxes of occurrences of a literal string on a page.
    fn search_for(&self, number: u32, needle: &str) -> Result<Vec<BBox>> {
        Ok(self.page(number)?.search_for(needle))
    }

    /// Plain text of one page.
    fn page_text(&self, number: u32) -> Result<String> {
        Ok(self.page(number)?.plain_text())
    }
}

/// Check a page number against a provider's page count.
pub(crate) fn check_page(number: u32, count: u32) -> Result<()> {
    if number == 0 || number > count {
        return Err(Error::PageOutOfRange(number, count));
    }
    Ok(())
}
