//! Positioned text block types.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page units.
///
/// Origin is the top-left corner of the page and `y` grows downward, so
/// `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// A box with no area carries no usable position.
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        BBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// A logical block of text on one page, with aggregate style attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Run texts joined by single spaces
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Block bounding box
    pub bbox: BBox,

    /// Height of the page the block sits on
    pub page_height: f32,

    /// Arithmetic mean of the constituent run sizes
    pub avg_size: f32,

    /// Font name covering the most characters
    pub dominant_font: String,

    /// Any run uses a bold or black face
    pub is_bold: bool,

    /// Every alphabetic character is uppercase
    pub is_all_caps: bool,

    /// Whitespace-separated word count
    pub word_count: usize,

    /// Number of visual lines with text
    pub line_count: usize,
}

impl TextBlock {
    /// Top edge of the block.
    pub fn top(&self) -> f32 {
        self.bbox.y0
    }

    /// Bottom edge of the block.
    pub fn bottom(&self) -> f32 {
        self.bbox.y1
    }

    /// Whether the block's top lies within `ratio` of the page height.
    ///
    /// A block without a box has no known position and is never in the
    /// band. Pages with unknown height fall back to a 100-unit band.
    pub fn is_within_top_band(&self, ratio: f32) -> bool {
        if self.bbox.is_empty() {
            false
        } else if self.page_height > 0.0 {
            self.bbox.y0 <= self.page_height * ratio
        } else {
            self.bbox.y0 <= 100.0
        }
    }
}
