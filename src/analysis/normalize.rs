//! Layout normalization: engine blocks to [`TextBlock`]s.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use super::options::ErrorMode;
use crate::error::{Result, Warning};
use crate::layout::{LayoutBlock, LayoutProvider, PageLayout};
use crate::model::{BBox, TextBlock};

/// Normalized blocks and page texts of one document.
#[derive(Debug, Clone, Default)]
pub struct NormalizedLayout {
    /// Document identifier reported by the provider
    pub document_id: String,

    /// Total number of pages, including skipped ones
    pub page_count: u32,

    /// Blocks ordered by (page, reading position)
    pub blocks: Vec<TextBlock>,

    /// Plain text per page; index 0 is page 1, skipped pages are empty
    pub page_texts: Vec<String>,

    /// Pages skipped along the way
    pub warnings: Vec<Warning>,
}

impl NormalizedLayout {
    /// Blocks on one page.
    pub fn page_blocks(&self, page: u32) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(move |b| b.page == page)
    }

    /// Check if no text was extracted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Walk every page of a provider and normalize its blocks.
///
/// In lenient mode an undecodable page is recorded as a
/// [`Warning::PageSkipped`] and contributes no blocks and empty text.
pub fn normalize_document<P: LayoutProvider + ?Sized>(
    provider: &P,
    mode: ErrorMode,
) -> Result<NormalizedLayout> {
    let page_count = provider.page_count();
    let mut layout = NormalizedLayout {
        document_id: provider.document_id().to_string(),
        page_count,
        blocks: Vec::new(),
        page_texts: Vec::with_capacity(page_count as usize),
        warnings: Vec::new(),
    };

    for number in 1..=page_count {
        match provider.page(number) {
            Ok(page) => {
                layout.blocks.extend(normalize_page(&page, number));
                layout.page_texts.push(page.plain_text());
            }
            Err(e) => {
                if mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!(
                    "Skipping page {} of {}: {}",
                    number,
                    layout.document_id,
                    e
                );
                layout.warnings.push(Warning::PageSkipped {
                    page: number,
                    message: e.to_string(),
                });
                layout.page_texts.push(String::new());
            }
        }
    }

    Ok(layout)
}

/// Normalize all text blocks of a page, in reading order.
pub fn normalize_page(page: &PageLayout, number: u32) -> Vec<TextBlock> {
    page.blocks
        .iter()
        .filter_map(|block| normalize_block(block, number, page.height))
        .collect()
}

/// Collapse one engine block into a [`TextBlock`].
///
/// Returns `None` when the block holds no non-whitespace text.
pub fn normalize_block(block: &LayoutBlock, page: u32, page_height: f32) -> Option<TextBlock> {
    let mut pieces: Vec<String> = Vec::new();
    let mut size_sum = 0.0f32;
    let mut run_count = 0usize;
    let mut is_bold = false;
    let mut run_box = BBox::default();
    let mut font_chars: HashMap<&str, usize> = HashMap::new();
    let mut line_count = 0usize;

    for line in &block.lines {
        let mut line_has_text = false;
        for run in &line.spans {
            let text = run.text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                continue;
            }
            line_has_text = true;
            size_sum += run.size;
            run_count += 1;
            is_bold |= run.is_bold();
            run_box = run_box.union(&run.bbox);
            *font_chars.entry(run.font.as_str()).or_insert(0) += text.chars().count();
            pieces.push(text);
        }
        if line_has_text {
            line_count += 1;
        }
    }

    if pieces.is_empty() {
        return None;
    }

    let text: String = pieces.join(" ").nfc().collect();
    let dominant_font = font_chars
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(font, _)| font.to_string())
        .unwrap_or_default();
    let bbox = if block.bbox.is_empty() {
        run_box
    } else {
        block.bbox
    };

    Some(TextBlock {
        word_count: text.split_whitespace().count(),
        is_all_caps: is_all_caps(&text),
        text,
        page,
        bbox,
        page_height,
        avg_size: size_sum / run_count as f32,
        dominant_font,
        is_bold,
        line_count: line_count.max(1),
    })
}

/// True when the text has letters and every one of them is uppercase.
fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutDocument, LayoutLine, TextRun};

    fn run(text: &str, font: &str, size: f32) -> TextRun {
        TextRun::new(text, font, size, BBox::new(72.0, 100.0, 200.0, 112.0))
    }

    #[test]
    fn test_block_aggregates() {
        let block = LayoutBlock::from_lines(vec![
            LayoutLine::from_runs(vec![run("Hello", "Times-Bold", 12.0), run("  ", "Times", 30.0)]),
            LayoutLine::from_runs(vec![run("big  world", "Times", 14.0)]),
        ]);

        let tb = normalize_block(&block, 2, 792.0).unwrap();
        assert_eq!(tb.text, "Hello big world");
        assert_eq!(tb.page, 2);
        assert!((tb.avg_size - 13.0).abs() < 1e-6);
        assert!(tb.is_bold);
        assert!(!tb.is_all_caps);
        assert_eq!(tb.word_count, 3);
        assert_eq!(tb.line_count, 2);
        assert_eq!(tb.dominant_font, "Times");
    }

    #[test]
    fn test_whitespace_block_discarded() {
        let block = LayoutBlock::from_lines(vec![LayoutLine::from_runs(vec![run(
            " \t ", "Times", 12.0,
        )])]);
        assert!(normalize_block(&block, 1, 792.0).is_none());
        assert!(normalize_block(&LayoutBlock::default(), 1, 792.0).is_none());
    }

    #[test]
    fn test_all_caps_requires_letters() {
        assert!(is_all_caps("SUMMARY OF FINDINGS 2024"));
        assert!(!is_all_caps("Summary"));
        assert!(!is_all_caps("2024 - 12"));
    }

    #[test]
    fn test_lenient_skips_bad_page() {
        let mut good = PageLayout::letter(1);
        good.add_text("Readable", "Times", 12.0, BBox::new(72.0, 72.0, 200.0, 84.0));
        let doc = LayoutDocument::new("doc.json")
            .with_page(good.clone())
            .with_page(PageLayout::unreadable(2, "broken xref"))
            .with_page(good);

        let layout = normalize_document(&doc, ErrorMode::Lenient).unwrap();
        assert_eq!(layout.page_count, 3);
        assert_eq!(layout.blocks.len(), 2);
        assert_eq!(layout.page_texts, vec!["Readable", "", "Readable"]);
        assert!(matches!(
            layout.warnings.as_slice(),
            [Warning::PageSkipped { page: 2, .. }]
        ));
        assert_eq!(layout.page_blocks(3).count(), 1);
    }

    #[test]
    fn test_strict_propagates_page_error() {
        let doc = LayoutDocument::new("doc.json").with_page(PageLayout::unreadable(1, "bad"));
        assert!(normalize_document(&doc, ErrorMode::Strict).is_err());
    }
}
