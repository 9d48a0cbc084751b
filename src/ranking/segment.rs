//! Section segmentation at page granularity.

use crate::model::{Outline, Section};

/// Cut a document's pages into sections at heading pages.
///
/// `page_texts[0]` is page 1. A section runs from its heading's page up to
/// the page before the next heading's page; the last one runs to the end of
/// the document. Headings sharing a page each take that page's full text.
/// Pages before the first heading form a leading section named after the
/// document title, and a document without headings is a single section.
pub fn segment_sections(document_id: &str, outline: &Outline, page_texts: &[String]) -> Vec<Section> {
    let page_count = page_texts.len() as u32;
    if page_count == 0 {
        return Vec::new();
    }

    let make = |start: u32, end: u32, title: &str| Section {
        document_id: document_id.to_string(),
        start_page: start,
        end_page: end,
        title: title.to_string(),
        body_text: join_pages(page_texts, start, end),
    };

    // Headings past the last page (stale provider data) are ignored.
    let cuts: Vec<_> = outline
        .headings
        .iter()
        .filter(|h| h.page >= 1 && h.page <= page_count)
        .collect();

    let Some(first) = cuts.first() else {
        return vec![make(1, page_count, &outline.title)];
    };

    let mut sections = Vec::with_capacity(cuts.len() + 1);
    if first.page > 1 {
        sections.push(make(1, first.page - 1, &outline.title));
    }

    for (i, heading) in cuts.iter().enumerate() {
        let end = match cuts.get(i + 1) {
            Some(next) => next.page.saturating_sub(1).max(heading.page),
            None => page_count,
        };
        sections.push(make(heading.page, end, &heading.text));
    }

    sections
}

fn join_pages(page_texts: &[String], start: u32, end: u32) -> String {
    page_texts[(start - 1) as usize..end as usize]
        .iter()
        .map(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
