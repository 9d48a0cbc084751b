//! Outline extraction pipeline: Normalize → Estimate → Classify.

use super::filters::CandidateFilter;
use super::hierarchy::repair_hierarchy;
use super::normalize::{normalize_document, NormalizedLayout};
use super::options::AnalysisOptions;
use super::scorer::HeadingScorer;
use super::stats::SizeProfile;
use super::title::{TitleResolver, TitleSource};
use crate::error::{Result, Warning};
use crate::layout::LayoutProvider;
use crate::model::{HeadingCandidate, Outline, TextBlock};

/// Everything learned about one document in a single extraction pass.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Document identifier reported by the provider
    pub document_id: String,

    /// Title and repaired heading sequence
    pub outline: Outline,

    /// Where the title came from
    pub title_source: TitleSource,

    /// Size profile the headings were classified against
    pub profile: SizeProfile,

    /// Plain text per page; index 0 is page 1
    pub page_texts: Vec<String>,

    /// Total number of pages
    pub page_count: u32,

    /// Number of normalized blocks
    pub block_count: usize,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<Warning>,
}

/// Extracts outlines from layout providers.
///
/// The extractor holds only configuration and compiled patterns; every
/// call to [`extract`](Self::extract) builds its own document-scoped
/// state, so one extractor can serve many threads.
pub struct OutlineExtractor {
    options: AnalysisOptions,
    scorer: HeadingScorer,
    titles: TitleResolver,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: AnalysisOptions) -> Self {
        let scorer = HeadingScorer::new(options.scoring.clone());
        let titles = TitleResolver::new(
            options.scoring.title.clone(),
            options.scoring.top_band_ratio,
        );
        Self {
            options,
            scorer,
            titles,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Stage 1: normalize every page of the provider.
    pub fn normalize<P: LayoutProvider + ?Sized>(&self, provider: &P) -> Result<NormalizedLayout> {
        normalize_document(provider, self.options.error_mode)
    }

    /// Stage 2: estimate the size profile of normalized blocks.
    pub fn estimate(&self, blocks: &[TextBlock]) -> SizeProfile {
        SizeProfile::estimate(blocks, &self.options.scoring)
    }

    /// Run the full pipeline over one document.
    pub fn extract<P: LayoutProvider + ?Sized>(&self, provider: &P) -> Result<DocumentAnalysis> {
        let mut layout = self.normalize(provider)?;
        recover_positions(provider, &mut layout.blocks);
        let profile = self.estimate(&layout.blocks);

        let NormalizedLayout {
            document_id,
            page_count,
            blocks,
            page_texts,
            mut warnings,
        } = layout;

        if blocks.is_empty() {
            log::warn!("{}: no extractable text", document_id);
            warnings.push(Warning::EmptyDocument);
            return Ok(DocumentAnalysis {
                document_id,
                outline: Outline::empty(),
                title_source: TitleSource::None,
                profile,
                page_texts,
                page_count,
                block_count: 0,
                warnings,
            });
        }

        log::debug!(
            "{}: {} blocks, median {:.1}, tiers {:?}",
            document_id,
            blocks.len(),
            profile.median_size,
            profile.tiers()
        );

        // Stage 3: classify
        let filter = CandidateFilter::new(&blocks, &page_texts, &self.options);
        let classified = self.scorer.classify(&blocks, &profile, &filter);

        let title = self
            .titles
            .resolve(provider.metadata_title(), &blocks, &classified);

        let mut headings: Vec<HeadingCandidate> = classified
            .into_iter()
            .map(|(_, candidate)| candidate)
            .filter(|c| title.text.is_empty() || !(c.page == 1 && c.text == title.text))
            .collect();
        headings.sort_by(|a, b| a.reading_order(b));
        let repaired = repair_hierarchy(&mut headings);

        log::debug!(
            "{}: title {:?} ({:?}), {} headings, {} repaired",
            document_id,
            title.text,
            title.source,
            headings.len(),
            repaired
        );

        Ok(DocumentAnalysis {
            document_id,
            outline: Outline::new(title.text, headings),
            title_source: title.source,
            profile,
            page_texts,
            page_count,
            block_count: blocks.len(),
            warnings,
        })
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

/// Give blocks the engine reported without a box the box of their text's
/// first match on the page, so position signals see where they really are.
fn recover_positions<P: LayoutProvider + ?Sized>(provider: &P, blocks: &mut [TextBlock]) {
    for block in blocks.iter_mut().filter(|b| b.bbox.is_empty()) {
        match provider.search_for(block.page, block.text.trim()) {
            Ok(hits) => match hits.first() {
                Some(hit) => block.bbox = *hit,
                None => log::debug!("no position found for {:?}", block.text),
            },
            Err(e) => log::debug!("search for {:?} failed: {}", block.text, e),
        }
    }
}
