//! Title resolution.

use regex::Regex;

use super::options::TitleOptions;
use crate::model::{HeadingCandidate, HeadingLevel, TextBlock};

/// Where a resolved title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Document metadata
    Metadata,
    /// First near-top H1 candidate on page one
    Heading,
    /// Largest, topmost text near the top of page one
    Fallback,
    /// Nothing qualified
    None,
}

/// A resolved title and its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTitle {
    pub text: String,
    pub source: TitleSource,
}

impl ResolvedTitle {
    fn none() -> Self {
        Self {
            text: String::new(),
            source: TitleSource::None,
        }
    }
}

/// Picks the document title: metadata first, then page-one layout.
pub struct TitleResolver {
    options: TitleOptions,
    top_band_ratio: f32,
    extension_regex: Option<Regex>,
    numbered_regex: Regex,
}

impl TitleResolver {
    /// Create a resolver. `top_band_ratio` is the scorer's near-top band.
    pub fn new(options: TitleOptions, top_band_ratio: f32) -> Self {
        let extension_regex = if options.rejected_extensions.is_empty() {
            None
        } else {
            let alternatives = options
                .rejected_extensions
                .iter()
                .map(|e| regex::escape(e.trim_start_matches('.')))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"(?i)\.({})$", alternatives)).ok()
        };

        Self {
            options,
            top_band_ratio,
            extension_regex,
            numbered_regex: Regex::new(r"^\d{1,2}(\.\d{1,2})*\.?\s+\S").unwrap(),
        }
    }

    /// Whether a metadata title is usable rather than a file name or an
    /// authoring-tool stamp.
    pub fn is_meaningful_metadata(&self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        if let Some(ref re) = self.extension_regex {
            if re.is_match(title) {
                return false;
            }
        }
        let lower = title.to_lowercase();
        !self
            .options
            .rejected_signatures
            .iter()
            .any(|sig| lower.contains(&sig.to_lowercase()))
    }

    /// Resolve the title of a document.
    ///
    /// `candidates` are `(block index, candidate)` pairs from the scorer.
    pub fn resolve(
        &self,
        metadata_title: Option<&str>,
        blocks: &[TextBlock],
        candidates: &[(usize, HeadingCandidate)],
    ) -> ResolvedTitle {
        if let Some(title) = metadata_title.filter(|t| self.is_meaningful_metadata(t)) {
            return ResolvedTitle {
                text: title.trim().to_string(),
                source: TitleSource::Metadata,
            };
        }

        let from_heading = candidates.iter().find(|(i, c)| {
            c.page == 1
                && c.level == HeadingLevel::H1
                && !self.numbered_regex.is_match(&c.text)
                && blocks
                    .get(*i)
                    .map(|b| b.is_within_top_band(self.top_band_ratio))
                    .unwrap_or(false)
        });
        if let Some((_, c)) = from_heading {
            return ResolvedTitle {
                text: c.text.clone(),
                source: TitleSource::Heading,
            };
        }

        self.fallback(blocks)
    }

    /// Largest page-one text in the title band; the topmost wins ties.
    fn fallback(&self, blocks: &[TextBlock]) -> ResolvedTitle {
        let best = blocks
            .iter()
            .filter(|b| {
                b.page == 1
                    && b.is_within_top_band(self.options.title_band_ratio)
                    && !self.numbered_regex.is_match(b.text.trim())
            })
            .fold(None::<&TextBlock>, |best, b| match best {
                Some(cur)
                    if cur.avg_size > b.avg_size
                        || (cur.avg_size == b.avg_size && cur.top() <= b.top()) =>
                {
                    Some(cur)
                }
                _ => Some(b),
            });

        match best {
            Some(b) => ResolvedTitle {
                text: b.text.trim().to_string(),
                source: TitleSource::Fallback,
            },
            None => ResolvedTitle::none(),
        }
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new(TitleOptions::default(), 0.15)
    }
}
