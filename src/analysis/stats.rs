//! Corpus statistics: document-wide font size profile.

use std::collections::HashMap;

use serde::Serialize;

use super::options::ScoringTable;
use crate::model::TextBlock;

/// Number of size tiers (H1, H2, H3, body).
pub const TIER_COUNT: usize = 4;

/// Font size statistics for one document.
///
/// Computed once over all blocks before any block is classified, and
/// passed explicitly to the scorer. Never shared across documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeProfile {
    /// Middle element of the sorted valid sizes
    pub median_size: f32,

    /// Most prominent distinct sizes, largest first (at most four)
    pub top_sizes: Vec<f32>,

    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,

    /// Observations per size rounded to 0.1
    pub histogram: HashMap<i32, usize>,
}

impl SizeProfile {
    /// Estimate the profile of a document from its blocks.
    pub fn estimate(blocks: &[TextBlock], table: &ScoringTable) -> Self {
        let mut sizes: Vec<f32> = blocks
            .iter()
            .map(|b| b.avg_size)
            .filter(|s| table.is_valid_size(*s))
            .collect();
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median_size = if sizes.is_empty() {
            table.default_median
        } else {
            sizes[sizes.len() / 2]
        };

        let mut histogram: HashMap<i32, usize> = HashMap::new();
        for size in &sizes {
            *histogram.entry(size_key(*size)).or_insert(0) += 1;
        }

        // Largest first; frequency breaks ties between keys of equal size.
        let mut ranked: Vec<(i32, usize)> = histogram.iter().map(|(k, c)| (*k, *c)).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        let top_sizes: Vec<f32> = ranked
            .iter()
            .take(TIER_COUNT)
            .map(|(k, _)| *k as f32 / 10.0)
            .collect();

        let tiers = derive_tiers(&top_sizes, median_size, table);

        Self {
            median_size,
            top_sizes,
            h1_size: tiers[0],
            h2_size: tiers[1],
            h3_size: tiers[2],
            body_size: tiers[3],
            histogram,
        }
    }

    /// Tier sizes in order H1, H2, H3, body.
    pub fn tiers(&self) -> [f32; TIER_COUNT] {
        [self.h1_size, self.h2_size, self.h3_size, self.body_size]
    }

    /// Whether `size` is within `tolerance` of any heading tier.
    pub fn matches_heading_tier(&self, size: f32, tolerance: f32) -> bool {
        [self.h1_size, self.h2_size, self.h3_size]
            .iter()
            .any(|tier| (size - tier).abs() <= tolerance)
    }

    /// Number of distinct valid sizes observed.
    pub fn distinct_sizes(&self) -> usize {
        self.histogram.len()
    }
}

/// Fill missing tiers geometrically below the observed ones.
fn derive_tiers(observed: &[f32], median: f32, table: &ScoringTable) -> [f32; TIER_COUNT] {
    let mut tiers = [0.0f32; TIER_COUNT];
    let mut prev = observed.first().copied().unwrap_or(median);
    for (i, tier) in tiers.iter_mut().enumerate() {
        *tier = match observed.get(i) {
            Some(size) => *size,
            None if i == 0 => prev,
            None if i == TIER_COUNT - 1 => prev * table.body_decay,
            None => prev * table.tier_decay,
        };
        prev = *tier;
    }
    tiers
}

/// Histogram key: size rounded to one decimal.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}
