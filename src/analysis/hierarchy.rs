//! Hierarchy repair over an ordered heading sequence.

use crate::model::{HeadingCandidate, HeadingLevel};

/// Demote every H3 that directly follows an H1 to H2.
///
/// One forward pass; the comparison uses the previous heading's level
/// after its own repair. No other transition is touched, so running the
/// pass again changes nothing. Returns the number of demotions.
pub fn repair_hierarchy(headings: &mut [HeadingCandidate]) -> usize {
    let mut repaired = 0;
    let mut prev: Option<HeadingLevel> = None;

    for heading in headings.iter_mut() {
        if prev == Some(HeadingLevel::H1) && heading.level == HeadingLevel::H3 {
            heading.level = HeadingLevel::H2;
            repaired += 1;
        }
        prev = Some(heading.level);
    }

    repaired
}

/// Whether no heading descends more than one level from its predecessor.
pub fn is_consistent(headings: &[HeadingCandidate]) -> bool {
    headings
        .windows(2)
        .all(|w| w[1].level.depth() <= w[0].level.depth() + 1)
}
