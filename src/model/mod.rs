//! Document model types for outline extraction and section ranking.
//!
//! This module defines the values that flow between pipeline stages:
//! normalized text blocks, heading candidates, the resulting outline, and
//! the sections cut from it. All of them are plain data, created once and
//! never mutated after a stage hands them on.

mod block;
mod outline;
mod section;

pub use block::{BBox, TextBlock};
pub use outline::{HeadingCandidate, HeadingLevel, Outline};
pub use section::{RankedSection, Section};
