//! Line breaking for paragraphs of shaped text.
//!
//! The input is a paragraph of UTF-16 code units together with per-code-unit
//! advance widths and vertical extents, as produced by a text shaper. From
//! those, plus break opportunities from a segmenter and word-internal break
//! classifications from a hyphenator, the [`LineBreaker`] computes the
//! offsets at which the paragraph breaks into lines, along with each line's
//! width, ascent, descent and boundary flags.
//!
//! Two strategies are available: a single-pass greedy breaker that commits a
//! break as soon as the next candidate would overflow the line, and a
//! minimum-cost breaker that scores all candidate sequences with a dynamic
//! program and picks the globally cheapest one. Tabs are stateful and force
//! the greedy strategy for the rest of the paragraph.
//!
//! The engine does not shape, justify, reorder or paint text. The shaper,
//! the segmenter, the hyphenator and the per-line width source are consumed
//! through the [`Shaper`], [`Segmenter`], [`Hyphenator`] and [`LineWidths`]
//! traits; ICU-backed segmentation ([`UnicodeSegmenter`]) and pattern-based
//! hyphenation ([`PatternHyphenator`]) are provided.

mod breaker;
mod candidate;
mod chars;
mod extent;
mod greedy;
mod hyphen;
mod optimal;
mod run;
mod segment;
mod shape;
mod tabs;
mod widths;

pub use icu_locid::LanguageIdentifier;

pub use crate::breaker::{BreakFlags, BreakStrategy, HyphenationFrequency, LineBreaker};
pub use crate::extent::VerticalExtent;
pub use crate::hyphen::{HyphenEdit, HyphenationType, Hyphenator, PatternHyphenator};
pub use crate::segment::{Segmenter, UnicodeSegmenter};
pub use crate::shape::{BidiFlags, Paint, Shaper, StyleRun};
pub use crate::tabs::TabStops;
pub use crate::widths::LineWidths;
