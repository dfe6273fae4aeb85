//! Break candidates.

use crate::extent::VerticalExtent;
use crate::hyphen::HyphenationType;

/// A potential break with the widths and costs of choosing it.
///
/// `pre_break` is the cumulative paragraph width including the candidate's
/// trailing run of line-end whitespace, which is where the next line starts
/// when this candidate is chosen. `post_break` excludes that whitespace and
/// is the width of a line ending here. A chosen candidate's line is thus
/// `post_break` minus the previously chosen candidate's `pre_break`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Code unit offset of the break.
    pub offset: usize,
    pub pre_break: f64,
    pub post_break: f64,
    /// Cost of choosing this candidate as a break.
    pub penalty: f32,
    /// Shrinkable spaces up to `pre_break`.
    pub pre_space_count: usize,
    /// Shrinkable spaces up to `post_break`.
    pub post_space_count: usize,
    /// Vertical extent of the segment since the previous candidate.
    pub extent: VerticalExtent,
    pub hyphen_type: HyphenationType,
    /// Best total cost of a paragraph ending here (minimum-cost mode).
    pub score: f32,
    /// Predecessor on the best path (minimum-cost mode).
    pub prev: usize,
}

impl Candidate {
    /// The start-of-paragraph sentinel at offset zero.
    pub fn sentinel() -> Self {
        Self {
            offset: 0,
            pre_break: 0.0,
            post_break: 0.0,
            penalty: 0.0,
            pre_space_count: 0,
            post_space_count: 0,
            extent: VerticalExtent::default(),
            hyphen_type: HyphenationType::DontBreak,
            score: 0.0,
            prev: 0,
        }
    }
}
