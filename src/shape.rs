//! The interface to the text shaper.

use std::ops::Range;

use crate::extent::VerticalExtent;
use crate::hyphen::HyphenEdit;

/// Direction override for measuring a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidiFlags {
    ForceLtr,
    ForceRtl,
}

/// Style inputs forwarded to the shaper.
///
/// Only `size` and `scale_x` influence the engine itself (they feed the
/// hyphen penalty); the rest passes through to [`Shaper::measure_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub size: f32,
    pub scale_x: f32,
    pub skew_x: f32,
    pub letter_spacing: f32,
    pub word_spacing: f32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            size: 0.0,
            scale_x: 1.0,
            skew_x: 0.0,
            letter_spacing: 0.0,
            word_spacing: 0.0,
        }
    }
}

/// Measures shaped text.
pub trait Shaper {
    /// Measures `range` of `text` and returns its total advance width.
    ///
    /// The full paragraph is passed so the shaper can take context outside
    /// the range into account. When `widths` or `extents` are present they
    /// cover exactly `range` and receive the per-code-unit advances and
    /// vertical extents. `hyphen_edit` selects hyphen shaping at the edges
    /// of the measured piece.
    #[allow(clippy::too_many_arguments)]
    fn measure_text(
        &self,
        text: &[u16],
        range: Range<usize>,
        bidi: BidiFlags,
        paint: &Paint,
        hyphen_edit: HyphenEdit,
        widths: Option<&mut [f32]>,
        extents: Option<&mut [VerticalExtent]>,
    ) -> f32;
}

/// A styled run fed to the line breaker.
///
/// Replacement spans have no run; their widths are installed up front.
pub struct StyleRun<'a> {
    pub shaper: &'a dyn Shaper,
    pub paint: &'a Paint,
}
