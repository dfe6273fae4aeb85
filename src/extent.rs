/// Vertical metrics of a piece of text.
///
/// Extents form a monoid: the zero extent is the identity and [`extend_by`]
/// combines two extents by taking the component-wise maximum.
///
/// [`extend_by`]: VerticalExtent::extend_by
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VerticalExtent {
    /// Rise above the baseline.
    pub ascent: f32,
    /// Drop below the baseline.
    pub descent: f32,
    /// Extra leading below the descent.
    pub line_gap: f32,
}

impl VerticalExtent {
    /// Grows this extent to cover `other`.
    pub fn extend_by(&mut self, other: Self) {
        self.ascent = self.ascent.max(other.ascent);
        self.descent = self.descent.max(other.descent);
        self.line_gap = self.line_gap.max(other.line_gap);
    }
}
