//! Tab stop resolution.

use smallvec::SmallVec;

/// Resolved tab stops for a paragraph.
///
/// Explicit stops are consulted first; past the last one, stops repeat at
/// multiples of the default tab width.
#[derive(Debug, Clone, Default)]
pub struct TabStops {
    stops: SmallVec<[f32; 8]>,
    tab_width: f32,
}

impl TabStops {
    pub fn new(stops: &[f32], tab_width: f32) -> Self {
        Self { stops: SmallVec::from_slice(stops), tab_width }
    }

    pub fn set(&mut self, stops: &[f32], tab_width: f32) {
        self.stops.clear();
        self.stops.extend_from_slice(stops);
        self.tab_width = tab_width;
    }

    /// The position of the first tab stop after `width_so_far`.
    pub fn next_tab(&self, width_so_far: f32) -> f32 {
        for &stop in &self.stops {
            if stop > width_so_far {
                return stop;
            }
        }
        if self.tab_width > 0.0 {
            (width_so_far / self.tab_width + 1.0).floor() * self.tab_width
        } else {
            width_so_far
        }
    }
}
