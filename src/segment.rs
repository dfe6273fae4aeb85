//! Break opportunity enumeration.

use icu_locid::LanguageIdentifier;
use icu_segmenter::LineSegmenter;
use once_cell::sync::Lazy;

use crate::chars::is_line_end_space;

/// The shared UAX #14 segmenter backing [`UnicodeSegmenter`].
static SEGMENTER: Lazy<LineSegmenter> = Lazy::new(LineSegmenter::new_auto);

/// Enumerates break opportunities over a paragraph of UTF-16 code units.
///
/// After `set_text`, each call to `next` advances to the following
/// opportunity and `current` reports the offset most recently returned.
/// `word_start` and `word_end` bound the word between the previous and the
/// current opportunity with surrounding whitespace trimmed, which is the
/// piece handed to the hyphenator.
pub trait Segmenter {
    fn set_locale(&mut self, locale: &LanguageIdentifier);
    fn set_text(&mut self, text: &[u16]);
    fn next(&mut self) -> Option<usize>;
    fn current(&self) -> Option<usize>;
    fn word_start(&self) -> usize;
    fn word_end(&self) -> usize;
    /// Extra badness of breaking at `current`, as a multiplier on the word
    /// break penalty. Zero for ordinary opportunities.
    fn break_badness(&self) -> f32;
    fn finish(&mut self);
}

/// ICU-backed [`Segmenter`].
///
/// Break opportunities are UAX #14 line break opportunities, so inter-word
/// boundaries land after any trailing whitespace, at the first code unit of
/// the following word.
#[derive(Debug, Default)]
pub struct UnicodeSegmenter {
    text: Vec<u16>,
    boundaries: Vec<usize>,
    pos: usize,
    last: usize,
    current: Option<usize>,
}

impl UnicodeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Segmenter for UnicodeSegmenter {
    fn set_locale(&mut self, _locale: &LanguageIdentifier) {
        // Segmentation is content-driven; the CJ dictionaries are selected
        // per script, not per locale.
    }

    fn set_text(&mut self, text: &[u16]) {
        self.text.clear();
        self.text.extend_from_slice(text);
        self.boundaries.clear();
        self.boundaries.extend(SEGMENTER.segment_utf16(&self.text).filter(|&b| b > 0));
        self.pos = 0;
        self.last = 0;
        self.current = None;
    }

    fn next(&mut self) -> Option<usize> {
        if let Some(current) = self.current {
            self.last = current;
        }
        self.current = self.boundaries.get(self.pos).copied();
        if self.current.is_some() {
            self.pos += 1;
        }
        self.current
    }

    fn current(&self) -> Option<usize> {
        self.current
    }

    fn word_start(&self) -> usize {
        let Some(current) = self.current else { return self.last };
        let mut start = self.last;
        while start < current && is_line_end_space(self.text[start]) {
            start += 1;
        }
        start
    }

    fn word_end(&self) -> usize {
        let Some(current) = self.current else { return self.last };
        let mut end = current;
        while end > self.last && is_line_end_space(self.text[end - 1]) {
            end -= 1;
        }
        end
    }

    fn break_badness(&self) -> f32 {
        0.0
    }

    fn finish(&mut self) {
        self.text.clear();
        self.boundaries.clear();
        self.pos = 0;
        self.last = 0;
        self.current = None;
    }
}
