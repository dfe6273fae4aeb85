//! Paragraph state and lifecycle.

use std::sync::Arc;

use icu_locid::LanguageIdentifier;

use crate::candidate::Candidate;
use crate::chars::is_word_space;
use crate::extent::VerticalExtent;
use crate::hyphen::{HyphenEdit, HyphenationType, Hyphenator};
use crate::segment::{Segmenter, UnicodeSegmenter};
use crate::tabs::TabStops;
use crate::widths::LineWidths;

// Large scores in a hierarchy; a desperate break is always preferred to an
// overfull line. Both are larger than any reasonable width score.
pub(crate) const SCORE_INFTY: f32 = f32::MAX;
pub(crate) const SCORE_OVERFULL: f32 = 1e12;
pub(crate) const SCORE_DESPERATE: f32 = 1e10;

// Multiplier for a hyphen penalty carried into the last line.
pub(crate) const LAST_LINE_PENALTY_MULTIPLIER: f32 = 4.0;
// Multiplier deriving the per-line penalty from the hyphen penalty, to keep
// the number of lines down.
pub(crate) const LINE_PENALTY_MULTIPLIER: f32 = 2.0;
// Multiplier for lines that fit only by shrinking their spaces.
pub(crate) const SHRINK_PENALTY_MULTIPLIER: f32 = 4.0;

// Hyphenation of very long words triggers quadratic behavior in the pattern
// matcher, so it is suppressed beyond this length. Such words can still be
// split by desperate breaks, just without hyphens.
pub(crate) const LONGEST_HYPHENATED_WORD: usize = 45;

// While the text stays within this limit, buffer capacity is retained across
// `finish` to avoid reallocation on the next paragraph.
pub(crate) const MAX_TEXT_BUF_RETAIN: usize = 32678;

// Maximum fraction by which a space may shrink in justified text.
pub(crate) const SHRINKABILITY: f32 = 1.0 / 3.0;

const TAB_SHIFT: u32 = 29;

/// How breaks are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakStrategy {
    /// Single pass, longest line first.
    #[default]
    Greedy,
    /// Minimum total cost with a ragged last line.
    HighQuality,
    /// Minimum total cost with the last line scored like any other.
    Balanced,
}

/// How eagerly words are hyphenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HyphenationFrequency {
    /// Never hyphenate.
    None,
    /// Hyphenate, but at four times the usual penalty.
    #[default]
    Normal,
    /// Hyphenate at the usual penalty.
    Full,
}

/// Flags attached to one line boundary.
///
/// Bit 29 records whether the finished line contained a tab; the low bits
/// hold the packed hyphen edits for this line's end combined with the next
/// line's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakFlags(u32);

impl BreakFlags {
    pub(crate) fn new(tab: bool, edit: HyphenEdit) -> Self {
        Self(((tab as u32) << TAB_SHIFT) | edit.bits())
    }

    /// Whether the line ending at this break contained a tab.
    pub fn has_tab(self) -> bool {
        self.0 & (1 << TAB_SHIFT) != 0
    }

    /// The hyphen edits applied around this break.
    pub fn hyphen_edit(self) -> HyphenEdit {
        HyphenEdit::from_bits(
            self.0 & (HyphenEdit::MASK_END_OF_LINE | HyphenEdit::MASK_START_OF_LINE),
        )
    }

    /// The raw packed value.
    pub fn bits(self) -> u32 {
        self.0
    }
}

/// Breaks one paragraph of shaped text into lines.
///
/// The host drives one paragraph at a time: [`set_text`], then one
/// [`add_style_run`] or [`add_replacement`] per style run in left-to-right
/// order covering the whole text, then [`compute_breaks`], then the output
/// accessors, then [`finish`] to make the breaker reusable. Configuration
/// applies to the current paragraph and is reset by `finish`.
///
/// [`set_text`]: LineBreaker::set_text
/// [`add_style_run`]: LineBreaker::add_style_run
/// [`add_replacement`]: LineBreaker::add_replacement
/// [`compute_breaks`]: LineBreaker::compute_breaks
/// [`finish`]: LineBreaker::finish
pub struct LineBreaker {
    // The paragraph and its per-code-unit metrics.
    pub(crate) text: Vec<u16>,
    pub(crate) char_widths: Vec<f32>,
    pub(crate) char_extents: Vec<VerticalExtent>,
    pub(crate) hyph_buf: Vec<HyphenationType>,
    pub(crate) candidates: Vec<Candidate>,

    // Configuration.
    pub(crate) strategy: BreakStrategy,
    pub(crate) hyphenation_frequency: HyphenationFrequency,
    pub(crate) justified: bool,
    pub(crate) line_penalty: f32,
    pub(crate) locale: LanguageIdentifier,
    pub(crate) hyphenator: Option<Arc<dyn Hyphenator>>,
    pub(crate) segmenter: Box<dyn Segmenter>,
    pub(crate) line_widths: Box<dyn LineWidths>,
    pub(crate) tab_stops: TabStops,

    // Running state over the paragraph.
    pub(crate) width: f64,
    pub(crate) space_count: usize,
    pub(crate) first_tab_index: Option<usize>,

    // Greedy breaker state.
    pub(crate) last_break: usize,
    pub(crate) best_break: usize,
    pub(crate) best_score: f32,
    pub(crate) pre_break: f64,
    pub(crate) last_hyphenation: HyphenEdit,

    // Output, one entry per line.
    pub(crate) breaks: Vec<usize>,
    pub(crate) widths: Vec<f32>,
    pub(crate) ascents: Vec<f32>,
    pub(crate) descents: Vec<f32>,
    pub(crate) flags: Vec<BreakFlags>,
}

impl LineBreaker {
    /// Creates a breaker with the ICU-backed segmenter.
    pub fn new() -> Self {
        Self::with_segmenter(Box::new(UnicodeSegmenter::new()))
    }

    /// Creates a breaker with a custom segmenter.
    pub fn with_segmenter(segmenter: Box<dyn Segmenter>) -> Self {
        Self {
            text: Vec::new(),
            char_widths: Vec::new(),
            char_extents: Vec::new(),
            hyph_buf: Vec::new(),
            candidates: vec![Candidate::sentinel()],
            strategy: BreakStrategy::default(),
            hyphenation_frequency: HyphenationFrequency::default(),
            justified: false,
            line_penalty: 0.0,
            locale: LanguageIdentifier::UND,
            hyphenator: None,
            segmenter,
            line_widths: Box::new(f32::MAX),
            tab_stops: TabStops::default(),
            width: 0.0,
            space_count: 0,
            first_tab_index: None,
            last_break: 0,
            best_break: 0,
            best_score: SCORE_INFTY,
            pre_break: 0.0,
            last_hyphenation: HyphenEdit::NO_EDIT,
            breaks: Vec::new(),
            widths: Vec::new(),
            ascents: Vec::new(),
            descents: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Selects the locale and its hyphenator from a comma-separated list.
    ///
    /// `hyphenators` pairs up with the listed locales. The first entry that
    /// parses as a valid language identifier wins, together with its
    /// hyphenator; if only the final entry is valid it gets the final
    /// hyphenator, and if none is (or the hyphenator list is empty) the
    /// breaker falls back to the root locale with no hyphenator.
    pub fn set_locales(&mut self, locales: &str, hyphenators: &[Arc<dyn Hyphenator>]) {
        let mut good_locale_found = false;

        // All locales but the last; the last one doubles as the fallback.
        let mut rest = locales;
        for hyphenator in hyphenators.iter().take(hyphenators.len().saturating_sub(1)) {
            let (name, tail) = rest.split_once(',').unwrap_or((rest, ""));
            if let Ok(locale) = name.parse::<LanguageIdentifier>() {
                self.locale = locale;
                self.hyphenator = Some(hyphenator.clone());
                good_locale_found = true;
                break;
            }
            rest = tail;
        }

        if !good_locale_found {
            if let Ok(locale) = rest.parse::<LanguageIdentifier>() {
                self.locale = locale;
                self.hyphenator = hyphenators.last().cloned();
            } else {
                self.locale = LanguageIdentifier::UND;
                self.hyphenator = None;
            }
        }

        self.segmenter.set_locale(&self.locale);
    }

    pub fn set_strategy(&mut self, strategy: BreakStrategy) {
        self.strategy = strategy;
    }

    pub fn set_hyphenation_frequency(&mut self, frequency: HyphenationFrequency) {
        self.hyphenation_frequency = frequency;
    }

    /// Whether the paragraph will be justified. Justification itself happens
    /// elsewhere; here it only admits slightly overfull lines whose spaces
    /// can shrink, and zeroes the per-line penalty.
    pub fn set_justified(&mut self, justified: bool) {
        self.justified = justified;
    }

    pub fn set_line_widths(&mut self, widths: Box<dyn LineWidths>) {
        self.line_widths = widths;
    }

    pub fn set_tab_stops(&mut self, stops: &[f32], tab_width: f32) {
        self.tab_stops.set(stops, tab_width);
    }

    /// Installs the paragraph text and resets all per-paragraph state.
    pub fn set_text(&mut self, text: &[u16]) {
        self.text.clear();
        self.text.extend_from_slice(text);
        self.char_widths.clear();
        self.char_widths.resize(text.len(), 0.0);
        self.char_extents.clear();
        self.char_extents.resize(text.len(), VerticalExtent::default());

        self.segmenter.set_text(&self.text);
        // Advance to the first opportunity here, because `add_style_run` may
        // never be called.
        self.segmenter.next();

        self.candidates.clear();
        self.candidates.push(Candidate::sentinel());

        self.breaks.clear();
        self.widths.clear();
        self.ascents.clear();
        self.descents.clear();
        self.flags.clear();
        self.width = 0.0;
        self.space_count = 0;
        self.first_tab_index = None;
        self.last_break = 0;
        self.best_break = 0;
        self.best_score = SCORE_INFTY;
        self.pre_break = 0.0;
        self.last_hyphenation = HyphenEdit::NO_EDIT;
    }

    /// The length of the current paragraph in code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Computes the break sequence with the configured strategy and returns
    /// the number of lines.
    pub fn compute_breaks(&mut self) -> usize {
        match self.strategy {
            BreakStrategy::Greedy => self.compute_breaks_greedy(),
            _ => self.compute_breaks_optimal(),
        }
        self.breaks.len()
    }

    /// Exclusive end offsets of the lines, in code units.
    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    /// Widths of the lines, excluding any whitespace that disappeared at the
    /// line ends.
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    pub fn ascents(&self) -> &[f32] {
        &self.ascents
    }

    pub fn descents(&self) -> &[f32] {
        &self.descents
    }

    pub fn flags(&self) -> &[BreakFlags] {
        &self.flags
    }

    /// Releases the paragraph and resets configuration to its defaults.
    ///
    /// Buffer capacity is kept for reuse unless the text exceeded
    /// `MAX_TEXT_BUF_RETAIN` code units.
    pub fn finish(&mut self) {
        self.segmenter.finish();
        self.width = 0.0;
        self.candidates.clear();
        self.breaks.clear();
        self.widths.clear();
        self.ascents.clear();
        self.descents.clear();
        self.flags.clear();
        if self.text.len() > MAX_TEXT_BUF_RETAIN {
            self.text = Vec::new();
            self.char_widths = Vec::new();
            self.char_extents = Vec::new();
            self.hyph_buf = Vec::new();
            self.candidates.shrink_to_fit();
            self.breaks.shrink_to_fit();
            self.widths.shrink_to_fit();
            self.ascents.shrink_to_fit();
            self.descents.shrink_to_fit();
            self.flags.shrink_to_fit();
        }
        self.strategy = BreakStrategy::default();
        self.hyphenation_frequency = HyphenationFrequency::default();
        self.line_penalty = 0.0;
        self.justified = false;
        self.line_widths = Box::new(f32::MAX);
    }

    /// The width available for the line currently being built.
    pub(crate) fn current_line_width(&self) -> f32 {
        self.line_widths.line_width(self.breaks.len())
    }

    /// The width of a space in the paragraph. May return zero if there are
    /// no spaces; if space widths are mixed, one of them is picked.
    pub(crate) fn space_width(&self) -> f32 {
        for (i, &c) in self.text.iter().enumerate() {
            if is_word_space(c) {
                return self.char_widths[i];
            }
        }
        0.0
    }

    /// The combined extent of candidates `start..=end`, with `end`'s extent
    /// always included.
    pub(crate) fn compute_max_extent(&self, start: usize, end: usize) -> VerticalExtent {
        let mut res = self.candidates[end].extent;
        for j in start..end {
            res.extend_by(self.candidates[j].extent);
        }
        res
    }

    /// Appends one line to the output.
    pub(crate) fn push_break(
        &mut self,
        offset: usize,
        width: f32,
        extent: VerticalExtent,
        edit: HyphenEdit,
    ) {
        self.breaks.push(offset);
        self.widths.push(width);
        self.ascents.push(extent.ascent);
        self.descents.push(extent.descent);
        let tab = self.first_tab_index.is_some_and(|tab| tab < offset);
        self.flags.push(BreakFlags::new(tab, edit));
        self.first_tab_index = None;
    }
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyphen::HyphenationType;

    struct NoopHyphenator;

    impl Hyphenator for NoopHyphenator {
        fn hyphenate(
            &self,
            out: &mut Vec<HyphenationType>,
            word: &[u16],
            _locale: &LanguageIdentifier,
        ) {
            out.resize(out.len() + word.len(), HyphenationType::DontBreak);
        }
    }

    fn hyphenators(n: usize) -> Vec<Arc<dyn Hyphenator>> {
        (0..n).map(|_| Arc::new(NoopHyphenator) as Arc<dyn Hyphenator>).collect()
    }

    #[test]
    fn first_valid_locale_wins() {
        let hs = hyphenators(2);
        let mut breaker = LineBreaker::new();
        breaker.set_locales("en-US,de-DE", &hs);
        assert_eq!(breaker.locale, "en-US".parse().unwrap());
        assert!(Arc::ptr_eq(breaker.hyphenator.as_ref().unwrap(), &hs[0]));
    }

    #[test]
    fn invalid_locale_falls_through_to_the_last() {
        let hs = hyphenators(2);
        let mut breaker = LineBreaker::new();
        breaker.set_locales("x!,en-US", &hs);
        assert_eq!(breaker.locale, "en-US".parse().unwrap());
        assert!(Arc::ptr_eq(breaker.hyphenator.as_ref().unwrap(), &hs[1]));
    }

    #[test]
    fn single_locale_without_hyphenators() {
        let mut breaker = LineBreaker::new();
        breaker.set_locales("en-US", &[]);
        assert_eq!(breaker.locale, "en-US".parse().unwrap());
        assert!(breaker.hyphenator.is_none());
    }

    #[test]
    fn no_valid_locale_resets_to_root() {
        let hs = hyphenators(2);
        let mut breaker = LineBreaker::new();
        breaker.set_locales("x!,y!", &hs);
        assert_eq!(breaker.locale, LanguageIdentifier::UND);
        assert!(breaker.hyphenator.is_none());
    }

    #[test]
    fn flags_pack_tab_and_edit() {
        let flags = BreakFlags::new(true, HyphenEdit::INSERT_HYPHEN_AT_END);
        assert!(flags.has_tab());
        assert_eq!(flags.hyphen_edit(), HyphenEdit::INSERT_HYPHEN_AT_END);
        assert_eq!(flags.bits(), (1 << 29) | 0x01);
    }
}
