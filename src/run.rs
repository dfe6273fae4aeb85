//! Candidate generation over style runs.

use std::ops::Range;

use tracing::trace;

use crate::breaker::{
    BreakStrategy, HyphenationFrequency, LineBreaker, LINE_PENALTY_MULTIPLIER,
    LONGEST_HYPHENATED_WORD, SCORE_DESPERATE,
};
use crate::candidate::Candidate;
use crate::chars::{is_line_end_space, is_word_space, CHAR_NBSP, CHAR_TAB};
use crate::extent::VerticalExtent;
use crate::hyphen::{HyphenEdit, HyphenationType};
use crate::shape::{BidiFlags, StyleRun};

impl LineBreaker {
    /// Feeds one style run through the segmenter and emits break candidates.
    ///
    /// When `run` is present, the shaper fills the per-code-unit widths and
    /// extents for the range and the run's total advance is returned. When it
    /// is absent (replacement spans), the widths are expected to be in place
    /// already and zero is returned.
    ///
    /// Runs must be added in left-to-right order and cover the whole
    /// paragraph without gaps.
    pub fn add_style_run(
        &mut self,
        run: Option<&StyleRun<'_>>,
        range: Range<usize>,
        rtl: bool,
    ) -> f32 {
        let Range { start, end } = range;
        let bidi = if rtl { BidiFlags::ForceRtl } else { BidiFlags::ForceLtr };

        let mut width = 0.0;
        let mut hyphen_penalty = 0.0;
        if let Some(run) = run {
            width = run.shaper.measure_text(
                &self.text,
                start..end,
                bidi,
                run.paint,
                HyphenEdit::NO_EDIT,
                Some(&mut self.char_widths[start..end]),
                Some(&mut self.char_extents[start..end]),
            );

            // A heuristic that performs well in practice.
            hyphen_penalty =
                0.5 * run.paint.size * run.paint.scale_x * self.line_widths.line_width(0);
            if self.hyphenation_frequency == HyphenationFrequency::Normal {
                hyphen_penalty *= 4.0;
            }

            if self.justified {
                // Hyphenate more aggressively when justified, so that
                // `Normal` there matches `Full` in ragged-right text.
                hyphen_penalty *= 0.25;
            } else {
                // Justified paragraphs carry no per-line penalty.
                self.line_penalty =
                    self.line_penalty.max(hyphen_penalty * LINE_PENALTY_MULTIPLIER);
            }
        }

        let mut current = self.segmenter.current();
        let mut after_word = start;
        let mut last_break = start;
        let mut last_break_width = self.width;
        let mut post_break = self.width;
        let mut post_space_count = self.space_count;
        let mut extent = VerticalExtent::default();

        for i in start..end {
            let c = self.text[i];
            if c == CHAR_TAB {
                self.width = self.pre_break
                    + self.tab_stops.next_tab((self.width - self.pre_break) as f32) as f64;
                if self.first_tab_index.is_none() {
                    self.first_tab_index = Some(i);
                }
                // Fall back to greedy; the other strategies cannot reason
                // about tab positions.
                self.strategy = BreakStrategy::Greedy;
            } else {
                if is_word_space(c) {
                    self.space_count += 1;
                }
                self.width += self.char_widths[i] as f64;
                extent.extend_by(self.char_extents[i]);
                if !is_line_end_space(c) {
                    post_break = self.width;
                    post_space_count = self.space_count;
                    after_word = i + 1;
                }
            }

            if current == Some(i + 1) {
                let word_start = self.segmenter.word_start();
                let word_end = self.segmenter.word_end();
                if let Some(run) = run {
                    if self.hyphenator.is_some()
                        && self.hyphenation_frequency != HyphenationFrequency::None
                        && word_start >= start
                        && word_end > word_start
                    {
                        self.hyphenate_word(word_start..word_end);
                        debug_assert_eq!(self.hyph_buf.len(), word_end - word_start);

                        // Measure the two halves of each hyphenated split.
                        for j in word_start..word_end {
                            let hyph = self.hyph_buf[j - word_start];
                            if hyph == HyphenationType::DontBreak {
                                continue;
                            }

                            let first_part_width = run.shaper.measure_text(
                                &self.text,
                                last_break..j,
                                bidi,
                                run.paint,
                                HyphenEdit::edit_for_this_line(hyph),
                                None,
                                None,
                            );
                            let hyph_post_break = last_break_width + first_part_width as f64;

                            let second_part_width = run.shaper.measure_text(
                                &self.text,
                                j..after_word,
                                bidi,
                                run.paint,
                                HyphenEdit::edit_for_next_line(hyph),
                                None,
                                None,
                            );
                            let hyph_pre_break = post_break - second_part_width as f64;

                            self.add_word_break(
                                j,
                                hyph_pre_break,
                                hyph_post_break,
                                post_space_count,
                                post_space_count,
                                extent,
                                hyphen_penalty,
                                hyph,
                            );
                            extent = VerticalExtent::default();
                        }
                    }
                }

                // Skip the boundary for zero-width positions inside a
                // replacement span.
                let boundary = i + 1;
                if run.is_some() || boundary == end || self.char_widths[boundary] > 0.0 {
                    let penalty = hyphen_penalty * self.segmenter.break_badness();
                    self.add_word_break(
                        boundary,
                        self.width,
                        post_break,
                        self.space_count,
                        post_space_count,
                        extent,
                        penalty,
                        HyphenationType::DontBreak,
                    );
                    extent = VerticalExtent::default();
                }

                last_break = boundary;
                last_break_width = self.width;
                current = self.segmenter.next();
            }
        }

        width
    }

    /// Covers a range with a replacement of the given total width and runs
    /// candidate generation over it without a shaper.
    pub fn add_replacement(&mut self, range: Range<usize>, width: f32) {
        self.char_widths[range.start] = width;
        for w in &mut self.char_widths[range.start + 1..range.end] {
            *w = 0.0;
        }
        for e in &mut self.char_extents[range.clone()] {
            *e = VerticalExtent::default();
        }
        self.add_style_run(None, range, false);
    }

    /// Fills `hyph_buf` with one classification per code unit of `range`.
    ///
    /// The range may contain non-breaking spaces; each maximal run of other
    /// code units is hyphenated on its own and the non-breaking spaces
    /// themselves never break.
    fn hyphenate_word(&mut self, range: Range<usize>) {
        self.hyph_buf.clear();
        self.hyph_buf.reserve(range.len());
        let Some(hyphenator) = self.hyphenator.as_deref() else { return };

        let word = &self.text[range];
        let len = word.len();
        let mut in_word = false;
        let mut word_start = 0;
        for i in 0..=len {
            if i == len || word[i] == CHAR_NBSP {
                if in_word {
                    let word_len = i - word_start;
                    if word_len <= LONGEST_HYPHENATED_WORD {
                        hyphenator.hyphenate(
                            &mut self.hyph_buf,
                            &word[word_start..i],
                            &self.locale,
                        );
                    } else {
                        // Pattern matching is quadratic on pathological
                        // words; leave very long ones unhyphenated.
                        self.hyph_buf.resize(
                            self.hyph_buf.len() + word_len,
                            HyphenationType::DontBreak,
                        );
                    }
                    in_word = false;
                }
                if i < len {
                    // One entry for the non-breaking space itself.
                    self.hyph_buf.push(HyphenationType::DontBreak);
                }
            } else if !in_word {
                in_word = true;
                word_start = i;
            }
        }
    }

    /// Appends a prepared candidate, preceded by desperate intra-word breaks
    /// when the segment since the previous candidate exceeds the line.
    ///
    /// Desperate breaks reuse the shaping of the unbroken text, so they are
    /// imprecise around kerning, ligatures and contextual forms, but they
    /// guarantee forward progress.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn add_word_break(
        &mut self,
        offset: usize,
        pre_break: f64,
        post_break: f64,
        pre_space_count: usize,
        post_space_count: usize,
        extent: VerticalExtent,
        penalty: f32,
        hyph: HyphenationType,
    ) {
        let last = self.candidates[self.candidates.len() - 1];
        let mut width = last.pre_break;
        if post_break - width > self.current_line_width() as f64 {
            // Always take the first code unit whole so every desperate line
            // makes at least one unit of progress.
            let mut i = last.offset;
            width += self.char_widths[i] as f64;
            i += 1;
            while i < offset {
                let w = self.char_widths[i];
                if w > 0.0 {
                    trace!(offset = i, width, "desperate candidate");
                    self.add_candidate(Candidate {
                        offset: i,
                        pre_break: width,
                        post_break: width,
                        penalty: SCORE_DESPERATE,
                        // The space counts deliberately exclude trailing
                        // spaces here.
                        pre_space_count: post_space_count,
                        post_space_count,
                        extent: self.char_extents[i],
                        hyphen_type: HyphenationType::BreakAndDontInsertHyphen,
                        score: 0.0,
                        prev: 0,
                    });
                    width += w as f64;
                }
                i += 1;
            }
        }

        self.add_candidate(Candidate {
            offset,
            pre_break,
            post_break,
            penalty,
            pre_space_count,
            post_space_count,
            extent,
            hyphen_type: hyph,
            score: 0.0,
            prev: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use icu_locid::LanguageIdentifier;

    use super::*;
    use crate::hyphen::Hyphenator;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    /// Marks every position after the first as breakable.
    struct MarkAll;

    impl Hyphenator for MarkAll {
        fn hyphenate(
            &self,
            out: &mut Vec<HyphenationType>,
            word: &[u16],
            _locale: &LanguageIdentifier,
        ) {
            for i in 0..word.len() {
                out.push(if i == 0 {
                    HyphenationType::DontBreak
                } else {
                    HyphenationType::BreakAndInsertHyphen
                });
            }
        }
    }

    fn breaker_with_mark_all() -> LineBreaker {
        let mut breaker = LineBreaker::new();
        breaker.set_locales("en", &[Arc::new(MarkAll) as Arc<dyn Hyphenator>]);
        breaker
    }

    #[test]
    fn nbsp_splits_the_hyphenation_buffer() {
        let mut breaker = breaker_with_mark_all();
        breaker.set_text(&utf16("aa\u{a0}bb"));
        breaker.hyphenate_word(0..5);
        assert_eq!(
            breaker.hyph_buf,
            vec![
                HyphenationType::DontBreak,
                HyphenationType::BreakAndInsertHyphen,
                HyphenationType::DontBreak,
                HyphenationType::DontBreak,
                HyphenationType::BreakAndInsertHyphen,
            ]
        );
    }

    #[test]
    fn overlong_words_are_not_hyphenated() {
        let word: String = "a".repeat(46);
        let mut breaker = breaker_with_mark_all();
        breaker.set_text(&utf16(&word));
        breaker.hyphenate_word(0..46);
        assert_eq!(breaker.hyph_buf, vec![HyphenationType::DontBreak; 46]);
    }

    #[test]
    fn cap_applies_per_subword() {
        // 46 units in total, but each side of the non-breaking space is
        // short enough to hyphenate.
        let word = format!("{}\u{a0}{}", "a".repeat(22), "b".repeat(23));
        let mut breaker = breaker_with_mark_all();
        breaker.set_text(&utf16(&word));
        breaker.hyphenate_word(0..46);
        assert_eq!(breaker.hyph_buf.len(), 46);
        assert_eq!(breaker.hyph_buf[22], HyphenationType::DontBreak);
        assert_eq!(breaker.hyph_buf[1], HyphenationType::BreakAndInsertHyphen);
        assert_eq!(breaker.hyph_buf[24], HyphenationType::BreakAndInsertHyphen);
    }
}
