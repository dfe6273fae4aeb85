//! The minimum-cost breaker.
//!
//! A forward dynamic program over the full candidate list: for each candidate
//! that could end a line, every candidate in an active window is tried as the
//! start of that line, and the cheapest predecessor is linked. The break
//! sequence then falls out of a backtrace over the predecessor links.

use tracing::trace;

use crate::breaker::{
    BreakFlags, BreakStrategy, LineBreaker, LAST_LINE_PENALTY_MULTIPLIER, SCORE_INFTY,
    SCORE_OVERFULL, SHRINKABILITY, SHRINK_PENALTY_MULTIPLIER,
};
use crate::hyphen::HyphenEdit;

impl LineBreaker {
    pub(crate) fn compute_breaks_optimal(&mut self) {
        let mut active = 0;
        let n_cand = self.candidates.len();
        let max_shrink =
            if self.justified { SHRINKABILITY * self.space_width() } else { 0.0 };

        // Line numbers along the best path, to look up per-line widths.
        let mut line_numbers = Vec::with_capacity(n_cand);
        line_numbers.push(0usize);

        // `i` runs over candidates for the end of the line.
        for i in 1..n_cand {
            let at_end = i == n_cand - 1;
            let mut best = SCORE_INFTY;
            let mut best_prev = 0;

            let mut line_number_last = line_numbers[active];
            let mut width = self.line_widths.line_width(line_number_last);

            let mut left_edge = self.candidates[i].post_break - width as f64;
            let mut best_hope = 0.0f32;

            // `j` runs over candidates for the beginning of the line.
            for j in active..i {
                let line_number = line_numbers[j];
                if line_number != line_number_last {
                    let width_new = self.line_widths.line_width(line_number);
                    if width_new != width {
                        left_edge = self.candidates[i].post_break - width as f64;
                        best_hope = 0.0;
                        width = width_new;
                    }
                    line_number_last = line_number;
                }

                let j_score = self.candidates[j].score;
                if j_score + best_hope >= best {
                    continue;
                }

                // Fits when non-negative; overfull by `-delta` otherwise.
                let delta = (self.candidates[j].pre_break - left_edge) as f32;

                // The `best_hope` skip above assumes that for non-negative
                // `delta` the width score only grows as `j` moves back.
                let mut width_score = 0.0;
                let mut additional_penalty = 0.0;
                if (at_end || !self.justified) && delta < 0.0 {
                    width_score = SCORE_OVERFULL;
                } else if at_end && self.strategy != BreakStrategy::Balanced {
                    // Hyphens are worse on the last line.
                    additional_penalty =
                        LAST_LINE_PENALTY_MULTIPLIER * self.candidates[j].penalty;
                } else {
                    width_score = delta * delta;
                    if delta < 0.0 {
                        let spaces = self.candidates[i]
                            .post_space_count
                            .saturating_sub(self.candidates[j].pre_space_count);
                        if -delta < max_shrink * spaces as f32 {
                            width_score *= SHRINK_PENALTY_MULTIPLIER;
                        } else {
                            width_score = SCORE_OVERFULL;
                        }
                    }
                }

                if delta < 0.0 {
                    // A line from `j` is already overfull, so lines from any
                    // earlier candidate would be too.
                    active = j + 1;
                } else {
                    best_hope = width_score;
                }

                let score = j_score + width_score + additional_penalty;
                if score <= best {
                    best = score;
                    best_prev = j;
                }
            }

            self.candidates[i].score = best + self.candidates[i].penalty + self.line_penalty;
            self.candidates[i].prev = best_prev;
            line_numbers.push(line_numbers[best_prev] + 1);
            trace!(index = i, score = self.candidates[i].score, prev = best_prev, "scored");
        }

        self.finish_breaks_optimal();
    }

    /// Walks the predecessor links back from the last candidate and emits the
    /// lines in order.
    fn finish_breaks_optimal(&mut self) {
        // Any greedy output accumulated while candidates streamed in is
        // superseded.
        self.breaks.clear();
        self.widths.clear();
        self.ascents.clear();
        self.descents.clear();
        self.flags.clear();

        let n_cand = self.candidates.len();
        let mut i = n_cand - 1;
        while i > 0 {
            let prev = self.candidates[i].prev;
            self.breaks.push(self.candidates[i].offset);
            self.widths
                .push((self.candidates[i].post_break - self.candidates[prev].pre_break) as f32);
            let extent = self.compute_max_extent(prev + 1, i);
            self.ascents.push(extent.ascent);
            self.descents.push(extent.descent);
            let mut edit = HyphenEdit::edit_for_this_line(self.candidates[i].hyphen_type);
            if prev > 0 {
                edit |= HyphenEdit::edit_for_next_line(self.candidates[prev].hyphen_type);
            }
            self.flags.push(BreakFlags::new(false, edit));
            i = prev;
        }

        self.breaks.reverse();
        self.widths.reverse();
        self.ascents.reverse();
        self.descents.reverse();
        self.flags.reverse();
    }
}
