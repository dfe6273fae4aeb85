//! The single-pass greedy breaker.
//!
//! Candidates stream in while style runs are added; a break is committed as
//! soon as admitting the next candidate would overflow the current line.

use tracing::trace;

use crate::breaker::{LineBreaker, SCORE_INFTY};
use crate::candidate::Candidate;
use crate::hyphen::HyphenEdit;

impl LineBreaker {
    /// Admits a freshly generated candidate, committing greedy breaks as
    /// needed.
    ///
    /// `last_break` is the candidate index of the most recent committed
    /// break and `pre_break` the width at which its line ended (including
    /// disappearing whitespace). `best_break` is the lowest-penalty
    /// candidate seen since then.
    pub(crate) fn add_candidate(&mut self, cand: Candidate) {
        let cand_index = self.candidates.len();
        self.candidates.push(cand);
        trace!(index = cand_index, offset = cand.offset, penalty = cand.penalty, "candidate");

        if cand.post_break - self.pre_break > self.current_line_width() as f64 {
            // Admitting this candidate would overflow the line.
            if self.best_break == self.last_break {
                // Nothing usable since the last break; break right here.
                self.best_break = cand_index;
            }
            self.push_greedy_break();
        }

        while self.last_break != cand_index
            && cand.post_break - self.pre_break > self.current_line_width() as f64
        {
            // The remainder still overflows. The second best break since the
            // previous one was not kept around, so rescan for it. Breaking at
            // the candidate itself if nothing better turns up also guards
            // against looping forever when a single segment exceeds the line.
            for i in self.last_break + 1..cand_index {
                let penalty = self.candidates[i].penalty;
                if penalty <= self.best_score {
                    self.best_break = i;
                    self.best_score = penalty;
                }
            }
            if self.best_break == self.last_break {
                self.best_break = cand_index;
            }
            self.push_greedy_break();
        }

        if cand.penalty <= self.best_score {
            self.best_break = cand_index;
            self.best_score = cand.penalty;
        }
    }

    /// Commits the line ending at `best_break`.
    fn push_greedy_break(&mut self) {
        let best = self.candidates[self.best_break];
        let extent = self.compute_max_extent(self.last_break + 1, self.best_break);
        let width = (best.post_break - self.pre_break) as f32;
        trace!(offset = best.offset, width, "greedy break");
        self.push_break(
            best.offset,
            width,
            extent,
            self.last_hyphenation | HyphenEdit::edit_for_this_line(best.hyphen_type),
        );
        self.best_score = SCORE_INFTY;
        self.last_break = self.best_break;
        self.pre_break = best.pre_break;
        self.last_hyphenation = HyphenEdit::edit_for_next_line(best.hyphen_type);
    }

    /// Emits the final line. All earlier breaks were already committed while
    /// the candidates streamed in.
    pub(crate) fn compute_breaks_greedy(&mut self) {
        let n_cand = self.candidates.len();
        if n_cand == 1 || self.last_break != n_cand - 1 {
            let last = self.candidates[n_cand - 1];
            let extent = self.compute_max_extent(self.last_break + 1, n_cand - 1);
            self.push_break(
                last.offset,
                (last.post_break - self.pre_break) as f32,
                extent,
                self.last_hyphenation,
            );
        }
    }
}
