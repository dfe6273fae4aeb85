//! Word-internal break classification.

use std::ops::{BitOr, BitOrAssign};

use icu_locid::LanguageIdentifier;

use crate::chars::CHAR_SOFT_HYPHEN;

/// How a line may break at a particular code unit inside a word.
///
/// `DontBreak` marks positions where no word-internal break is permitted.
/// The remaining variants permit a break and select which hyphen edits the
/// two surrounding lines receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyphenationType {
    DontBreak,
    BreakAndInsertHyphen,
    BreakAndInsertArmenianHyphen,
    BreakAndInsertMaqaf,
    BreakAndInsertUcasHyphen,
    BreakAndDontInsertHyphen,
    BreakAndReplaceWithHyphen,
    BreakAndInsertHyphenAtNextLine,
    BreakAndInsertHyphenAndZwj,
}

/// Packed hyphen edits applied around a line boundary.
///
/// The low three bits select the edit at the end of a line (which hyphen to
/// insert, whether to replace the final code unit, or a bare break); the next
/// three bits carry the edits at the start of the following line. Both halves
/// can be combined with `|` when a single value describes the boundary between
/// two hyphenated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HyphenEdit(u32);

impl HyphenEdit {
    pub const NO_EDIT: Self = Self(0x00);

    pub const INSERT_HYPHEN_AT_END: Self = Self(0x01);
    pub const INSERT_ARMENIAN_HYPHEN_AT_END: Self = Self(0x02);
    pub const INSERT_MAQAF_AT_END: Self = Self(0x03);
    pub const INSERT_UCAS_HYPHEN_AT_END: Self = Self(0x04);
    pub const INSERT_ZWJ_AND_HYPHEN_AT_END: Self = Self(0x05);
    pub const REPLACE_WITH_HYPHEN_AT_END: Self = Self(0x06);
    pub const BREAK_AT_END: Self = Self(0x07);

    pub const INSERT_HYPHEN_AT_START: Self = Self(0x01 << 3);
    pub const INSERT_ZWJ_AT_START: Self = Self(0x02 << 3);
    pub const BREAK_AT_START: Self = Self(0x04 << 3);

    pub const MASK_END_OF_LINE: u32 = 0x07;
    pub const MASK_START_OF_LINE: u32 = 0x07 << 3;

    /// The edit applied to the line that ends with the given break.
    pub fn edit_for_this_line(ty: HyphenationType) -> Self {
        match ty {
            HyphenationType::DontBreak => Self::NO_EDIT,
            HyphenationType::BreakAndInsertHyphen => Self::INSERT_HYPHEN_AT_END,
            HyphenationType::BreakAndInsertArmenianHyphen => {
                Self::INSERT_ARMENIAN_HYPHEN_AT_END
            }
            HyphenationType::BreakAndInsertMaqaf => Self::INSERT_MAQAF_AT_END,
            HyphenationType::BreakAndInsertUcasHyphen => Self::INSERT_UCAS_HYPHEN_AT_END,
            HyphenationType::BreakAndReplaceWithHyphen => Self::REPLACE_WITH_HYPHEN_AT_END,
            HyphenationType::BreakAndInsertHyphenAndZwj => Self::INSERT_ZWJ_AND_HYPHEN_AT_END,
            _ => Self::BREAK_AT_END,
        }
    }

    /// The edit applied to the line that starts after the given break.
    pub fn edit_for_next_line(ty: HyphenationType) -> Self {
        match ty {
            HyphenationType::DontBreak => Self::NO_EDIT,
            HyphenationType::BreakAndInsertHyphenAtNextLine => Self::INSERT_HYPHEN_AT_START,
            HyphenationType::BreakAndInsertHyphenAndZwj => Self::INSERT_ZWJ_AT_START,
            _ => Self::BREAK_AT_START,
        }
    }

    pub(crate) const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw packed value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The end-of-line part of the edit.
    pub const fn end_of_line(self) -> u32 {
        self.0 & Self::MASK_END_OF_LINE
    }

    /// The start-of-line part of the edit.
    pub const fn start_of_line(self) -> u32 {
        self.0 & Self::MASK_START_OF_LINE
    }
}

impl BitOr for HyphenEdit {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for HyphenEdit {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Classifies word-internal break opportunities.
pub trait Hyphenator {
    /// Appends exactly `word.len()` entries to `out`, one per code unit of
    /// `word`. The first entry is never a break.
    fn hyphenate(
        &self,
        out: &mut Vec<HyphenationType>,
        word: &[u16],
        locale: &LanguageIdentifier,
    );
}

/// Hyphenation through the Liang patterns bundled with `hypher`.
///
/// Soft hyphens take priority: a word containing U+00AD is classified at the
/// soft hyphen positions only and the patterns are not consulted. Otherwise
/// the word is split at pattern syllable boundaries, and the hyphen to insert
/// is chosen by the script of the code point preceding the break.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternHyphenator;

impl Hyphenator for PatternHyphenator {
    fn hyphenate(
        &self,
        out: &mut Vec<HyphenationType>,
        word: &[u16],
        locale: &LanguageIdentifier,
    ) {
        let len = word.len();
        if len == 0 {
            return;
        }

        if word[..len - 1].contains(&CHAR_SOFT_HYPHEN) {
            out.push(HyphenationType::DontBreak);
            for i in 1..len {
                out.push(if word[i - 1] == CHAR_SOFT_HYPHEN {
                    HyphenationType::BreakAndInsertHyphen
                } else {
                    HyphenationType::DontBreak
                });
            }
            return;
        }

        let base = out.len();
        out.resize(base + len, HyphenationType::DontBreak);

        let Some(lang) = pattern_lang(locale) else { return };
        let Ok(text) = String::from_utf16(word) else { return };
        if text.chars().any(|c| !c.is_alphabetic()) {
            return;
        }

        let mut offset = 0;
        for syllable in hypher::hyphenate(&text, lang) {
            offset += syllable.encode_utf16().count();
            if offset < len {
                out[base + offset] = syllable
                    .chars()
                    .next_back()
                    .map_or(HyphenationType::BreakAndInsertHyphen, hyphen_type_for);
            }
        }
    }
}

/// The pattern set for the locale's language, if one is bundled.
fn pattern_lang(locale: &LanguageIdentifier) -> Option<hypher::Lang> {
    let bytes = locale.language.as_str().as_bytes().try_into().ok()?;
    hypher::Lang::from_iso(bytes)
}

/// Picks the hyphen by the script of the character before the break.
fn hyphen_type_for(c: char) -> HyphenationType {
    match c as u32 {
        // Armenian.
        0x0530..=0x058F | 0xFB13..=0xFB17 => HyphenationType::BreakAndInsertArmenianHyphen,
        // Unified Canadian Aboriginal Syllabics.
        0x1400..=0x167F | 0x18B0..=0x18FF => HyphenationType::BreakAndInsertUcasHyphen,
        _ => HyphenationType::BreakAndInsertHyphen,
    }
}
