//! The six-dot braille cell alphabet used by the transcription.
//!
//! A cell is a bitmask over the six dot positions:
//!
//! ```text
//!   1 . . 4
//!   2 . . 5
//!   3 . . 6
//! ```
//!
//! Dot 1 is the least significant bit. This matches the layout of the
//! Unicode braille patterns block, so a cell maps to its Unicode scalar
//! by adding the bitmask to U+2800 (BRAILLE PATTERN BLANK).
//!
//! Alongside the cell type, this module holds the lookup tables shared by
//! the score signs: digits (upper and lower), the literary alphabet,
//! accidentals, octave marks and common prefixes. Tables that depend on a
//! sign's own kind (note values, clefs, keys) live with the sign types.

use serde::{Deserialize, Serialize};

/// First scalar of the Unicode braille patterns block, U+2800.
pub const BRAILLE_BLOCK_START: u32 = 0x2800;

/// A single six-dot braille cell, stored as a dot bitmask.
///
/// The low six bits encode dots 1 through 6; higher bits are never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrailleCell(u8);

impl BrailleCell {
    /// The blank cell (no dots raised), used for spacing.
    pub const BLANK: BrailleCell = BrailleCell(0);

    /// Builds a cell from a list of dot numbers in the range 1..=6.
    ///
    /// Intended for the `const` tables below; an out-of-range dot number
    /// fails at compile time.
    pub const fn from_dots(dots: &[u8]) -> BrailleCell {
        let mut bits: u8 = 0;
        let mut i = 0;
        while i < dots.len() {
            let dot = dots[i];
            assert!(dot >= 1 && dot <= 6, "dot numbers run from 1 to 6");
            bits |= 1 << (dot - 1);
            i += 1;
        }
        BrailleCell(bits)
    }

    /// Returns the raw dot bitmask (dots 1..=6 in the low six bits).
    pub fn dot_bits(self) -> u8 {
        self.0
    }

    /// Returns the Unicode braille pattern for this cell.
    pub fn to_char(self) -> char {
        // Every value in U+2800..=U+283F is a valid scalar, so the
        // fallback arm is unreachable.
        char::from_u32(BRAILLE_BLOCK_START + u32::from(self.0)).unwrap_or('\u{2800}')
    }

    /// Recovers a cell from a Unicode braille pattern scalar, if it is one.
    pub fn from_char(c: char) -> Option<BrailleCell> {
        let code = u32::from(c);
        if (BRAILLE_BLOCK_START..BRAILLE_BLOCK_START + 0x40).contains(&code) {
            Some(BrailleCell((code - BRAILLE_BLOCK_START) as u8))
        } else {
            None
        }
    }
}

impl std::fmt::Display for BrailleCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Renders a cell sequence as a Unicode braille string, for dumps and logs.
pub fn cells_to_string(cells: &[BrailleCell]) -> String {
    cells.iter().map(|c| c.to_char()).collect()
}

// Common prefixes and punctuation.

/// Numeric prefix, dots 3-4-5-6.
pub const NUMBER_SIGN: BrailleCell = BrailleCell::from_dots(&[3, 4, 5, 6]);
/// Word prefix for interpolated text such as dynamics, dots 3-4-5.
pub const WORD_SIGN: BrailleCell = BrailleCell::from_dots(&[3, 4, 5]);
/// Capitalization prefix for literary text, dot 6.
pub const CAPITAL_SIGN: BrailleCell = BrailleCell::from_dots(&[6]);
/// Augmentation dot, dot 3, repeated once per dot of the note value.
pub const AUGMENTATION_DOT: BrailleCell = BrailleCell::from_dots(&[3]);

// Accidentals.

pub const SHARP_SIGN: BrailleCell = BrailleCell::from_dots(&[1, 4, 6]);
pub const FLAT_SIGN: BrailleCell = BrailleCell::from_dots(&[1, 2, 6]);
pub const NATURAL_SIGN: BrailleCell = BrailleCell::from_dots(&[1, 6]);

/// Upper-cell digit for `digit` in 0..=9, the shapes of letters a through j.
///
/// Used after [`NUMBER_SIGN`] for page numbers, measure counts and time
/// signature numerators.
pub fn upper_digit(digit: u8) -> BrailleCell {
    match digit {
        1 => BrailleCell::from_dots(&[1]),
        2 => BrailleCell::from_dots(&[1, 2]),
        3 => BrailleCell::from_dots(&[1, 4]),
        4 => BrailleCell::from_dots(&[1, 4, 5]),
        5 => BrailleCell::from_dots(&[1, 5]),
        6 => BrailleCell::from_dots(&[1, 2, 4]),
        7 => BrailleCell::from_dots(&[1, 2, 4, 5]),
        8 => BrailleCell::from_dots(&[1, 2, 5]),
        9 => BrailleCell::from_dots(&[2, 4]),
        _ => BrailleCell::from_dots(&[2, 4, 5]), // 0
    }
}

/// Lower-cell digit for `digit` in 0..=9, the upper shapes dropped one row.
///
/// Time signature denominators are written with these.
pub fn lower_digit(digit: u8) -> BrailleCell {
    match digit {
        1 => BrailleCell::from_dots(&[2]),
        2 => BrailleCell::from_dots(&[2, 3]),
        3 => BrailleCell::from_dots(&[2, 5]),
        4 => BrailleCell::from_dots(&[2, 5, 6]),
        5 => BrailleCell::from_dots(&[2, 6]),
        6 => BrailleCell::from_dots(&[2, 3, 5]),
        7 => BrailleCell::from_dots(&[2, 3, 5, 6]),
        8 => BrailleCell::from_dots(&[2, 3, 6]),
        9 => BrailleCell::from_dots(&[3, 5]),
        _ => BrailleCell::from_dots(&[3, 5, 6]), // 0
    }
}

/// Appends `value` as a numeric expression: number sign plus upper digits.
pub fn push_number(value: u32, out: &mut Vec<BrailleCell>) {
    out.push(NUMBER_SIGN);
    push_upper_digits(value, out);
}

/// Appends the upper-cell digits of `value` without the numeric prefix.
pub fn push_upper_digits(value: u32, out: &mut Vec<BrailleCell>) {
    let mut digits = [0u8; 10];
    let mut n = value;
    let mut len = 0;
    loop {
        digits[len] = (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        out.push(upper_digit(digits[i]));
    }
}

/// Appends the lower-cell digits of `value`.
pub fn push_lower_digits(value: u32, out: &mut Vec<BrailleCell>) {
    let mut digits = [0u8; 10];
    let mut n = value;
    let mut len = 0;
    loop {
        digits[len] = (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        out.push(lower_digit(digits[i]));
    }
}

/// Literary cell for an ASCII lowercase letter.
pub fn literary_letter(letter: char) -> Option<BrailleCell> {
    let cell = match letter {
        'a' => BrailleCell::from_dots(&[1]),
        'b' => BrailleCell::from_dots(&[1, 2]),
        'c' => BrailleCell::from_dots(&[1, 4]),
        'd' => BrailleCell::from_dots(&[1, 4, 5]),
        'e' => BrailleCell::from_dots(&[1, 5]),
        'f' => BrailleCell::from_dots(&[1, 2, 4]),
        'g' => BrailleCell::from_dots(&[1, 2, 4, 5]),
        'h' => BrailleCell::from_dots(&[1, 2, 5]),
        'i' => BrailleCell::from_dots(&[2, 4]),
        'j' => BrailleCell::from_dots(&[2, 4, 5]),
        'k' => BrailleCell::from_dots(&[1, 3]),
        'l' => BrailleCell::from_dots(&[1, 2, 3]),
        'm' => BrailleCell::from_dots(&[1, 3, 4]),
        'n' => BrailleCell::from_dots(&[1, 3, 4, 5]),
        'o' => BrailleCell::from_dots(&[1, 3, 5]),
        'p' => BrailleCell::from_dots(&[1, 2, 3, 4]),
        'q' => BrailleCell::from_dots(&[1, 2, 3, 4, 5]),
        'r' => BrailleCell::from_dots(&[1, 2, 3, 5]),
        's' => BrailleCell::from_dots(&[2, 3, 4]),
        't' => BrailleCell::from_dots(&[2, 3, 4, 5]),
        'u' => BrailleCell::from_dots(&[1, 3, 6]),
        'v' => BrailleCell::from_dots(&[1, 2, 3, 6]),
        'w' => BrailleCell::from_dots(&[2, 4, 5, 6]),
        'x' => BrailleCell::from_dots(&[1, 3, 4, 6]),
        'y' => BrailleCell::from_dots(&[1, 3, 4, 5, 6]),
        'z' => BrailleCell::from_dots(&[1, 3, 5, 6]),
        _ => return None,
    };
    Some(cell)
}

/// Literary cell for a punctuation character, where one exists.
pub fn literary_punctuation(c: char) -> Option<BrailleCell> {
    let cell = match c {
        ',' => BrailleCell::from_dots(&[2]),
        ';' => BrailleCell::from_dots(&[2, 3]),
        ':' => BrailleCell::from_dots(&[2, 5]),
        '.' => BrailleCell::from_dots(&[2, 5, 6]),
        '!' => BrailleCell::from_dots(&[2, 3, 5]),
        '?' => BrailleCell::from_dots(&[2, 3, 6]),
        '\'' => BrailleCell::from_dots(&[3]),
        '-' => BrailleCell::from_dots(&[3, 6]),
        _ => return None,
    };
    Some(cell)
}

/// Transcribes free text into literary braille.
///
/// Uppercase letters take the capital prefix, digits open a numeric
/// expression, and a handful of punctuation marks are covered. Characters
/// with no mapping are dropped; the caller decides whether that loss is
/// worth reporting.
pub fn literary_text(text: &str) -> Vec<BrailleCell> {
    let mut out = Vec::new();
    let mut in_number = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_number {
                out.push(NUMBER_SIGN);
                in_number = true;
            }
            out.push(upper_digit(c as u8 - b'0'));
            continue;
        }
        in_number = false;
        if c == ' ' {
            out.push(BrailleCell::BLANK);
        } else if c.is_ascii_uppercase() {
            if let Some(cell) = literary_letter(c.to_ascii_lowercase()) {
                out.push(CAPITAL_SIGN);
                out.push(cell);
            }
        } else if let Some(cell) = literary_letter(c) {
            out.push(cell);
        } else if let Some(cell) = literary_punctuation(c) {
            out.push(cell);
        } else {
            log::debug!("no literary braille mapping for {:?}, dropping it", c);
        }
    }
    out
}
