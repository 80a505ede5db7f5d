//! Pitch-domain types of the score model: diatonic steps, printed
//! accidentals and the step arithmetic the octave mark rule relies on.

use serde::{Deserialize, Serialize};

/// A diatonic step name, C through B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsrDiatonicStep {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl MsrDiatonicStep {
    /// Position of the step within the C-based octave, C = 0 .. B = 6.
    pub fn index_from_c(self) -> i32 {
        match self {
            MsrDiatonicStep::C => 0,
            MsrDiatonicStep::D => 1,
            MsrDiatonicStep::E => 2,
            MsrDiatonicStep::F => 3,
            MsrDiatonicStep::G => 4,
            MsrDiatonicStep::A => 5,
            MsrDiatonicStep::B => 6,
        }
    }

    /// Step name as printed in dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            MsrDiatonicStep::A => "A",
            MsrDiatonicStep::B => "B",
            MsrDiatonicStep::C => "C",
            MsrDiatonicStep::D => "D",
            MsrDiatonicStep::E => "E",
            MsrDiatonicStep::F => "F",
            MsrDiatonicStep::G => "G",
        }
    }
}

/// Absolute diatonic position of a pitch: octave times seven plus the step.
///
/// The difference of two positions is the melodic interval in diatonic
/// steps (0 = unison, 1 = second, 2 = third, ...), which is what the
/// octave mark rule measures.
pub fn diatonic_position(step: MsrDiatonicStep, octave: i32) -> i32 {
    octave * 7 + step.index_from_c()
}

/// A printed accidental attached to a note.
///
/// This is the engraved glyph, not the sounding alteration; only printed
/// accidentals are transcribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrAccidentalKind {
    None,
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    DoubleFlat,
    /// Anything beyond the five common glyphs (quarter tones, slashed and
    /// parenthesized forms). Not transcribable.
    Other,
}

impl MsrAccidentalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MsrAccidentalKind::None => "none",
            MsrAccidentalKind::Sharp => "sharp",
            MsrAccidentalKind::Flat => "flat",
            MsrAccidentalKind::Natural => "natural",
            MsrAccidentalKind::DoubleSharp => "double sharp",
            MsrAccidentalKind::DoubleFlat => "double flat",
            MsrAccidentalKind::Other => "other",
        }
    }
}
