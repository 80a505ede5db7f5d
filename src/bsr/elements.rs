//! Sign-level nodes of the braille score: the elements lines and measures
//! contain, each knowing its own cell rendering.
//!
//! Every sign answers two questions: which cells does it engrave
//! (`cells()`), and how many cells wide is it (`width_in_cells()`). The
//! width is what the line-fitting pass budgets with, so the two must never
//! disagree; width is therefore defined as the length of the rendering.
//!
//! The tables in this module map one sign kind to one fixed cell sequence.
//! Kinds that exist only as "nothing maps here" sentinels render to no
//! cells; the builder never appends them, and the code generator treats
//! one reaching it as an internal defect.

use serde::{Deserialize, Serialize};

use crate::braille::cells::{
    self, BrailleCell, AUGMENTATION_DOT, FLAT_SIGN, NATURAL_SIGN, NUMBER_SIGN, SHARP_SIGN,
    WORD_SIGN,
};
use crate::msr::{MsrDiatonicStep, MsrDurationKind};

// Clefs.

/// Braille clef signs. `None` is the sentinel for source clefs with no
/// braille equivalent; such clefs are omitted from the tree entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrClefKind {
    None,
    GTreble,
    FBass,
    CTenor,
    FBaritone,
    GSoprano,
    GOttavaAlta,
    GOttavaBassa,
    ModifiedBassForRightHandPart,
    ModifiedTrebleForLeftHandPart,
}

impl BsrClefKind {
    pub fn cells(self) -> Vec<BrailleCell> {
        match self {
            BsrClefKind::None => Vec::new(),
            BsrClefKind::GTreble => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            BsrClefKind::FBass => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4, 5, 6]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            BsrClefKind::CTenor => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4, 6]),
                BrailleCell::from_dots(&[5]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            BsrClefKind::FBaritone => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4, 5, 6]),
                BrailleCell::from_dots(&[4]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            BsrClefKind::GSoprano => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4]),
                BrailleCell::from_dots(&[4]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            // Transposing treble clefs append the numeric octava tag.
            BsrClefKind::GOttavaAlta => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4]),
                BrailleCell::from_dots(&[1, 2, 3]),
                NUMBER_SIGN,
                cells::upper_digit(8),
            ],
            BsrClefKind::GOttavaBassa => vec![
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4]),
                BrailleCell::from_dots(&[1, 2, 3]),
                NUMBER_SIGN,
                cells::lower_digit(8),
            ],
            BsrClefKind::ModifiedBassForRightHandPart => vec![
                BrailleCell::from_dots(&[4, 6]),
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4, 5, 6]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
            BsrClefKind::ModifiedTrebleForLeftHandPart => vec![
                BrailleCell::from_dots(&[4, 5, 6]),
                BrailleCell::from_dots(&[3, 4, 5]),
                BrailleCell::from_dots(&[3, 4]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrClef {
    pub input_line_number: u32,
    pub kind: BsrClefKind,
}

impl BsrClef {
    pub fn cells(&self) -> Vec<BrailleCell> {
        self.kind.cells()
    }

    pub fn width_in_cells(&self) -> usize {
        self.kind.cells().len()
    }
}

// Key signatures.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrKeyKind {
    Naturals,
    Sharps,
    Flats,
}

/// A key signature as braille engraves it: an accidental family plus how
/// many of that accidental the signature carries.
///
/// Up to three alterations the accidental cell is simply repeated; from
/// four on, braille switches to a numeric form (number sign, count,
/// accidental). Zero alterations engrave nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrKey {
    pub input_line_number: u32,
    pub kind: BsrKeyKind,
    pub alteration_count: u8,
}

impl BsrKey {
    pub fn cells(&self) -> Vec<BrailleCell> {
        let accidental = match self.kind {
            BsrKeyKind::Naturals => NATURAL_SIGN,
            BsrKeyKind::Sharps => SHARP_SIGN,
            BsrKeyKind::Flats => FLAT_SIGN,
        };
        match self.alteration_count {
            0 => Vec::new(),
            count @ 1..=3 => vec![accidental; count as usize],
            count => {
                let mut out = Vec::new();
                cells::push_number(u32::from(count), &mut out);
                out.push(accidental);
                out
            }
        }
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Time signatures.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BsrTimeKind {
    /// Numerator in upper-cell digits after the number sign, denominator
    /// in lower-cell digits directly after it.
    Numerical { numerator: u16, denominator: u16 },
    Common,
    Cut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrTime {
    pub input_line_number: u32,
    pub kind: BsrTimeKind,
}

impl BsrTime {
    pub fn cells(&self) -> Vec<BrailleCell> {
        match &self.kind {
            BsrTimeKind::Numerical {
                numerator,
                denominator,
            } => {
                let mut out = Vec::new();
                out.push(NUMBER_SIGN);
                cells::push_upper_digits(u32::from(*numerator), &mut out);
                cells::push_lower_digits(u32::from(*denominator), &mut out);
                out
            }
            BsrTimeKind::Common => vec![
                BrailleCell::from_dots(&[4, 6]),
                BrailleCell::from_dots(&[1, 4]),
            ],
            BsrTimeKind::Cut => vec![
                BrailleCell::from_dots(&[4, 5, 6]),
                BrailleCell::from_dots(&[1, 4]),
            ],
        }
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Notes and rests.

/// The joint braille note value: pitch letter and graphic duration fused
/// into one sign, the way braille note cells actually work. Rests get
/// their own row of the table, and `None` is the unmapped sentinel.
///
/// Braille reuses each shape for two durations an octave of values apart
/// (eighth/128th, quarter/64th, half/32nd, whole/16th); breves and 256ths
/// are written as a prefixed whole-value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum BsrNoteValueKind {
    None,
    RestBreve, RestWhole, RestHalf, RestQuarter, RestEighth,
    Rest16th, Rest32nd, Rest64th, Rest128th, Rest256th,
    CBreve, CWhole, CHalf, CQuarter, CEighth,
    C16th, C32nd, C64th, C128th, C256th,
    DBreve, DWhole, DHalf, DQuarter, DEighth,
    D16th, D32nd, D64th, D128th, D256th,
    EBreve, EWhole, EHalf, EQuarter, EEighth,
    E16th, E32nd, E64th, E128th, E256th,
    FBreve, FWhole, FHalf, FQuarter, FEighth,
    F16th, F32nd, F64th, F128th, F256th,
    GBreve, GWhole, GHalf, GQuarter, GEighth,
    G16th, G32nd, G64th, G128th, G256th,
    ABreve, AWhole, AHalf, AQuarter, AEighth,
    A16th, A32nd, A64th, A128th, A256th,
    BBreve, BWhole, BHalf, BQuarter, BEighth,
    B16th, B32nd, B64th, B128th, B256th,
}

/// Prefix announcing a breve value, placed before the whole-value shape.
const BREVE_PREFIX: [BrailleCell; 2] = [
    BrailleCell::from_dots(&[4, 5]),
    BrailleCell::from_dots(&[1, 4]),
];

/// Prefix announcing a 256th value, placed before the whole-value shape.
const VALUE_256TH_PREFIX: [BrailleCell; 3] = [
    BrailleCell::from_dots(&[5, 6]),
    BrailleCell::from_dots(&[1, 2, 6]),
    BrailleCell::from_dots(&[2]),
];

impl BsrNoteValueKind {
    /// Looks up the joint kind for a pitched note. Durations with no
    /// braille shape (long, maxima, 512th, 1024th) have no entry.
    pub fn from_pitched(
        step: MsrDiatonicStep,
        duration: MsrDurationKind,
    ) -> Option<BsrNoteValueKind> {
        use BsrNoteValueKind::*;
        use MsrDiatonicStep as S;
        let kind = match duration {
            MsrDurationKind::Breve => match step {
                S::C => CBreve,
                S::D => DBreve,
                S::E => EBreve,
                S::F => FBreve,
                S::G => GBreve,
                S::A => ABreve,
                S::B => BBreve,
            },
            MsrDurationKind::Whole => match step {
                S::C => CWhole,
                S::D => DWhole,
                S::E => EWhole,
                S::F => FWhole,
                S::G => GWhole,
                S::A => AWhole,
                S::B => BWhole,
            },
            MsrDurationKind::Half => match step {
                S::C => CHalf,
                S::D => DHalf,
                S::E => EHalf,
                S::F => FHalf,
                S::G => GHalf,
                S::A => AHalf,
                S::B => BHalf,
            },
            MsrDurationKind::Quarter => match step {
                S::C => CQuarter,
                S::D => DQuarter,
                S::E => EQuarter,
                S::F => FQuarter,
                S::G => GQuarter,
                S::A => AQuarter,
                S::B => BQuarter,
            },
            MsrDurationKind::Eighth => match step {
                S::C => CEighth,
                S::D => DEighth,
                S::E => EEighth,
                S::F => FEighth,
                S::G => GEighth,
                S::A => AEighth,
                S::B => BEighth,
            },
            MsrDurationKind::Sixteenth => match step {
                S::C => C16th,
                S::D => D16th,
                S::E => E16th,
                S::F => F16th,
                S::G => G16th,
                S::A => A16th,
                S::B => B16th,
            },
            MsrDurationKind::ThirtySecond => match step {
                S::C => C32nd,
                S::D => D32nd,
                S::E => E32nd,
                S::F => F32nd,
                S::G => G32nd,
                S::A => A32nd,
                S::B => B32nd,
            },
            MsrDurationKind::SixtyFourth => match step {
                S::C => C64th,
                S::D => D64th,
                S::E => E64th,
                S::F => F64th,
                S::G => G64th,
                S::A => A64th,
                S::B => B64th,
            },
            MsrDurationKind::HundredTwentyEighth => match step {
                S::C => C128th,
                S::D => D128th,
                S::E => E128th,
                S::F => F128th,
                S::G => G128th,
                S::A => A128th,
                S::B => B128th,
            },
            MsrDurationKind::TwoHundredFiftySixth => match step {
                S::C => C256th,
                S::D => D256th,
                S::E => E256th,
                S::F => F256th,
                S::G => G256th,
                S::A => A256th,
                S::B => B256th,
            },
            MsrDurationKind::Maxima
            | MsrDurationKind::Long
            | MsrDurationKind::FiveHundredTwelfth
            | MsrDurationKind::ThousandTwentyFourth => return Option::None,
        };
        Some(kind)
    }

    /// Looks up the rest kind for a graphic duration.
    pub fn from_rest(duration: MsrDurationKind) -> Option<BsrNoteValueKind> {
        use BsrNoteValueKind::*;
        let kind = match duration {
            MsrDurationKind::Breve => RestBreve,
            MsrDurationKind::Whole => RestWhole,
            MsrDurationKind::Half => RestHalf,
            MsrDurationKind::Quarter => RestQuarter,
            MsrDurationKind::Eighth => RestEighth,
            MsrDurationKind::Sixteenth => Rest16th,
            MsrDurationKind::ThirtySecond => Rest32nd,
            MsrDurationKind::SixtyFourth => Rest64th,
            MsrDurationKind::HundredTwentyEighth => Rest128th,
            MsrDurationKind::TwoHundredFiftySixth => Rest256th,
            MsrDurationKind::Maxima
            | MsrDurationKind::Long
            | MsrDurationKind::FiveHundredTwelfth
            | MsrDurationKind::ThousandTwentyFourth => return Option::None,
        };
        Some(kind)
    }

    pub fn is_rest(self) -> bool {
        use BsrNoteValueKind::*;
        matches!(
            self,
            RestBreve
                | RestWhole
                | RestHalf
                | RestQuarter
                | RestEighth
                | Rest16th
                | Rest32nd
                | Rest64th
                | Rest128th
                | Rest256th
        )
    }

    pub fn cells(self) -> Vec<BrailleCell> {
        use BsrNoteValueKind::*;

        // One shape serves two durations; the second column of each pair
        // below names the smaller twin.
        let whole_c = BrailleCell::from_dots(&[1, 3, 4, 5, 6]);
        let whole_d = BrailleCell::from_dots(&[1, 3, 5, 6]);
        let whole_e = BrailleCell::from_dots(&[1, 2, 3, 4, 6]);
        let whole_f = BrailleCell::from_dots(&[1, 2, 3, 4, 5, 6]);
        let whole_g = BrailleCell::from_dots(&[1, 2, 3, 5, 6]);
        let whole_a = BrailleCell::from_dots(&[2, 3, 4, 6]);
        let whole_b = BrailleCell::from_dots(&[2, 3, 4, 5, 6]);
        let rest_whole = BrailleCell::from_dots(&[1, 3, 4]);

        match self {
            None => Vec::new(),

            RestWhole | Rest16th => vec![rest_whole],
            RestHalf | Rest32nd => vec![BrailleCell::from_dots(&[1, 3, 6])],
            RestQuarter | Rest64th => vec![BrailleCell::from_dots(&[1, 2, 3, 6])],
            RestEighth | Rest128th => vec![BrailleCell::from_dots(&[1, 3, 4, 6])],
            RestBreve => with_prefix(&BREVE_PREFIX, rest_whole),
            Rest256th => with_prefix(&VALUE_256TH_PREFIX, rest_whole),

            CEighth | C128th => vec![BrailleCell::from_dots(&[1, 4, 5])],
            CQuarter | C64th => vec![BrailleCell::from_dots(&[1, 4, 5, 6])],
            CHalf | C32nd => vec![BrailleCell::from_dots(&[1, 3, 4, 5])],
            CWhole | C16th => vec![whole_c],
            CBreve => with_prefix(&BREVE_PREFIX, whole_c),
            C256th => with_prefix(&VALUE_256TH_PREFIX, whole_c),

            DEighth | D128th => vec![BrailleCell::from_dots(&[1, 5])],
            DQuarter | D64th => vec![BrailleCell::from_dots(&[1, 5, 6])],
            DHalf | D32nd => vec![BrailleCell::from_dots(&[1, 3, 5])],
            DWhole | D16th => vec![whole_d],
            DBreve => with_prefix(&BREVE_PREFIX, whole_d),
            D256th => with_prefix(&VALUE_256TH_PREFIX, whole_d),

            EEighth | E128th => vec![BrailleCell::from_dots(&[1, 2, 4])],
            EQuarter | E64th => vec![BrailleCell::from_dots(&[1, 2, 4, 6])],
            EHalf | E32nd => vec![BrailleCell::from_dots(&[1, 2, 3, 4])],
            EWhole | E16th => vec![whole_e],
            EBreve => with_prefix(&BREVE_PREFIX, whole_e),
            E256th => with_prefix(&VALUE_256TH_PREFIX, whole_e),

            FEighth | F128th => vec![BrailleCell::from_dots(&[1, 2, 4, 5])],
            FQuarter | F64th => vec![BrailleCell::from_dots(&[1, 2, 4, 5, 6])],
            FHalf | F32nd => vec![BrailleCell::from_dots(&[1, 2, 3, 4, 5])],
            FWhole | F16th => vec![whole_f],
            FBreve => with_prefix(&BREVE_PREFIX, whole_f),
            F256th => with_prefix(&VALUE_256TH_PREFIX, whole_f),

            GEighth | G128th => vec![BrailleCell::from_dots(&[1, 2, 5])],
            GQuarter | G64th => vec![BrailleCell::from_dots(&[1, 2, 5, 6])],
            GHalf | G32nd => vec![BrailleCell::from_dots(&[1, 2, 3, 5])],
            GWhole | G16th => vec![whole_g],
            GBreve => with_prefix(&BREVE_PREFIX, whole_g),
            G256th => with_prefix(&VALUE_256TH_PREFIX, whole_g),

            AEighth | A128th => vec![BrailleCell::from_dots(&[2, 4])],
            AQuarter | A64th => vec![BrailleCell::from_dots(&[2, 4, 6])],
            AHalf | A32nd => vec![BrailleCell::from_dots(&[2, 3, 4])],
            AWhole | A16th => vec![whole_a],
            ABreve => with_prefix(&BREVE_PREFIX, whole_a),
            A256th => with_prefix(&VALUE_256TH_PREFIX, whole_a),

            BEighth | B128th => vec![BrailleCell::from_dots(&[2, 4, 5])],
            BQuarter | B64th => vec![BrailleCell::from_dots(&[2, 4, 5, 6])],
            BHalf | B32nd => vec![BrailleCell::from_dots(&[2, 3, 4, 5])],
            BWhole | B16th => vec![whole_b],
            BBreve => with_prefix(&BREVE_PREFIX, whole_b),
            B256th => with_prefix(&VALUE_256TH_PREFIX, whole_b),
        }
    }
}

fn with_prefix(prefix: &[BrailleCell], shape: BrailleCell) -> Vec<BrailleCell> {
    let mut out = prefix.to_vec();
    out.push(shape);
    out
}

/// Braille octave marks. Octaves 1 through 7 take a single cell; the
/// registers beyond them double the outermost mark. The edge kinds cannot
/// arise from MusicXML input but the table covers them anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrOctaveKind {
    None,
    BelowFirst,
    Octave1,
    Octave2,
    Octave3,
    Octave4,
    Octave5,
    Octave6,
    Octave7,
    AboveSeventh,
}

impl BsrOctaveKind {
    /// Mark for a scientific octave number, octaves 1..=7 only.
    pub fn from_octave_number(octave: i8) -> Option<BsrOctaveKind> {
        let kind = match octave {
            1 => BsrOctaveKind::Octave1,
            2 => BsrOctaveKind::Octave2,
            3 => BsrOctaveKind::Octave3,
            4 => BsrOctaveKind::Octave4,
            5 => BsrOctaveKind::Octave5,
            6 => BsrOctaveKind::Octave6,
            7 => BsrOctaveKind::Octave7,
            _ => return None,
        };
        Some(kind)
    }

    pub fn cells(self) -> Vec<BrailleCell> {
        match self {
            BsrOctaveKind::None => Vec::new(),
            BsrOctaveKind::BelowFirst => vec![
                BrailleCell::from_dots(&[4]),
                BrailleCell::from_dots(&[4]),
            ],
            BsrOctaveKind::Octave1 => vec![BrailleCell::from_dots(&[4])],
            BsrOctaveKind::Octave2 => vec![BrailleCell::from_dots(&[4, 5])],
            BsrOctaveKind::Octave3 => vec![BrailleCell::from_dots(&[4, 5, 6])],
            BsrOctaveKind::Octave4 => vec![BrailleCell::from_dots(&[5])],
            BsrOctaveKind::Octave5 => vec![BrailleCell::from_dots(&[4, 6])],
            BsrOctaveKind::Octave6 => vec![BrailleCell::from_dots(&[5, 6])],
            BsrOctaveKind::Octave7 => vec![BrailleCell::from_dots(&[6])],
            BsrOctaveKind::AboveSeventh => vec![
                BrailleCell::from_dots(&[6]),
                BrailleCell::from_dots(&[6]),
            ],
        }
    }
}

/// Printed accidentals braille can engrave. The doubled forms simply
/// repeat the single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrAccidentalKind {
    None,
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    DoubleFlat,
}

impl BsrAccidentalKind {
    pub fn cells(self) -> Vec<BrailleCell> {
        match self {
            BsrAccidentalKind::None => Vec::new(),
            BsrAccidentalKind::Sharp => vec![SHARP_SIGN],
            BsrAccidentalKind::Flat => vec![FLAT_SIGN],
            BsrAccidentalKind::Natural => vec![NATURAL_SIGN],
            BsrAccidentalKind::DoubleSharp => vec![SHARP_SIGN, SHARP_SIGN],
            BsrAccidentalKind::DoubleFlat => vec![FLAT_SIGN, FLAT_SIGN],
        }
    }
}

/// A note or rest sign.
///
/// Cell order is fixed by braille convention: accidental, then the octave
/// mark when one is due, then the value shape, then one dot-3 cell per
/// augmentation dot. `octave_mark_needed` is contextual state; the same
/// note renders wider at a line start than mid-line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrNote {
    pub input_line_number: u32,
    pub value: BsrNoteValueKind,
    pub dots: u8,
    pub accidental: BsrAccidentalKind,
    pub octave: BsrOctaveKind,
    pub octave_mark_needed: bool,
}

impl BsrNote {
    pub fn cells(&self) -> Vec<BrailleCell> {
        let mut out = self.accidental.cells();
        if self.octave_mark_needed {
            out.extend(self.octave.cells());
        }
        out.extend(self.value.cells());
        for _ in 0..self.dots {
            out.push(AUGMENTATION_DOT);
        }
        out
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Barlines.

/// Barlines that take a braille sign. Ordinary barlines engrave nothing
/// (the inter-measure space already separates measures) and never become
/// BSR nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrBarlineKind {
    SectionalDouble,
    FinalDouble,
    /// Dotted and dashed barlines share one sign.
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrBarline {
    pub input_line_number: u32,
    pub kind: BsrBarlineKind,
}

impl BsrBarline {
    pub fn cells(&self) -> Vec<BrailleCell> {
        match self.kind {
            BsrBarlineKind::SectionalDouble => vec![
                BrailleCell::from_dots(&[1, 2, 6]),
                BrailleCell::from_dots(&[2, 3]),
            ],
            BsrBarlineKind::FinalDouble => vec![
                BrailleCell::from_dots(&[1, 2, 6]),
                BrailleCell::from_dots(&[1, 3]),
            ],
            BsrBarlineKind::Special => vec![
                BrailleCell::from_dots(&[4, 6]),
                BrailleCell::from_dots(&[1, 2, 3]),
            ],
        }
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Dynamics.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BsrDynamicKind {
    F,
    FF,
    FFF,
    P,
    PP,
    PPP,
    MF,
    MP,
    SF,
    SFZ,
}

impl BsrDynamicKind {
    fn letters(self) -> &'static str {
        match self {
            BsrDynamicKind::F => "f",
            BsrDynamicKind::FF => "ff",
            BsrDynamicKind::FFF => "fff",
            BsrDynamicKind::P => "p",
            BsrDynamicKind::PP => "pp",
            BsrDynamicKind::PPP => "ppp",
            BsrDynamicKind::MF => "mf",
            BsrDynamicKind::MP => "mp",
            BsrDynamicKind::SF => "sf",
            BsrDynamicKind::SFZ => "sfz",
        }
    }
}

/// A dynamic marking: word sign followed by the marking's letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrDynamic {
    pub input_line_number: u32,
    pub kind: BsrDynamicKind,
}

impl BsrDynamic {
    pub fn cells(&self) -> Vec<BrailleCell> {
        let mut out = vec![WORD_SIGN];
        for letter in self.kind.letters().chars() {
            if let Some(cell) = cells::literary_letter(letter) {
                out.push(cell);
            }
        }
        out
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Interpolated text.

/// Free text inside the music: directions and lyric syllables, engraved
/// in literary braille behind a word sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrWords {
    pub input_line_number: u32,
    pub text: String,
}

impl BsrWords {
    pub fn cells(&self) -> Vec<BrailleCell> {
        let mut out = vec![WORD_SIGN];
        out.extend(cells::literary_text(&self.text));
        out
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Spaces and numbers.

/// A run of blank cells. The builder emits one-cell runs ahead of each
/// measure; a run is atomic for line fitting either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrSpaces {
    pub input_line_number: u32,
    pub count: usize,
}

impl BsrSpaces {
    pub fn cells(&self) -> Vec<BrailleCell> {
        vec![BrailleCell::BLANK; self.count]
    }

    pub fn width_in_cells(&self) -> usize {
        self.count
    }
}

/// A numeric sign, used for print page numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrNumber {
    pub input_line_number: u32,
    pub value: u32,
}

impl BsrNumber {
    pub fn cells(&self) -> Vec<BrailleCell> {
        let mut out = Vec::new();
        cells::push_number(self.value, &mut out);
        out
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }
}

// Measures and the element enums.

/// One measure's worth of signs, rendered inline within a line. A measure
/// split across lines appears as two measure nodes sharing a print number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrMeasure {
    pub print_measure_number: String,
    pub input_line_number: u32,
    pub elements: Vec<BsrMeasureElement>,
}

impl BsrMeasure {
    pub fn new(print_measure_number: &str, input_line_number: u32) -> BsrMeasure {
        BsrMeasure {
            print_measure_number: print_measure_number.to_string(),
            input_line_number,
            elements: Vec::new(),
        }
    }

    pub fn append_element(&mut self, element: BsrMeasureElement) {
        self.elements.push(element);
    }

    pub fn width_in_cells(&self) -> usize {
        self.elements.iter().map(|e| e.width_in_cells()).sum()
    }
}

/// A sign inside a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BsrMeasureElement {
    Clef(BsrClef),
    Key(BsrKey),
    Time(BsrTime),
    Note(BsrNote),
    Barline(BsrBarline),
    Dynamic(BsrDynamic),
    Words(BsrWords),
}

impl BsrMeasureElement {
    pub fn cells(&self) -> Vec<BrailleCell> {
        match self {
            BsrMeasureElement::Clef(e) => e.cells(),
            BsrMeasureElement::Key(e) => e.cells(),
            BsrMeasureElement::Time(e) => e.cells(),
            BsrMeasureElement::Note(e) => e.cells(),
            BsrMeasureElement::Barline(e) => e.cells(),
            BsrMeasureElement::Dynamic(e) => e.cells(),
            BsrMeasureElement::Words(e) => e.cells(),
        }
    }

    pub fn width_in_cells(&self) -> usize {
        self.cells().len()
    }

    pub fn input_line_number(&self) -> u32 {
        match self {
            BsrMeasureElement::Clef(e) => e.input_line_number,
            BsrMeasureElement::Key(e) => e.input_line_number,
            BsrMeasureElement::Time(e) => e.input_line_number,
            BsrMeasureElement::Note(e) => e.input_line_number,
            BsrMeasureElement::Barline(e) => e.input_line_number,
            BsrMeasureElement::Dynamic(e) => e.input_line_number,
            BsrMeasureElement::Words(e) => e.input_line_number,
        }
    }
}

/// An element in a line's ordered element list. Measures are by far the
/// common case; the signature kinds appear standalone when a caller lays
/// out heading lines by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BsrLineElement {
    Measure(BsrMeasure),
    Number(BsrNumber),
    Clef(BsrClef),
    Key(BsrKey),
    Time(BsrTime),
    Space(BsrSpaces),
}

impl BsrLineElement {
    pub fn width_in_cells(&self) -> usize {
        match self {
            BsrLineElement::Measure(e) => e.width_in_cells(),
            BsrLineElement::Number(e) => e.width_in_cells(),
            BsrLineElement::Clef(e) => e.width_in_cells(),
            BsrLineElement::Key(e) => e.width_in_cells(),
            BsrLineElement::Time(e) => e.width_in_cells(),
            BsrLineElement::Space(e) => e.width_in_cells(),
        }
    }

    pub fn input_line_number(&self) -> u32 {
        match self {
            BsrLineElement::Measure(e) => e.input_line_number,
            BsrLineElement::Number(e) => e.input_line_number,
            BsrLineElement::Clef(e) => e.input_line_number,
            BsrLineElement::Key(e) => e.input_line_number,
            BsrLineElement::Time(e) => e.input_line_number,
            BsrLineElement::Space(e) => e.input_line_number,
        }
    }
}
