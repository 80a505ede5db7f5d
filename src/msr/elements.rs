//! Measure-level elements of the score model.
//!
//! Every element carries the line number of the input document it came
//! from, so diagnostics can point back at the source. The enums here
//! deliberately cover more ground than the braille transcription can
//! express; the builder decides per kind whether a braille rendering
//! exists and reports the ones it has to leave out.

use serde::{Deserialize, Serialize};

use super::pitch::{MsrAccidentalKind, MsrDiatonicStep};

/// One element in a measure's ordered element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrElement {
    Clef(MsrClef),
    Key(MsrKey),
    Time(MsrTime),
    Note(MsrNote),
    Barline(MsrBarline),
    Dynamic(MsrDynamic),
    Words(MsrWords),
    LineBreak(MsrLineBreak),
    PageBreak(MsrPageBreak),
}

impl MsrElement {
    pub fn input_line_number(&self) -> u32 {
        match self {
            MsrElement::Clef(e) => e.input_line_number,
            MsrElement::Key(e) => e.input_line_number,
            MsrElement::Time(e) => e.input_line_number,
            MsrElement::Note(e) => e.input_line_number,
            MsrElement::Barline(e) => e.input_line_number,
            MsrElement::Dynamic(e) => e.input_line_number,
            MsrElement::Words(e) => e.input_line_number,
            MsrElement::LineBreak(e) => e.input_line_number,
            MsrElement::PageBreak(e) => e.input_line_number,
        }
    }
}

// Clefs.

/// Clef shapes and positions as they arrive from the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrClefKind {
    Treble,
    TrebleLine1,
    TreblePlus8,
    TrebleMinus8,
    TreblePlus15,
    TrebleMinus15,
    Bass,
    BassPlus8,
    BassMinus8,
    BassPlus15,
    BassMinus15,
    Soprano,
    MezzoSoprano,
    Alto,
    Tenor,
    Baritone,
    VarBaritone,
    Percussion,
    Tablature,
    Jianpu,
}

impl MsrClefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MsrClefKind::Treble => "treble",
            MsrClefKind::TrebleLine1 => "treble on line 1",
            MsrClefKind::TreblePlus8 => "treble +8",
            MsrClefKind::TrebleMinus8 => "treble -8",
            MsrClefKind::TreblePlus15 => "treble +15",
            MsrClefKind::TrebleMinus15 => "treble -15",
            MsrClefKind::Bass => "bass",
            MsrClefKind::BassPlus8 => "bass +8",
            MsrClefKind::BassMinus8 => "bass -8",
            MsrClefKind::BassPlus15 => "bass +15",
            MsrClefKind::BassMinus15 => "bass -15",
            MsrClefKind::Soprano => "soprano",
            MsrClefKind::MezzoSoprano => "mezzo-soprano",
            MsrClefKind::Alto => "alto",
            MsrClefKind::Tenor => "tenor",
            MsrClefKind::Baritone => "baritone",
            MsrClefKind::VarBaritone => "variant baritone",
            MsrClefKind::Percussion => "percussion",
            MsrClefKind::Tablature => "tablature",
            MsrClefKind::Jianpu => "jianpu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrClef {
    pub input_line_number: u32,
    pub kind: MsrClefKind,
}

// Keys.

/// Mode of a traditional key, as MusicXML spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrModeKind {
    Major,
    Minor,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrKeyKind {
    /// A tonic-and-mode key, the common case.
    Traditional {
        tonic_step: MsrDiatonicStep,
        /// Chromatic alteration of the tonic in semitones, -2 ..= 2.
        tonic_alteration: i8,
        mode: MsrModeKind,
    },
    /// Humdrum/Scot non-traditional key layout.
    HumdrumScot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrKey {
    pub input_line_number: u32,
    pub kind: MsrKeyKind,
}

// Time signatures.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrTimeKind {
    /// A plain numerator-over-denominator signature.
    Numerical { numerator: u16, denominator: u16 },
    CommonTime,
    CutTime,
    /// Unmetered music; there is nothing to engrave.
    SenzaMisura,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrTime {
    pub input_line_number: u32,
    pub kind: MsrTimeKind,
}

// Notes and rests.

/// Graphic note value, the printed shape independent of tuplet scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrDurationKind {
    Maxima,
    Long,
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
    HundredTwentyEighth,
    TwoHundredFiftySixth,
    FiveHundredTwelfth,
    ThousandTwentyFourth,
}

impl MsrDurationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MsrDurationKind::Maxima => "maxima",
            MsrDurationKind::Long => "long",
            MsrDurationKind::Breve => "breve",
            MsrDurationKind::Whole => "whole",
            MsrDurationKind::Half => "half",
            MsrDurationKind::Quarter => "quarter",
            MsrDurationKind::Eighth => "eighth",
            MsrDurationKind::Sixteenth => "16th",
            MsrDurationKind::ThirtySecond => "32nd",
            MsrDurationKind::SixtyFourth => "64th",
            MsrDurationKind::HundredTwentyEighth => "128th",
            MsrDurationKind::TwoHundredFiftySixth => "256th",
            MsrDurationKind::FiveHundredTwelfth => "512th",
            MsrDurationKind::ThousandTwentyFourth => "1024th",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrNoteContent {
    Pitched {
        step: MsrDiatonicStep,
        /// Scientific octave number; octave 4 holds middle C.
        octave: i8,
    },
    Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrNote {
    pub input_line_number: u32,
    pub content: MsrNoteContent,
    pub graphic_duration: MsrDurationKind,
    /// Augmentation dots on the printed value.
    pub dots: u8,
    pub accidental: MsrAccidentalKind,
    /// Lyric syllables attached to this note, verse order.
    pub syllables: Vec<String>,
}

impl MsrNote {
    /// A pitched note with no accidental and no lyrics.
    pub fn pitched(
        input_line_number: u32,
        step: MsrDiatonicStep,
        octave: i8,
        graphic_duration: MsrDurationKind,
    ) -> MsrNote {
        MsrNote {
            input_line_number,
            content: MsrNoteContent::Pitched { step, octave },
            graphic_duration,
            dots: 0,
            accidental: MsrAccidentalKind::None,
            syllables: Vec::new(),
        }
    }

    /// A rest of the given printed value.
    pub fn rest(input_line_number: u32, graphic_duration: MsrDurationKind) -> MsrNote {
        MsrNote {
            input_line_number,
            content: MsrNoteContent::Rest,
            graphic_duration,
            dots: 0,
            accidental: MsrAccidentalKind::None,
            syllables: Vec::new(),
        }
    }

    pub fn with_dots(mut self, dots: u8) -> MsrNote {
        self.dots = dots;
        self
    }

    pub fn with_accidental(mut self, accidental: MsrAccidentalKind) -> MsrNote {
        self.accidental = accidental;
        self
    }

    pub fn with_syllable(mut self, syllable: &str) -> MsrNote {
        self.syllables.push(syllable.to_string());
        self
    }
}

// Barlines.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrBarlineKind {
    Regular,
    LightLight,
    LightHeavy,
    HeavyLight,
    HeavyHeavy,
    Heavy,
    Dotted,
    Dashed,
    Tick,
    Short,
}

impl MsrBarlineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MsrBarlineKind::Regular => "regular",
            MsrBarlineKind::LightLight => "light-light",
            MsrBarlineKind::LightHeavy => "light-heavy",
            MsrBarlineKind::HeavyLight => "heavy-light",
            MsrBarlineKind::HeavyHeavy => "heavy-heavy",
            MsrBarlineKind::Heavy => "heavy",
            MsrBarlineKind::Dotted => "dotted",
            MsrBarlineKind::Dashed => "dashed",
            MsrBarlineKind::Tick => "tick",
            MsrBarlineKind::Short => "short",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrBarline {
    pub input_line_number: u32,
    pub kind: MsrBarlineKind,
}

// Dynamics.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrDynamicKind {
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
    /// Composite and rare markings (fp, rfz, sffz, ...).
    Other,
}

impl MsrDynamicKind {
    /// The marking's letters as engraved.
    pub fn as_str(self) -> &'static str {
        match self {
            MsrDynamicKind::F => "f",
            MsrDynamicKind::FF => "ff",
            MsrDynamicKind::FFF => "fff",
            MsrDynamicKind::P => "p",
            MsrDynamicKind::PP => "pp",
            MsrDynamicKind::PPP => "ppp",
            MsrDynamicKind::MF => "mf",
            MsrDynamicKind::MP => "mp",
            MsrDynamicKind::SF => "sf",
            MsrDynamicKind::SFZ => "sfz",
            MsrDynamicKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrDynamic {
    pub input_line_number: u32,
    pub kind: MsrDynamicKind,
}

// Directions and breaks.

/// A textual direction above or below the staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrWords {
    pub input_line_number: u32,
    pub text: String,
}

/// An explicit system break in the engraved source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrLineBreak {
    pub input_line_number: u32,
}

/// An explicit page turn in the engraved source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrPageBreak {
    pub input_line_number: u32,
}
