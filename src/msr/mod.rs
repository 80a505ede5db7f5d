//! Music Score Representation: the importer-facing input model.

pub mod elements;
pub mod pitch;
pub mod score;

pub use elements::{
    MsrBarline, MsrBarlineKind, MsrClef, MsrClefKind, MsrDurationKind, MsrDynamic,
    MsrDynamicKind, MsrElement, MsrKey, MsrKeyKind, MsrLineBreak, MsrModeKind, MsrNote,
    MsrNoteContent, MsrPageBreak, MsrTime, MsrTimeKind, MsrWords,
};
pub use pitch::{diatonic_position, MsrAccidentalKind, MsrDiatonicStep};
pub use score::{
    MsrMeasure, MsrPart, MsrPartGroup, MsrScore, MsrStaff, MsrVoice,
};
