//! Braille cell alphabet and byte codecs.

pub mod cells;
pub mod encoding;

pub use cells::{cells_to_string, BrailleCell};
pub use encoding::BrailleOutputKind;
