//! Output renderers for the transcription pipeline.
//!
//! - **braille::generator**: the final braille code byte stream
//! - **braille::text**: human-readable and JSON views of the braille score

pub mod braille;

pub use braille::{bsr_as_json, bsr_as_text, generate_braille, write_braille};
