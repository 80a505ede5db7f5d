//! Braille output: final code generation plus two inspection views.

pub mod generator;
pub mod text;

pub use generator::{generate_braille, write_braille};
pub use text::{bsr_as_json, bsr_as_text};
