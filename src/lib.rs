//! Braille Music Transcription Library
//!
//! Translates a music score representation (MSR) into braille music
//! code. A builder pass produces an unconstrained braille score (BSR),
//! which a refiner pass then reflows against the configured line and
//! page capacities before the code generator serializes the result as
//! UTF-8 or UTF-16 bytes.

pub mod braille;
pub mod bsr;
pub mod config;
pub mod errors;
pub mod msr;
pub mod pipeline;
pub mod renderers;

// Re-export the types most callers touch
pub use config::{BrailleConfig, ByteOrderingKind, UtfKind};
pub use errors::{ConfigError, TranslationError};
pub use pipeline::{run_translation, PassTiming, TimingReport, TranslationOutput};
