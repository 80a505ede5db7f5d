//! Braille code generation: serializes a refined braille score into the
//! final byte stream.
//!
//! Stream framing:
//!
//! ```text
//!   [byte order mark]?  ( line-cells END_OF_LINE )*  END_OF_PAGE   per page
//! ```
//!
//! Every sign kind that reaches this stage must have a wired cell
//! pattern. The builder omits unsupported input up front, so meeting an
//! unmapped sentinel here means a transformation stage misbehaved and the
//! run stops with an integration defect rather than emitting gaps.

use std::io;

use crate::braille::BrailleOutputKind;
use crate::bsr::elements::{
    BsrClefKind, BsrLineElement, BsrMeasure, BsrMeasureElement, BsrNoteValueKind,
};
use crate::bsr::BsrScore;
use crate::config::BrailleConfig;
use crate::errors::TranslationError;

/// Serializes the whole score. The returned buffer is ready to be stored
/// or embossed as-is.
pub fn generate_braille(
    score: &BsrScore,
    config: &BrailleConfig,
) -> Result<Vec<u8>, TranslationError> {
    let codec = config.output_kind();
    let mut out = Vec::new();
    if config.emits_bom() {
        codec.push_bom(&mut out);
    }
    for page in &score.pages {
        for line in &page.lines {
            for element in &line.elements {
                emit_line_element(element, codec, &mut out)?;
            }
            codec.push_end_of_line(&mut out);
        }
        codec.push_end_of_page(&mut out);
    }
    log::info!(
        "generated {} byte(s) of {} braille music code",
        out.len(),
        codec
    );
    Ok(out)
}

/// Serializes the score and writes it to `writer` in one call.
pub fn write_braille(
    score: &BsrScore,
    config: &BrailleConfig,
    writer: &mut dyn io::Write,
) -> Result<(), TranslationError> {
    let bytes = generate_braille(score, config)?;
    writer.write_all(&bytes)?;
    Ok(())
}

fn emit_line_element(
    element: &BsrLineElement,
    codec: BrailleOutputKind,
    out: &mut Vec<u8>,
) -> Result<(), TranslationError> {
    match element {
        BsrLineElement::Measure(measure) => emit_measure(measure, codec, out),
        BsrLineElement::Clef(clef) => {
            if clef.kind == BsrClefKind::None {
                return Err(unmapped_clef(clef.input_line_number));
            }
            codec.push_cells(&clef.kind.cells(), out);
            Ok(())
        }
        BsrLineElement::Number(number) => {
            codec.push_cells(&number.cells(), out);
            Ok(())
        }
        BsrLineElement::Key(key) => {
            codec.push_cells(&key.cells(), out);
            Ok(())
        }
        BsrLineElement::Time(time) => {
            codec.push_cells(&time.cells(), out);
            Ok(())
        }
        BsrLineElement::Space(spaces) => {
            codec.push_cells(&spaces.cells(), out);
            Ok(())
        }
    }
}

fn emit_measure(
    measure: &BsrMeasure,
    codec: BrailleOutputKind,
    out: &mut Vec<u8>,
) -> Result<(), TranslationError> {
    for sign in &measure.elements {
        match sign {
            BsrMeasureElement::Clef(clef) if clef.kind == BsrClefKind::None => {
                return Err(unmapped_clef(clef.input_line_number));
            }
            BsrMeasureElement::Note(note) if note.value == BsrNoteValueKind::None => {
                return Err(TranslationError::IntegrationDefect(format!(
                    "a note without a braille value reached the code generator \
                     (near input line {})",
                    note.input_line_number
                )));
            }
            other => codec.push_cells(&other.cells(), out),
        }
    }
    Ok(())
}

fn unmapped_clef(input_line_number: u32) -> TranslationError {
    TranslationError::IntegrationDefect(format!(
        "a clef without a braille pattern reached the code generator \
         (near input line {input_line_number})"
    ))
}
