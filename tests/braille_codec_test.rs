// Byte codecs: the same score must decode to identical dot patterns
// under UTF-8 and both UTF-16 byte orders

use braille_music::msr::{
    MsrDiatonicStep, MsrDurationKind, MsrElement, MsrKey, MsrKeyKind, MsrMeasure, MsrModeKind,
    MsrNote, MsrPart, MsrPartGroup, MsrScore, MsrStaff, MsrVoice,
};
use braille_music::{
    run_translation, BrailleConfig, ByteOrderingKind, ConfigError, TranslationError, UtfKind,
};

#[derive(Debug, PartialEq)]
enum Unit {
    Cell(u8),
    EndOfLine,
    EndOfPage,
}

/// Helper to decode a UTF-8 braille stream into dot patterns
fn decode_utf8(bytes: &[u8]) -> Vec<Unit> {
    let text = std::str::from_utf8(bytes).expect("the stream must be valid UTF-8");
    text.chars()
        .map(|c| match c {
            '\n' => Unit::EndOfLine,
            '\u{000C}' => Unit::EndOfPage,
            c => {
                let scalar = c as u32;
                assert!(
                    (0x2800..0x2900).contains(&scalar),
                    "unexpected character {c:?}"
                );
                Unit::Cell((scalar - 0x2800) as u8)
            }
        })
        .collect()
}

/// Helper to decode a UTF-16 braille stream, consuming the mark if any
fn decode_utf16(bytes: &[u8], big_endian: bool) -> Vec<Unit> {
    assert_eq!(bytes.len() % 2, 0, "UTF-16 streams come in pairs");
    let mut units = Vec::new();
    for pair in bytes.chunks_exact(2) {
        let value = if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        };
        match value {
            0xFEFF => {}
            0x000A => units.push(Unit::EndOfLine),
            0x000C => units.push(Unit::EndOfPage),
            v if (0x2800..0x2900).contains(&v) => units.push(Unit::Cell((v - 0x2800) as u8)),
            other => panic!("unexpected UTF-16 unit {other:#06X}"),
        }
    }
    units
}

/// Helper to build a two-measure source in D major
fn make_source() -> MsrScore {
    let mut score = MsrScore::new(Some("Codec Check"));
    let group = score.append_part_group(MsrPartGroup::new(None));
    let part = group.append_part(MsrPart::new("P1", None));
    let voice = part
        .append_staff(MsrStaff::new(1))
        .append_voice(MsrVoice::new(1));

    let first = voice.append_measure(MsrMeasure::new("1", 1));
    first.append_element(MsrElement::Key(MsrKey {
        input_line_number: 1,
        kind: MsrKeyKind::Traditional {
            tonic_step: MsrDiatonicStep::D,
            tonic_alteration: 0,
            mode: MsrModeKind::Major,
        },
    }));
    first.append_element(MsrElement::Note(MsrNote::pitched(
        1,
        MsrDiatonicStep::D,
        4,
        MsrDurationKind::Quarter,
    )));
    first.append_element(MsrElement::Note(MsrNote::pitched(
        1,
        MsrDiatonicStep::F,
        4,
        MsrDurationKind::Eighth,
    )));

    let second = voice.append_measure(MsrMeasure::new("2", 1));
    second.append_element(MsrElement::Note(MsrNote::rest(
        2,
        MsrDurationKind::Half,
    )));
    score
}

fn config_for(utf_kind: UtfKind, byte_ordering_mark: Option<ByteOrderingKind>) -> BrailleConfig {
    BrailleConfig {
        utf_kind,
        byte_ordering_mark,
        ..BrailleConfig::default()
    }
}

#[test]
fn test_all_codecs_agree_on_the_dot_patterns() {
    let source = make_source();
    let utf8 = run_translation(&source, &config_for(UtfKind::Utf8, None))
        .expect("translation should succeed")
        .braille
        .unwrap();
    let utf16_be = run_translation(&source, &config_for(UtfKind::Utf16, None))
        .expect("translation should succeed")
        .braille
        .unwrap();
    let utf16_le = run_translation(
        &source,
        &config_for(UtfKind::Utf16, Some(ByteOrderingKind::Small)),
    )
    .expect("translation should succeed")
    .braille
    .unwrap();

    let reference = decode_utf8(&utf8);
    assert!(!reference.is_empty());
    assert_eq!(decode_utf16(&utf16_be, true), reference);
    assert_eq!(decode_utf16(&utf16_le, false), reference);
}

#[test]
fn test_utf16_opens_with_a_big_endian_mark_by_default() {
    let bytes = run_translation(&make_source(), &config_for(UtfKind::Utf16, None))
        .expect("translation should succeed")
        .braille
        .unwrap();
    assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
}

#[test]
fn test_small_endian_swaps_the_mark() {
    let bytes = run_translation(
        &make_source(),
        &config_for(UtfKind::Utf16, Some(ByteOrderingKind::Small)),
    )
    .expect("translation should succeed")
    .braille
    .unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
}

#[test]
fn test_a_declined_mark_leaves_the_stream_bare() {
    let bytes = run_translation(
        &make_source(),
        &config_for(UtfKind::Utf16, Some(ByteOrderingKind::None)),
    )
    .expect("translation should succeed")
    .braille
    .unwrap();
    // Straight into the first cell: the high byte of U+28xx.
    assert_eq!(bytes[0], 0x28);
}

#[test]
fn test_utf8_cannot_carry_a_mark() {
    let error = run_translation(
        &make_source(),
        &config_for(UtfKind::Utf8, Some(ByteOrderingKind::Big)),
    )
    .unwrap_err();
    match error {
        TranslationError::InvalidConfiguration(inner) => {
            assert!(inner.to_string().contains("byte order mark"));
        }
        other => panic!("expected a configuration rejection, got {other:?}"),
    }
}

#[test]
fn test_framing_counts_lines_and_pages() {
    let source = make_source();
    let output = run_translation(&source, &config_for(UtfKind::Utf8, None))
        .expect("translation should succeed");
    let units = decode_utf8(output.braille.as_deref().unwrap());

    let line_count = output.bsr.line_count();
    let page_count = output.bsr.pages.len();
    let eol = units.iter().filter(|u| **u == Unit::EndOfLine).count();
    let eop = units.iter().filter(|u| **u == Unit::EndOfPage).count();
    assert_eq!(eol, line_count);
    assert_eq!(eop, page_count);
    assert_eq!(units.last(), Some(&Unit::EndOfPage));
}

#[test]
fn test_the_unknown_utf_kind_diagnostic_is_stable() {
    let error = BrailleConfig::from_yaml("utf_kind: 12").unwrap_err();
    assert!(matches!(error, ConfigError::Yaml(_)));
    assert!(error
        .to_string()
        .contains("UTF kind '12' is unknown; possible values are 8 and 16"));
}

#[test]
fn test_yaml_configuration_selects_the_codec() {
    let config = BrailleConfig::from_yaml(
        "cells_per_line: 24\nutf_kind: 16\nbyte_ordering_mark: small\n",
    )
    .expect("the bundle is well formed");
    assert_eq!(config.cells_per_line, 24);
    assert_eq!(config.utf_kind, UtfKind::Utf16);
    assert_eq!(config.byte_ordering_mark, Some(ByteOrderingKind::Small));
    config.validate().expect("the bundle is consistent");
}
