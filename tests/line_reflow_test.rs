// Reflow behavior across the whole pipeline: capacities, ordering,
// measure splitting and idempotence

use braille_music::bsr::elements::{BsrLineElement, BsrMeasureElement};
use braille_music::bsr::{finalize_bsr_score, sign_sequence, BsrScore};
use braille_music::msr::{
    MsrDiatonicStep, MsrDurationKind, MsrElement, MsrMeasure, MsrNote, MsrPart, MsrPartGroup,
    MsrScore, MsrStaff, MsrVoice,
};
use braille_music::{run_translation, BrailleConfig, TranslationError};

const SCALE: [MsrDiatonicStep; 7] = [
    MsrDiatonicStep::C,
    MsrDiatonicStep::D,
    MsrDiatonicStep::E,
    MsrDiatonicStep::F,
    MsrDiatonicStep::G,
    MsrDiatonicStep::A,
    MsrDiatonicStep::B,
];

/// Helper to build a one-voice score running up and down a C scale
fn make_long_source(measure_count: usize, notes_per_measure: usize) -> MsrScore {
    let mut score = MsrScore::new(Some("Scale Study"));
    let group = score.append_part_group(MsrPartGroup::new(None));
    let part = group.append_part(MsrPart::new("P1", None));
    let voice = part
        .append_staff(MsrStaff::new(1))
        .append_voice(MsrVoice::new(1));
    let mut step_index = 0;
    for number in 1..=measure_count {
        let measure = voice.append_measure(MsrMeasure::new(&number.to_string(), 1));
        for _ in 0..notes_per_measure {
            measure.append_element(MsrElement::Note(MsrNote::pitched(
                1,
                SCALE[step_index % SCALE.len()],
                4,
                MsrDurationKind::Quarter,
            )));
            step_index += 1;
        }
    }
    score
}

/// Helper to count note signs across the whole braille tree
fn note_count(score: &BsrScore) -> usize {
    score
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .flat_map(|line| line.elements.iter())
        .filter_map(|element| match element {
            BsrLineElement::Measure(measure) => Some(measure),
            _ => None,
        })
        .flat_map(|measure| measure.elements.iter())
        .filter(|element| matches!(element, BsrMeasureElement::Note(_)))
        .count()
}

fn config_with(cells_per_line: usize, lines_per_page: usize) -> BrailleConfig {
    BrailleConfig {
        cells_per_line,
        lines_per_page,
        ..BrailleConfig::default()
    }
}

#[test]
fn test_reflow_honors_the_configured_capacities() {
    let source = make_long_source(12, 5);
    let output = run_translation(&source, &config_with(10, 3)).expect("translation should succeed");

    let mut expected_line_number = 1;
    for (index, page) in output.bsr.pages.iter().enumerate() {
        assert_eq!(page.print_page_number, index + 1);
        assert!(page.lines.len() <= 3, "page {} overflows", index + 1);
        for line in &page.lines {
            assert!(
                line.width_in_cells() <= 10,
                "line {} is {} cells wide",
                line.print_line_number,
                line.width_in_cells()
            );
            assert_eq!(line.print_line_number, expected_line_number);
            expected_line_number += 1;
        }
    }
    assert!(output.bsr.pages.len() > 1, "the study cannot fit one page");
}

#[test]
fn test_sign_order_is_preserved_by_the_whole_pipeline() {
    let source = make_long_source(9, 4);
    let build_only = BrailleConfig {
        exit_after_build: true,
        ..config_with(8, 4)
    };
    let unconstrained = run_translation(&source, &build_only)
        .expect("build should succeed")
        .bsr;
    let refined = run_translation(&source, &config_with(8, 4))
        .expect("translation should succeed")
        .bsr;

    assert_eq!(sign_sequence(&unconstrained), sign_sequence(&refined));
}

#[test]
fn test_notes_survive_the_reflow_uncut() {
    let source = make_long_source(7, 6);
    let build_only = BrailleConfig {
        exit_after_build: true,
        ..config_with(9, 5)
    };
    let unconstrained = run_translation(&source, &build_only)
        .expect("build should succeed")
        .bsr;
    let refined = run_translation(&source, &config_with(9, 5))
        .expect("translation should succeed")
        .bsr;

    assert_eq!(note_count(&unconstrained), 42);
    assert_eq!(note_count(&refined), 42);
}

#[test]
fn test_fitting_measures_stay_whole() {
    let source = make_long_source(4, 3);
    let output =
        run_translation(&source, &config_with(40, 27)).expect("translation should succeed");

    let measure_nodes: usize = output
        .bsr
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .flat_map(|line| line.elements.iter())
        .filter(|element| matches!(element, BsrLineElement::Measure(_)))
        .count();
    assert_eq!(measure_nodes, 4, "nothing forced a split");
}

#[test]
fn test_reflow_is_idempotent() {
    let source = make_long_source(11, 5);
    let config = config_with(12, 4);
    let refined = run_translation(&source, &config)
        .expect("translation should succeed")
        .bsr;
    let again = finalize_bsr_score(&refined, &config).expect("refining again should succeed");
    assert_eq!(refined, again);
}

#[test]
fn test_single_cell_lines_are_rejected() {
    let source = make_long_source(1, 1);
    let error = run_translation(&source, &config_with(1, 27)).unwrap_err();
    match error {
        TranslationError::InvalidConfiguration(inner) => {
            assert!(inner.to_string().contains("cannot fit"));
        }
        other => panic!("expected a configuration rejection, got {other:?}"),
    }
}
