//! First transformation stage: walking the source score and emitting an
//! unconstrained braille score.
//!
//! The walk is a single document-order pass. Structural breaks in the
//! output happen only where the source declares them (system and page
//! breaks); nothing is width-checked yet, a line grows as wide as its
//! content. Capacity enforcement is entirely the refiner's job.
//!
//! Translation is table-driven and total: every source kind either maps
//! to a braille sign or is consciously omitted. Omissions never abort the
//! build; they are logged and collected into a report so callers can see
//! what the transcription lost.

use crate::bsr::elements::{
    BsrAccidentalKind, BsrBarline, BsrBarlineKind, BsrClef, BsrClefKind, BsrDynamic,
    BsrDynamicKind, BsrKey, BsrKeyKind, BsrLineElement, BsrMeasure, BsrMeasureElement, BsrNote,
    BsrNoteValueKind, BsrNumber, BsrOctaveKind, BsrSpaces, BsrTime, BsrTimeKind, BsrWords,
};
use crate::bsr::score::{BsrLine, BsrPage, BsrScore, BsrTranscriptionNotes, MsrSummary};
use crate::config::BrailleConfig;
use crate::msr::{
    diatonic_position, MsrAccidentalKind, MsrBarlineKind, MsrClefKind, MsrDiatonicStep,
    MsrDynamicKind, MsrElement, MsrKeyKind, MsrMeasure, MsrModeKind, MsrNote, MsrNoteContent,
    MsrScore, MsrTimeKind,
};

use serde::{Deserialize, Serialize};

/// A source element the transcription had to leave out, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedElement {
    pub element: String,
    pub reason: String,
    pub part_id: Option<String>,
    pub measure_number: Option<String>,
    pub input_line_number: u32,
}

/// The builder's output: the unconstrained tree plus the omission report.
#[derive(Debug, Clone)]
pub struct BsrBuildResult {
    pub score: BsrScore,
    pub skipped: Vec<SkippedElement>,
}

/// Translates a source score into an unconstrained braille score.
///
/// Never fails: untranslatable elements are omitted and reported, which
/// is the conventional braille-transcription policy for signs the code
/// has no equivalent for.
pub fn build_bsr_score(msr: &MsrScore, config: &BrailleConfig) -> BsrBuildResult {
    let mut builder = BsrBuilder::new(msr, config);
    for group in &msr.part_groups {
        for part in &group.parts {
            builder.current_part_id = Some(part.id.clone());
            for staff in &part.staves {
                for voice in &staff.voices {
                    for measure in &voice.measures {
                        builder.translate_measure(measure);
                    }
                }
            }
        }
    }
    builder.finish()
}

/// Walk state: the tree under construction plus the translation context
/// (who we are inside, and the previous note the octave rule compares
/// against).
struct BsrBuilder<'a> {
    config: &'a BrailleConfig,
    score: BsrScore,
    next_line_number: usize,
    /// Diatonic position of the previous pitched note, reset at every
    /// line start so a line's first note always takes its octave mark.
    previous_note: Option<i32>,
    current_part_id: Option<String>,
    current_measure_number: Option<String>,
    skipped: Vec<SkippedElement>,
}

impl<'a> BsrBuilder<'a> {
    fn new(msr: &MsrScore, config: &'a BrailleConfig) -> BsrBuilder<'a> {
        let mut score = BsrScore::new(MsrSummary::of(msr));
        if !config.transcription_notes.is_empty() {
            score.transcription_notes = Some(BsrTranscriptionNotes {
                lines: config.transcription_notes.clone(),
            });
        }
        // The tree always opens with page 1, line 1.
        let page = score.append_page(BsrPage::new(1));
        page.append_line(BsrLine::new(1));
        BsrBuilder {
            config,
            score,
            next_line_number: 2,
            previous_note: None,
            current_part_id: None,
            current_measure_number: None,
            skipped: Vec::new(),
        }
    }

    fn finish(self) -> BsrBuildResult {
        BsrBuildResult {
            score: self.score,
            skipped: self.skipped,
        }
    }

    fn current_line_mut(&mut self) -> &mut BsrLine {
        // Every page is created with at least one line, so both levels
        // are non-empty here.
        self.score
            .pages
            .last_mut()
            .unwrap()
            .lines
            .last_mut()
            .unwrap()
    }

    fn start_new_line(&mut self) {
        let number = self.next_line_number;
        self.next_line_number += 1;
        self.score
            .pages
            .last_mut()
            .unwrap()
            .append_line(BsrLine::new(number));
        self.previous_note = None;
    }

    fn start_new_page(&mut self, input_line_number: u32) {
        let page_number = self.score.pages.len() + 1;
        self.score.append_page(BsrPage::new(page_number));
        self.start_new_line();
        // Pages after the first open with their print page number.
        self.current_line_mut()
            .append_element(BsrLineElement::Number(BsrNumber {
                input_line_number,
                value: page_number as u32,
            }));
    }

    fn add_skipped(&mut self, element: &str, reason: &str, input_line_number: u32) {
        log::warn!(
            "omitting {} at input line {}: {}",
            element,
            input_line_number,
            reason
        );
        self.skipped.push(SkippedElement {
            element: element.to_string(),
            reason: reason.to_string(),
            part_id: self.current_part_id.clone(),
            measure_number: self.current_measure_number.clone(),
            input_line_number,
        });
    }

    fn translate_measure(&mut self, msr_measure: &MsrMeasure) {
        self.current_measure_number = Some(msr_measure.number.clone());
        let mut open: Option<BsrMeasure> = None;
        let mut space_emitted = false;

        for element in &msr_measure.elements {
            match element {
                MsrElement::LineBreak(_) => {
                    self.close_measure(&mut open);
                    self.start_new_line();
                }
                MsrElement::PageBreak(brk) => {
                    self.close_measure(&mut open);
                    self.start_new_page(brk.input_line_number);
                }
                MsrElement::Clef(clef) => {
                    if !self.config.include_clefs {
                        continue;
                    }
                    let kind = clef_kind_for(clef.kind);
                    if kind == BsrClefKind::None {
                        self.add_skipped(
                            "clef",
                            &format!("{} clef has no braille equivalent", clef.kind.as_str()),
                            clef.input_line_number,
                        );
                        continue;
                    }
                    self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                        .append_element(BsrMeasureElement::Clef(BsrClef {
                            input_line_number: clef.input_line_number,
                            kind,
                        }));
                }
                MsrElement::Key(key) => match &key.kind {
                    MsrKeyKind::Traditional {
                        tonic_step,
                        tonic_alteration,
                        mode,
                    } => match key_signature(*tonic_step, *tonic_alteration, *mode) {
                        Some((kind, alteration_count)) => {
                            self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                                .append_element(BsrMeasureElement::Key(BsrKey {
                                    input_line_number: key.input_line_number,
                                    kind,
                                    alteration_count,
                                }));
                        }
                        None => {
                            self.add_skipped(
                                "key",
                                "theoretical key signature with more than 7 alterations",
                                key.input_line_number,
                            );
                        }
                    },
                    MsrKeyKind::HumdrumScot => {
                        self.add_skipped(
                            "key",
                            "Humdrum/Scot keys have no braille signature",
                            key.input_line_number,
                        );
                    }
                },
                MsrElement::Time(time) => {
                    let kind = match &time.kind {
                        MsrTimeKind::Numerical {
                            numerator,
                            denominator,
                        } => BsrTimeKind::Numerical {
                            numerator: *numerator,
                            denominator: *denominator,
                        },
                        MsrTimeKind::CommonTime => BsrTimeKind::Common,
                        MsrTimeKind::CutTime => BsrTimeKind::Cut,
                        MsrTimeKind::SenzaMisura => {
                            self.add_skipped(
                                "time",
                                "unmetered music carries no braille time signature",
                                time.input_line_number,
                            );
                            continue;
                        }
                    };
                    self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                        .append_element(BsrMeasureElement::Time(BsrTime {
                            input_line_number: time.input_line_number,
                            kind,
                        }));
                }
                MsrElement::Note(note) => {
                    self.translate_note(note, &mut open, &mut space_emitted, msr_measure);
                }
                MsrElement::Barline(barline) => {
                    let kind = match barline.kind {
                        // An ordinary barline is the inter-measure space
                        // itself; there is nothing to engrave.
                        MsrBarlineKind::Regular => continue,
                        MsrBarlineKind::LightLight => BsrBarlineKind::SectionalDouble,
                        MsrBarlineKind::LightHeavy => BsrBarlineKind::FinalDouble,
                        MsrBarlineKind::Dotted | MsrBarlineKind::Dashed => {
                            BsrBarlineKind::Special
                        }
                        other => {
                            self.add_skipped(
                                "barline",
                                &format!("{} barline has no braille sign", other.as_str()),
                                barline.input_line_number,
                            );
                            continue;
                        }
                    };
                    self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                        .append_element(BsrMeasureElement::Barline(BsrBarline {
                            input_line_number: barline.input_line_number,
                            kind,
                        }));
                }
                MsrElement::Dynamic(dynamic) => {
                    let kind = match dynamic.kind {
                        MsrDynamicKind::F => BsrDynamicKind::F,
                        MsrDynamicKind::FF => BsrDynamicKind::FF,
                        MsrDynamicKind::FFF => BsrDynamicKind::FFF,
                        MsrDynamicKind::P => BsrDynamicKind::P,
                        MsrDynamicKind::PP => BsrDynamicKind::PP,
                        MsrDynamicKind::PPP => BsrDynamicKind::PPP,
                        MsrDynamicKind::MF => BsrDynamicKind::MF,
                        MsrDynamicKind::MP => BsrDynamicKind::MP,
                        MsrDynamicKind::SF => BsrDynamicKind::SF,
                        MsrDynamicKind::SFZ => BsrDynamicKind::SFZ,
                        MsrDynamicKind::Other => {
                            self.add_skipped(
                                "dynamic",
                                "composite dynamic marking is not transcribed",
                                dynamic.input_line_number,
                            );
                            continue;
                        }
                    };
                    self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                        .append_element(BsrMeasureElement::Dynamic(BsrDynamic {
                            input_line_number: dynamic.input_line_number,
                            kind,
                        }));
                }
                MsrElement::Words(words) => {
                    let sign = BsrWords {
                        input_line_number: words.input_line_number,
                        text: words.text.clone(),
                    };
                    if !words.text.is_empty() && sign.cells().len() <= 1 {
                        self.add_skipped(
                            "words",
                            "text contains no transcribable characters",
                            words.input_line_number,
                        );
                        continue;
                    }
                    self.ensure_open(&mut open, &mut space_emitted, msr_measure)
                        .append_element(BsrMeasureElement::Words(sign));
                }
            }
        }

        // A measure with no translatable content still contributes its
        // leading space and an empty measure node.
        self.ensure_open(&mut open, &mut space_emitted, msr_measure);
        self.close_measure(&mut open);
    }

    fn translate_note(
        &mut self,
        note: &MsrNote,
        open: &mut Option<BsrMeasure>,
        space_emitted: &mut bool,
        msr_measure: &MsrMeasure,
    ) {
        let sign = match &note.content {
            MsrNoteContent::Pitched { step, octave } => {
                let value = match BsrNoteValueKind::from_pitched(*step, note.graphic_duration) {
                    Some(value) => value,
                    None => {
                        self.add_skipped(
                            "note",
                            &format!(
                                "{} duration has no braille shape",
                                note.graphic_duration.as_str()
                            ),
                            note.input_line_number,
                        );
                        return;
                    }
                };
                let octave_kind = match BsrOctaveKind::from_octave_number(*octave) {
                    Some(kind) => kind,
                    None => {
                        self.add_skipped(
                            "note",
                            &format!("octave {} is outside the marked range 1-7", octave),
                            note.input_line_number,
                        );
                        return;
                    }
                };
                let accidental = self.accidental_for(note);
                let octave_mark_needed = self.octave_mark_needed(*step, i32::from(*octave));
                BsrNote {
                    input_line_number: note.input_line_number,
                    value,
                    dots: note.dots,
                    accidental,
                    octave: octave_kind,
                    octave_mark_needed,
                }
            }
            MsrNoteContent::Rest => {
                let value = match BsrNoteValueKind::from_rest(note.graphic_duration) {
                    Some(value) => value,
                    None => {
                        self.add_skipped(
                            "rest",
                            &format!(
                                "{} duration has no braille shape",
                                note.graphic_duration.as_str()
                            ),
                            note.input_line_number,
                        );
                        return;
                    }
                };
                BsrNote {
                    input_line_number: note.input_line_number,
                    value,
                    dots: note.dots,
                    accidental: BsrAccidentalKind::None,
                    octave: BsrOctaveKind::None,
                    octave_mark_needed: false,
                }
            }
        };

        self.ensure_open(open, space_emitted, msr_measure)
            .append_element(BsrMeasureElement::Note(sign));

        if !self.config.no_braille_lyrics {
            for syllable in &note.syllables {
                self.ensure_open(open, space_emitted, msr_measure)
                    .append_element(BsrMeasureElement::Words(BsrWords {
                        input_line_number: note.input_line_number,
                        text: syllable.clone(),
                    }));
            }
        }
    }

    fn accidental_for(&mut self, note: &MsrNote) -> BsrAccidentalKind {
        match note.accidental {
            MsrAccidentalKind::None => BsrAccidentalKind::None,
            MsrAccidentalKind::Sharp => BsrAccidentalKind::Sharp,
            MsrAccidentalKind::Flat => BsrAccidentalKind::Flat,
            MsrAccidentalKind::Natural => BsrAccidentalKind::Natural,
            MsrAccidentalKind::DoubleSharp => BsrAccidentalKind::DoubleSharp,
            MsrAccidentalKind::DoubleFlat => BsrAccidentalKind::DoubleFlat,
            MsrAccidentalKind::Other => {
                self.add_skipped(
                    "accidental",
                    "accidental glyph has no braille sign; note kept without it",
                    note.input_line_number,
                );
                BsrAccidentalKind::None
            }
        }
    }

    /// Octave mark rule: a line's first note is always marked; after
    /// that, seconds and thirds never are, fourths and fifths only when
    /// the octave changes, sixths and wider always.
    fn octave_mark_needed(&mut self, step: MsrDiatonicStep, octave: i32) -> bool {
        let position = diatonic_position(step, octave);
        let needed = match self.previous_note {
            None => true,
            Some(previous) => {
                let interval = (position - previous).abs();
                if interval <= 2 {
                    false
                } else if interval <= 4 {
                    position / 7 != previous / 7
                } else {
                    true
                }
            }
        };
        self.previous_note = Some(position);
        needed
    }

    /// Opens the braille measure on first use, emitting the fixed
    /// one-cell space every measure leads with.
    fn ensure_open<'m>(
        &mut self,
        open: &'m mut Option<BsrMeasure>,
        space_emitted: &mut bool,
        msr_measure: &MsrMeasure,
    ) -> &'m mut BsrMeasure {
        if !*space_emitted {
            let input_line_number = msr_measure.input_line_number;
            self.current_line_mut()
                .append_element(BsrLineElement::Space(BsrSpaces {
                    input_line_number,
                    count: 1,
                }));
            *space_emitted = true;
        }
        open.get_or_insert_with(|| {
            BsrMeasure::new(&msr_measure.number, msr_measure.input_line_number)
        })
    }

    fn close_measure(&mut self, open: &mut Option<BsrMeasure>) {
        if let Some(measure) = open.take() {
            self.current_line_mut()
                .append_element(BsrLineElement::Measure(measure));
        }
    }
}

/// Source clef to braille clef. Kinds braille cannot express map to the
/// sentinel, which the caller turns into an omission.
fn clef_kind_for(kind: MsrClefKind) -> BsrClefKind {
    match kind {
        MsrClefKind::Treble => BsrClefKind::GTreble,
        MsrClefKind::TrebleLine1 => BsrClefKind::GSoprano,
        MsrClefKind::TreblePlus8 => BsrClefKind::GOttavaAlta,
        MsrClefKind::TrebleMinus8 => BsrClefKind::GOttavaBassa,
        MsrClefKind::Bass => BsrClefKind::FBass,
        MsrClefKind::BassPlus8 => BsrClefKind::ModifiedBassForRightHandPart,
        MsrClefKind::BassMinus8 => BsrClefKind::ModifiedTrebleForLeftHandPart,
        MsrClefKind::Tenor => BsrClefKind::CTenor,
        MsrClefKind::Baritone | MsrClefKind::VarBaritone => BsrClefKind::FBaritone,
        MsrClefKind::TreblePlus15
        | MsrClefKind::TrebleMinus15
        | MsrClefKind::BassPlus15
        | MsrClefKind::BassMinus15
        | MsrClefKind::Soprano
        | MsrClefKind::MezzoSoprano
        | MsrClefKind::Alto
        | MsrClefKind::Percussion
        | MsrClefKind::Tablature
        | MsrClefKind::Jianpu => BsrClefKind::None,
    }
}

/// Closed-form circle-of-fifths lookup: tonic and mode to the signature's
/// accidental family and count. Signatures needing more than seven
/// alterations are theoretical and have no entry.
fn key_signature(
    tonic_step: MsrDiatonicStep,
    tonic_alteration: i8,
    mode: MsrModeKind,
) -> Option<(BsrKeyKind, u8)> {
    let natural_fifths = match tonic_step {
        MsrDiatonicStep::C => 0,
        MsrDiatonicStep::D => 2,
        MsrDiatonicStep::E => 4,
        MsrDiatonicStep::F => -1,
        MsrDiatonicStep::G => 1,
        MsrDiatonicStep::A => 3,
        MsrDiatonicStep::B => 5,
    };
    let mode_offset = match mode {
        MsrModeKind::Major | MsrModeKind::Ionian => 0,
        MsrModeKind::Lydian => 1,
        MsrModeKind::Mixolydian => -1,
        MsrModeKind::Dorian => -2,
        MsrModeKind::Minor | MsrModeKind::Aeolian => -3,
        MsrModeKind::Phrygian => -4,
        MsrModeKind::Locrian => -5,
    };
    // Raising the tonic a semitone adds seven fifths (C to C-sharp goes
    // from 0 sharps to 7).
    let fifths = natural_fifths + 7 * i32::from(tonic_alteration) + mode_offset;
    if fifths == 0 {
        Some((BsrKeyKind::Naturals, 0))
    } else if fifths.abs() > 7 {
        None
    } else if fifths > 0 {
        Some((BsrKeyKind::Sharps, fifths as u8))
    } else {
        Some((BsrKeyKind::Flats, (-fifths) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msr::{
        MsrBarline, MsrClef, MsrDynamic, MsrKey, MsrLineBreak, MsrPageBreak, MsrPart,
        MsrPartGroup, MsrStaff, MsrTime, MsrVoice, MsrWords,
    };

    fn score_with_elements(elements: Vec<MsrElement>) -> MsrScore {
        let mut score = MsrScore::new(Some("Test"));
        let group = score.append_part_group(MsrPartGroup::new(None));
        let part = group.append_part(MsrPart::new("P1", None));
        let staff = part.append_staff(MsrStaff::new(1));
        let voice = staff.append_voice(MsrVoice::new(1));
        let measure = voice.append_measure(MsrMeasure::new("1", 1));
        for element in elements {
            measure.append_element(element);
        }
        score
    }

    fn config() -> BrailleConfig {
        BrailleConfig::default()
    }

    fn first_measure(score: &BsrScore) -> &BsrMeasure {
        for element in &score.pages[0].lines[0].elements {
            if let BsrLineElement::Measure(measure) = element {
                return measure;
            }
        }
        panic!("no measure on the first line");
    }

    fn quarter(step: MsrDiatonicStep, octave: i8) -> MsrElement {
        MsrElement::Note(MsrNote::pitched(
            1,
            step,
            octave,
            crate::msr::MsrDurationKind::Quarter,
        ))
    }

    #[test]
    fn test_build_seeds_one_page_one_line() {
        let result = build_bsr_score(&score_with_elements(vec![]), &config());
        assert_eq!(result.score.pages.len(), 1);
        assert_eq!(result.score.pages[0].lines.len(), 1);
        assert_eq!(result.score.line_width_limit, None, "still unconstrained");
    }

    #[test]
    fn test_measure_leads_with_one_space() {
        let result = build_bsr_score(&score_with_elements(vec![]), &config());
        let line = &result.score.pages[0].lines[0];
        assert_eq!(line.elements.len(), 2, "space then measure");
        match &line.elements[0] {
            BsrLineElement::Space(spaces) => assert_eq!(spaces.count, 1),
            other => panic!("expected the leading space, got {:?}", other),
        }
        assert!(matches!(&line.elements[1], BsrLineElement::Measure(_)));
    }

    #[test]
    fn test_percussion_clef_is_absent_not_a_sentinel_node() {
        let mut cfg = config();
        cfg.include_clefs = true;
        let msr = score_with_elements(vec![
            MsrElement::Clef(MsrClef {
                input_line_number: 3,
                kind: MsrClefKind::Percussion,
            }),
            quarter(MsrDiatonicStep::C, 4),
        ]);
        let result = build_bsr_score(&msr, &cfg);
        let measure = first_measure(&result.score);
        assert!(
            measure
                .elements
                .iter()
                .all(|e| !matches!(e, BsrMeasureElement::Clef(_))),
            "the unsupported clef must not appear in any form"
        );
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].element, "clef");
        assert_eq!(result.skipped[0].input_line_number, 3);
    }

    #[test]
    fn test_clefs_are_suppressed_entirely_by_default() {
        let msr = score_with_elements(vec![MsrElement::Clef(MsrClef {
            input_line_number: 1,
            kind: MsrClefKind::Treble,
        })]);
        let result = build_bsr_score(&msr, &config());
        assert!(first_measure(&result.score).elements.is_empty());
        assert!(
            result.skipped.is_empty(),
            "a configured suppression is not a fidelity loss"
        );
    }

    #[test]
    fn test_key_signature_circle_of_fifths() {
        use MsrDiatonicStep as S;
        use MsrModeKind as M;
        assert_eq!(
            key_signature(S::C, 0, M::Major),
            Some((BsrKeyKind::Naturals, 0))
        );
        assert_eq!(
            key_signature(S::G, 0, M::Major),
            Some((BsrKeyKind::Sharps, 1))
        );
        assert_eq!(
            key_signature(S::F, 0, M::Major),
            Some((BsrKeyKind::Flats, 1))
        );
        assert_eq!(
            key_signature(S::A, 0, M::Minor),
            Some((BsrKeyKind::Naturals, 0))
        );
        assert_eq!(
            key_signature(S::C, -1, M::Major),
            Some((BsrKeyKind::Flats, 7)),
            "C-flat major sits at the flat edge of the circle"
        );
        assert_eq!(
            key_signature(S::G, 1, M::Major),
            None,
            "G-sharp major would need eight sharps"
        );
        assert_eq!(
            key_signature(S::D, 0, M::Dorian),
            Some((BsrKeyKind::Naturals, 0))
        );
        assert_eq!(
            key_signature(S::F, 0, M::Lydian),
            Some((BsrKeyKind::Naturals, 0))
        );
    }

    #[test]
    fn test_octave_marks_follow_the_interval_rule() {
        let msr = score_with_elements(vec![
            quarter(MsrDiatonicStep::C, 4), // first of line: marked
            quarter(MsrDiatonicStep::E, 4), // third up: unmarked
            quarter(MsrDiatonicStep::A, 4), // fourth up, same octave: unmarked
            quarter(MsrDiatonicStep::D, 5), // fourth up, octave change: marked
            quarter(MsrDiatonicStep::B, 5), // sixth up: marked
        ]);
        let result = build_bsr_score(&msr, &config());
        let marks: Vec<bool> = first_measure(&result.score)
            .elements
            .iter()
            .filter_map(|e| match e {
                BsrMeasureElement::Note(note) => Some(note.octave_mark_needed),
                _ => None,
            })
            .collect();
        assert_eq!(marks, vec![true, false, false, true, true]);
    }

    #[test]
    fn test_rests_neither_take_nor_reset_octave_context() {
        let msr = score_with_elements(vec![
            quarter(MsrDiatonicStep::C, 4),
            MsrElement::Note(MsrNote::rest(1, crate::msr::MsrDurationKind::Quarter)),
            quarter(MsrDiatonicStep::D, 4), // second from the C, despite the rest between
        ]);
        let result = build_bsr_score(&msr, &config());
        let notes: Vec<&BsrNote> = first_measure(&result.score)
            .elements
            .iter()
            .filter_map(|e| match e {
                BsrMeasureElement::Note(note) => Some(note),
                _ => None,
            })
            .collect();
        assert_eq!(notes.len(), 3);
        assert!(!notes[1].octave_mark_needed, "rests are never marked");
        assert!(!notes[2].octave_mark_needed, "interval measured across the rest");
    }

    #[test]
    fn test_line_break_starts_a_new_line_and_resets_marks() {
        let msr = score_with_elements(vec![
            quarter(MsrDiatonicStep::C, 4),
            MsrElement::LineBreak(MsrLineBreak {
                input_line_number: 2,
            }),
            quarter(MsrDiatonicStep::D, 4),
        ]);
        let result = build_bsr_score(&msr, &config());
        let page = &result.score.pages[0];
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.lines[1].print_line_number, 2);
        let second_line_note = page.lines[1]
            .elements
            .iter()
            .find_map(|e| match e {
                BsrLineElement::Measure(m) => m.elements.iter().find_map(|s| match s {
                    BsrMeasureElement::Note(n) => Some(n),
                    _ => None,
                }),
                _ => None,
            })
            .expect("a note on the second line");
        assert!(
            second_line_note.octave_mark_needed,
            "a line's first note is always marked, even a step apart"
        );
    }

    #[test]
    fn test_page_break_opens_numbered_page() {
        let msr = score_with_elements(vec![
            quarter(MsrDiatonicStep::C, 4),
            MsrElement::PageBreak(MsrPageBreak {
                input_line_number: 9,
            }),
            quarter(MsrDiatonicStep::D, 4),
        ]);
        let result = build_bsr_score(&msr, &config());
        assert_eq!(result.score.pages.len(), 2);
        let second = &result.score.pages[1];
        assert_eq!(second.print_page_number, 2);
        match &second.lines[0].elements[0] {
            BsrLineElement::Number(number) => assert_eq!(number.value, 2),
            other => panic!("expected the page number to open page 2, got {:?}", other),
        }
    }

    #[test]
    fn test_unmapped_duration_is_reported() {
        let msr = score_with_elements(vec![MsrElement::Note(MsrNote::pitched(
            7,
            MsrDiatonicStep::C,
            4,
            crate::msr::MsrDurationKind::Long,
        ))]);
        let result = build_bsr_score(&msr, &config());
        assert!(first_measure(&result.score).elements.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].element, "note");
        assert_eq!(result.skipped[0].measure_number.as_deref(), Some("1"));
    }

    #[test]
    fn test_lyrics_follow_their_note_unless_suppressed() {
        let note = MsrNote::pitched(1, MsrDiatonicStep::C, 4, crate::msr::MsrDurationKind::Quarter)
            .with_syllable("la");
        let msr = score_with_elements(vec![MsrElement::Note(note.clone())]);

        let with_lyrics = build_bsr_score(&msr, &config());
        assert!(first_measure(&with_lyrics.score)
            .elements
            .iter()
            .any(|e| matches!(e, BsrMeasureElement::Words(_))));

        let mut cfg = config();
        cfg.no_braille_lyrics = true;
        let without = build_bsr_score(&msr, &cfg);
        assert!(first_measure(&without.score)
            .elements
            .iter()
            .all(|e| !matches!(e, BsrMeasureElement::Words(_))));
    }

    #[test]
    fn test_supplementary_signs_translate() {
        let msr = score_with_elements(vec![
            MsrElement::Key(MsrKey {
                input_line_number: 1,
                kind: MsrKeyKind::Traditional {
                    tonic_step: MsrDiatonicStep::D,
                    tonic_alteration: 0,
                    mode: MsrModeKind::Major,
                },
            }),
            MsrElement::Time(MsrTime {
                input_line_number: 1,
                kind: MsrTimeKind::CutTime,
            }),
            MsrElement::Dynamic(MsrDynamic {
                input_line_number: 1,
                kind: MsrDynamicKind::MF,
            }),
            MsrElement::Words(MsrWords {
                input_line_number: 1,
                text: "dolce".to_string(),
            }),
            MsrElement::Barline(MsrBarline {
                input_line_number: 1,
                kind: MsrBarlineKind::LightHeavy,
            }),
        ]);
        let result = build_bsr_score(&msr, &config());
        let kinds: Vec<&'static str> = first_measure(&result.score)
            .elements
            .iter()
            .map(|e| match e {
                BsrMeasureElement::Clef(_) => "clef",
                BsrMeasureElement::Key(_) => "key",
                BsrMeasureElement::Time(_) => "time",
                BsrMeasureElement::Note(_) => "note",
                BsrMeasureElement::Barline(_) => "barline",
                BsrMeasureElement::Dynamic(_) => "dynamic",
                BsrMeasureElement::Words(_) => "words",
            })
            .collect();
        assert_eq!(kinds, vec!["key", "time", "dynamic", "words", "barline"]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_regular_barline_is_neither_engraved_nor_reported() {
        let msr = score_with_elements(vec![MsrElement::Barline(MsrBarline {
            input_line_number: 1,
            kind: MsrBarlineKind::Regular,
        })]);
        let result = build_bsr_score(&msr, &config());
        assert!(first_measure(&result.score).elements.is_empty());
        assert!(result.skipped.is_empty());
    }
}
