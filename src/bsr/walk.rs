//! Traversal over the braille score tree.
//!
//! The node set is closed, so traversal is one exhaustive-match walk
//! driving a callback trait. Consumers implement the hooks they care
//! about; enter/leave pairs preserve the pre-order/post-order structure
//! the structural passes rely on.

use serde::{Deserialize, Serialize};

use super::elements::{BsrLineElement, BsrMeasure, BsrMeasureElement, BsrNumber, BsrSpaces};
use super::score::{BsrLine, BsrPage, BsrScore};

/// Read-only visitor over a braille score. All hooks default to no-ops.
pub trait BsrVisitor {
    fn enter_page(&mut self, _page: &BsrPage) {}
    fn leave_page(&mut self, _page: &BsrPage) {}
    fn enter_line(&mut self, _line: &BsrLine) {}
    fn leave_line(&mut self, _line: &BsrLine) {}
    fn enter_measure(&mut self, _measure: &BsrMeasure) {}
    fn leave_measure(&mut self, _measure: &BsrMeasure) {}
    /// A line element other than a measure.
    fn visit_line_element(&mut self, _element: &BsrLineElement) {}
    fn visit_measure_element(&mut self, _element: &BsrMeasureElement) {}
}

/// Walks the whole tree in document order.
pub fn walk_score(score: &BsrScore, visitor: &mut impl BsrVisitor) {
    for page in &score.pages {
        visitor.enter_page(page);
        for line in &page.lines {
            visitor.enter_line(line);
            for element in &line.elements {
                match element {
                    BsrLineElement::Measure(measure) => {
                        visitor.enter_measure(measure);
                        for sign in &measure.elements {
                            visitor.visit_measure_element(sign);
                        }
                        visitor.leave_measure(measure);
                    }
                    other => visitor.visit_line_element(other),
                }
            }
            visitor.leave_line(line);
        }
        visitor.leave_page(page);
    }
}

/// One sign in the flattened left-to-right, top-to-bottom reading of a
/// score, stripped of layout only (the octave-mark flag, which depends on
/// where a note landed, is cleared; everything musical is kept).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BsrSign {
    Space(BsrSpaces),
    Number(BsrNumber),
    MeasureSign(BsrMeasureElement),
}

/// Flattens a score into its ordered sign sequence.
///
/// Two trees that reflow the same music produce the same sequence here,
/// which is what makes the refiner's order preservation checkable.
pub fn sign_sequence(score: &BsrScore) -> Vec<BsrSign> {
    struct Collector {
        signs: Vec<BsrSign>,
    }

    impl BsrVisitor for Collector {
        fn visit_line_element(&mut self, element: &BsrLineElement) {
            match element {
                BsrLineElement::Space(spaces) => {
                    self.signs.push(BsrSign::Space(spaces.clone()));
                }
                BsrLineElement::Number(number) => {
                    self.signs.push(BsrSign::Number(number.clone()));
                }
                BsrLineElement::Clef(clef) => self
                    .signs
                    .push(BsrSign::MeasureSign(BsrMeasureElement::Clef(clef.clone()))),
                BsrLineElement::Key(key) => self
                    .signs
                    .push(BsrSign::MeasureSign(BsrMeasureElement::Key(key.clone()))),
                BsrLineElement::Time(time) => self
                    .signs
                    .push(BsrSign::MeasureSign(BsrMeasureElement::Time(time.clone()))),
                BsrLineElement::Measure(_) => {}
            }
        }

        fn visit_measure_element(&mut self, element: &BsrMeasureElement) {
            let mut sign = element.clone();
            if let BsrMeasureElement::Note(note) = &mut sign {
                note.octave_mark_needed = false;
            }
            self.signs.push(BsrSign::MeasureSign(sign));
        }
    }

    let mut collector = Collector { signs: Vec::new() };
    walk_score(score, &mut collector);
    collector.signs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsr::elements::{
        BsrAccidentalKind, BsrLineElement, BsrNote, BsrNoteValueKind, BsrOctaveKind,
    };
    use crate::bsr::score::MsrSummary;

    fn tiny_score() -> BsrScore {
        let mut score = BsrScore::new(MsrSummary {
            work_title: None,
            part_count: 1,
            measure_count: 1,
        });
        let page = score.append_page(BsrPage::new(1));
        let line = page.append_line(BsrLine::new(1));
        line.append_element(BsrLineElement::Space(BsrSpaces {
            input_line_number: 1,
            count: 1,
        }));
        let mut measure = BsrMeasure::new("1", 1);
        measure.append_element(BsrMeasureElement::Note(BsrNote {
            input_line_number: 1,
            value: BsrNoteValueKind::DQuarter,
            dots: 0,
            accidental: BsrAccidentalKind::None,
            octave: BsrOctaveKind::Octave4,
            octave_mark_needed: true,
        }));
        line.append_element(BsrLineElement::Measure(measure));
        score
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        struct Trace(Vec<&'static str>);
        impl BsrVisitor for Trace {
            fn enter_page(&mut self, _page: &BsrPage) {
                self.0.push("page+");
            }
            fn leave_page(&mut self, _page: &BsrPage) {
                self.0.push("page-");
            }
            fn enter_line(&mut self, _line: &BsrLine) {
                self.0.push("line+");
            }
            fn leave_line(&mut self, _line: &BsrLine) {
                self.0.push("line-");
            }
            fn enter_measure(&mut self, _measure: &BsrMeasure) {
                self.0.push("measure+");
            }
            fn leave_measure(&mut self, _measure: &BsrMeasure) {
                self.0.push("measure-");
            }
            fn visit_line_element(&mut self, _element: &BsrLineElement) {
                self.0.push("space");
            }
            fn visit_measure_element(&mut self, _element: &BsrMeasureElement) {
                self.0.push("sign");
            }
        }

        let mut trace = Trace(Vec::new());
        walk_score(&tiny_score(), &mut trace);
        assert_eq!(
            trace.0,
            vec![
                "page+", "line+", "space", "measure+", "sign", "measure-", "line-", "page-"
            ]
        );
    }

    #[test]
    fn test_sign_sequence_clears_octave_mark_flags() {
        let signs = sign_sequence(&tiny_score());
        assert_eq!(signs.len(), 2);
        match &signs[1] {
            BsrSign::MeasureSign(BsrMeasureElement::Note(note)) => {
                assert!(!note.octave_mark_needed, "flattened notes drop layout state");
                assert_eq!(note.octave, BsrOctaveKind::Octave4, "the register is kept");
            }
            other => panic!("expected a note, got {:?}", other),
        }
    }
}
