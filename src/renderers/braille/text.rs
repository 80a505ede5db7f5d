//! Inspection views of the braille score: an indented text rendition for
//! terminals and logs, and a JSON rendition for tooling.
//!
//! The text view prints one summary row per line followed by the line's
//! cells as Unicode braille, so a sighted reader can eyeball the layout
//! without decoding bytes.

use crate::braille::{cells_to_string, BrailleCell};
use crate::bsr::elements::{BsrLineElement, BsrMeasureElement};
use crate::bsr::score::{BsrLine, BsrScore};

/// Renders the whole score as indented text.
pub fn bsr_as_text(score: &BsrScore) -> String {
    let mut out = String::new();
    let summary = &score.msr_summary;
    out.push_str(&format!(
        "braille score: {} ({} part(s), {} source measure(s))\n",
        summary.work_title.as_deref().unwrap_or("[untitled]"),
        summary.part_count,
        summary.measure_count
    ));
    match (score.line_width_limit, score.page_height_limit) {
        (Some(cells), Some(lines)) => {
            out.push_str(&format!(
                "limits: {} cells per line, {} lines per page\n",
                cells, lines
            ));
        }
        _ => out.push_str("limits: none (not yet refined)\n"),
    }
    if let Some(notes) = &score.transcription_notes {
        for note in &notes.lines {
            out.push_str(&format!("transcription note: {}\n", note));
        }
    }
    for page in &score.pages {
        out.push_str(&format!(
            "page {} ({} line(s))\n",
            page.print_page_number,
            page.lines.len()
        ));
        for line in &page.lines {
            let summaries: Vec<String> =
                line.elements.iter().map(line_element_summary).collect();
            out.push_str(&format!(
                "  line {} ({} cell(s)): {}\n",
                line.print_line_number,
                line.width_in_cells(),
                summaries.join(" ")
            ));
            out.push_str(&format!("    {}\n", cells_to_string(&line_cells(line))));
        }
    }
    out
}

/// Renders the whole score as pretty-printed JSON.
pub fn bsr_as_json(score: &BsrScore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(score)
}

fn line_element_summary(element: &BsrLineElement) -> String {
    match element {
        BsrLineElement::Measure(measure) => {
            let tags: Vec<&str> = measure.elements.iter().map(measure_element_tag).collect();
            format!("measure[{}]{{{}}}", measure.print_measure_number, tags.join(" "))
        }
        BsrLineElement::Number(number) => format!("number({})", number.value),
        BsrLineElement::Clef(_) => "clef".to_string(),
        BsrLineElement::Key(key) => format!("key({:?}x{})", key.kind, key.alteration_count),
        BsrLineElement::Time(_) => "time".to_string(),
        BsrLineElement::Space(spaces) => format!("space({})", spaces.count),
    }
}

fn measure_element_tag(element: &BsrMeasureElement) -> &'static str {
    match element {
        BsrMeasureElement::Clef(_) => "clef",
        BsrMeasureElement::Key(_) => "key",
        BsrMeasureElement::Time(_) => "time",
        BsrMeasureElement::Note(note) if note.value.is_rest() => "rest",
        BsrMeasureElement::Note(_) => "note",
        BsrMeasureElement::Barline(_) => "barline",
        BsrMeasureElement::Dynamic(_) => "dynamic",
        BsrMeasureElement::Words(_) => "words",
    }
}

/// All of the line's cells in engraving order.
fn line_cells(line: &BsrLine) -> Vec<BrailleCell> {
    let mut cells = Vec::new();
    for element in &line.elements {
        match element {
            BsrLineElement::Measure(measure) => {
                for sign in &measure.elements {
                    cells.extend(sign.cells());
                }
            }
            BsrLineElement::Number(e) => cells.extend(e.cells()),
            BsrLineElement::Clef(e) => cells.extend(e.cells()),
            BsrLineElement::Key(e) => cells.extend(e.cells()),
            BsrLineElement::Time(e) => cells.extend(e.cells()),
            BsrLineElement::Space(e) => cells.extend(e.cells()),
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsr::elements::{
        BsrAccidentalKind, BsrMeasure, BsrNote, BsrNoteValueKind, BsrOctaveKind, BsrSpaces,
    };
    use crate::bsr::score::{BsrPage, MsrSummary};

    fn small_score() -> BsrScore {
        let mut score = BsrScore::new(MsrSummary {
            work_title: Some("Prelude".to_string()),
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
            value: BsrNoteValueKind::CQuarter,
            dots: 0,
            accidental: BsrAccidentalKind::None,
            octave: BsrOctaveKind::Octave4,
            octave_mark_needed: true,
        }));
        line.append_element(BsrLineElement::Measure(measure));
        score
    }

    #[test]
    fn test_text_view_names_title_pages_and_lines() {
        let text = bsr_as_text(&small_score());
        assert!(text.contains("braille score: Prelude"));
        assert!(text.contains("page 1 (1 line(s))"));
        assert!(text.contains("line 1 (3 cell(s)): space(1) measure[1]{note}"));
    }

    #[test]
    fn test_text_view_shows_the_cells_as_unicode_braille() {
        let text = bsr_as_text(&small_score());
        // blank, dot-5 octave mark, quarter C
        assert!(text.contains("\u{2800}\u{2810}\u{2839}"));
    }

    #[test]
    fn test_unrefined_scores_say_so() {
        let text = bsr_as_text(&small_score());
        assert!(text.contains("limits: none (not yet refined)"));
    }

    #[test]
    fn test_json_view_round_trips() {
        let score = small_score();
        let json = bsr_as_json(&score).unwrap();
        let back: BsrScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }
}
