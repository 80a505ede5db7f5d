//! Structural nodes of the braille score: score, pages and lines.
//!
//! ```text
//!   BsrScore
//!     ├── MsrSummary            captured source facts, for reports
//!     ├── BsrTranscriptionNotes free text for transcribers
//!     └── BsrPage*
//!           └── BsrLine*
//!                 └── BsrLineElement*
//! ```
//!
//! One tree instance belongs to exactly one pipeline stage at a time: the
//! builder creates it, the refiner reads it and builds a replacement, the
//! code generator only reads. Capacity fields are `None` while a tree is
//! still unconstrained and carry the configured caps once refined.

use serde::{Deserialize, Serialize};

use super::elements::BsrLineElement;
use crate::msr::MsrScore;

/// Facts about the source score, captured by value when the braille tree
/// is built so reports need no live link back to the source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrSummary {
    pub work_title: Option<String>,
    pub part_count: usize,
    pub measure_count: usize,
}

impl MsrSummary {
    pub fn of(score: &MsrScore) -> MsrSummary {
        MsrSummary {
            work_title: score.work_title.clone(),
            part_count: score.part_count(),
            measure_count: score.measure_count(),
        }
    }
}

/// Free-text annotations for braille transcribers; append-only, attached
/// once at score level and never engraved as music.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BsrTranscriptionNotes {
    pub lines: Vec<String>,
}

impl BsrTranscriptionNotes {
    pub fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrScore {
    pub msr_summary: MsrSummary,
    /// Cap on line width in cells; `None` until the refiner has run.
    pub line_width_limit: Option<usize>,
    /// Cap on lines per page; `None` until the refiner has run.
    pub page_height_limit: Option<usize>,
    pub transcription_notes: Option<BsrTranscriptionNotes>,
    pub pages: Vec<BsrPage>,
}

impl BsrScore {
    pub fn new(msr_summary: MsrSummary) -> BsrScore {
        BsrScore {
            msr_summary,
            line_width_limit: None,
            page_height_limit: None,
            transcription_notes: None,
            pages: Vec::new(),
        }
    }

    pub fn append_page(&mut self, page: BsrPage) -> &mut BsrPage {
        self.pages.push(page);
        self.pages.last_mut().unwrap()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrPage {
    /// 1-based physical page number of the braille output.
    pub print_page_number: usize,
    pub max_lines: Option<usize>,
    pub lines: Vec<BsrLine>,
}

impl BsrPage {
    pub fn new(print_page_number: usize) -> BsrPage {
        BsrPage {
            print_page_number,
            max_lines: None,
            lines: Vec::new(),
        }
    }

    pub fn append_line(&mut self, line: BsrLine) -> &mut BsrLine {
        self.lines.push(line);
        self.lines.last_mut().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BsrLine {
    /// 1-based line number, counted across the whole score.
    pub print_line_number: usize,
    pub max_cells: Option<usize>,
    pub elements: Vec<BsrLineElement>,
}

impl BsrLine {
    pub fn new(print_line_number: usize) -> BsrLine {
        BsrLine {
            print_line_number,
            max_cells: None,
            elements: Vec::new(),
        }
    }

    pub fn append_element(&mut self, element: BsrLineElement) {
        self.elements.push(element);
    }

    /// Total engraved width of the line.
    pub fn width_in_cells(&self) -> usize {
        self.elements.iter().map(|e| e.width_in_cells()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsr::elements::BsrSpaces;

    fn empty_summary() -> MsrSummary {
        MsrSummary {
            work_title: None,
            part_count: 0,
            measure_count: 0,
        }
    }

    #[test]
    fn test_new_score_is_unconstrained() {
        let score = BsrScore::new(empty_summary());
        assert_eq!(score.line_width_limit, None);
        assert_eq!(score.page_height_limit, None);
        assert!(score.pages.is_empty());
    }

    #[test]
    fn test_line_width_sums_element_widths() {
        let mut line = BsrLine::new(1);
        line.append_element(BsrLineElement::Space(BsrSpaces {
            input_line_number: 0,
            count: 3,
        }));
        line.append_element(BsrLineElement::Space(BsrSpaces {
            input_line_number: 0,
            count: 2,
        }));
        assert_eq!(line.width_in_cells(), 5);
    }

    #[test]
    fn test_line_count_spans_pages() {
        let mut score = BsrScore::new(empty_summary());
        let page = score.append_page(BsrPage::new(1));
        page.append_line(BsrLine::new(1));
        page.append_line(BsrLine::new(2));
        let page2 = score.append_page(BsrPage::new(2));
        page2.append_line(BsrLine::new(3));
        assert_eq!(score.line_count(), 3);
    }
}
