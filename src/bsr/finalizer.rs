//! Second transformation stage: reflowing an unconstrained braille score
//! into embosser-ready lines and pages.
//!
//! ```text
//!   unconstrained (builder output)      refined (capacities enforced)
//!
//!   page 1
//!     line 1 [########################]   page 1
//!     line 2 [######]              -->      line 1 [##########]
//!   page 2                                  line 2 [##########]
//!     line 3 [####]                         line 3 [####]
//!                                           line 4 [######]
//!                                         page 2
//!                                           line 5 [####]
//! ```
//!
//! The refiner walks the input tree sign by sign and accumulates output
//! lines against `cells_per_line`. A sign that would overflow moves to a
//! fresh line together with the rest of its measure; the measure node is
//! split in two, both halves sharing one print number, so no sign is ever
//! divided. Full pages rotate the same way against `lines_per_page`.
//! Breaks already present in the input stay hard breaks. The input tree
//! is never modified; running the refiner on its own output reproduces
//! that output unchanged.

use std::mem;

use crate::bsr::elements::{BsrLineElement, BsrMeasure, BsrMeasureElement};
use crate::bsr::score::{BsrLine, BsrPage, BsrScore};
use crate::config::BrailleConfig;
use crate::errors::{ConfigError, TranslationError};

/// Reflows `score` into a new tree that honors the configured line and
/// page capacities. With `facsimile` set, the layout is copied verbatim
/// and only the score-level limits are recorded.
pub fn finalize_bsr_score(
    score: &BsrScore,
    config: &BrailleConfig,
) -> Result<BsrScore, TranslationError> {
    if config.cells_per_line == 0 {
        return Err(ConfigError::NonPositiveCapacity {
            option: "cells_per_line",
            value: config.cells_per_line,
        }
        .into());
    }
    if config.lines_per_page == 0 {
        return Err(ConfigError::NonPositiveCapacity {
            option: "lines_per_page",
            value: config.lines_per_page,
        }
        .into());
    }

    if config.facsimile {
        return Ok(facsimile_copy(score, config));
    }

    let mut refiner = Refiner::new(score, config);
    for (page_index, page) in score.pages.iter().enumerate() {
        if page_index > 0 {
            refiner.take_page_break();
        }
        for (line_index, line) in page.lines.iter().enumerate() {
            if line_index > 0 {
                refiner.take_line_break();
            }
            for element in &line.elements {
                match element {
                    BsrLineElement::Measure(measure) => refiner.reflow_measure(measure)?,
                    other => refiner.place_line_sign(other.clone())?,
                }
            }
        }
    }
    let refined = refiner.finish();
    log::debug!(
        "refined braille score: {} page(s), {} line(s)",
        refined.pages.len(),
        refined.line_count()
    );
    Ok(refined)
}

/// Facsimile mode: the builder's layout is kept as-is, line and page
/// overflow included. Only the score records the configured limits.
fn facsimile_copy(score: &BsrScore, config: &BrailleConfig) -> BsrScore {
    let mut copy = score.clone();
    copy.line_width_limit = Some(config.cells_per_line);
    copy.page_height_limit = Some(config.lines_per_page);
    copy
}

/// Accumulator for the reflow. `line` and `page` are the nodes currently
/// being filled; they join the output tree once full or once the input
/// dictates a hard break.
struct Refiner {
    cells_per_line: usize,
    lines_per_page: usize,
    score: BsrScore,
    page: BsrPage,
    line: BsrLine,
    cells_used: usize,
    line_has_note: bool,
    next_line_number: usize,
}

impl Refiner {
    fn new(source: &BsrScore, config: &BrailleConfig) -> Refiner {
        let mut score = BsrScore::new(source.msr_summary.clone());
        score.line_width_limit = Some(config.cells_per_line);
        score.page_height_limit = Some(config.lines_per_page);
        score.transcription_notes = source.transcription_notes.clone();

        let mut page = BsrPage::new(1);
        page.max_lines = Some(config.lines_per_page);
        let mut line = BsrLine::new(1);
        line.max_cells = Some(config.cells_per_line);

        Refiner {
            cells_per_line: config.cells_per_line,
            lines_per_page: config.lines_per_page,
            score,
            page,
            line,
            cells_used: 0,
            line_has_note: false,
            next_line_number: 2,
        }
    }

    /// Places a line-level sign, wrapping to a fresh line when the open
    /// one cannot take it.
    fn place_line_sign(&mut self, element: BsrLineElement) -> Result<(), TranslationError> {
        let width = element.width_in_cells();
        if self.cells_used + width > self.cells_per_line && self.cells_used > 0 {
            self.flush_line();
        }
        if width > self.cells_per_line {
            return Err(ConfigError::SignExceedsLineCapacity {
                width,
                capacity: self.cells_per_line,
                input_line_number: element.input_line_number(),
            }
            .into());
        }
        self.cells_used += width;
        self.line.append_element(element);
        Ok(())
    }

    /// Replays one input measure into the open line, splitting it into
    /// continuation nodes wherever the line fills up.
    fn reflow_measure(&mut self, source: &BsrMeasure) -> Result<(), TranslationError> {
        let mut open = BsrMeasure::new(&source.print_measure_number, source.input_line_number);
        for element in &source.elements {
            let mut sign = element.clone();
            self.mark_if_line_opener(&mut sign);
            let mut width = sign.width_in_cells();
            if self.cells_used + width > self.cells_per_line && self.cells_used > 0 {
                self.wrap_measure(&mut open, source);
                // The fresh line may promote this sign to line opener,
                // which can change its width.
                self.mark_if_line_opener(&mut sign);
                width = sign.width_in_cells();
            }
            if width > self.cells_per_line {
                return Err(ConfigError::SignExceedsLineCapacity {
                    width,
                    capacity: self.cells_per_line,
                    input_line_number: sign.input_line_number(),
                }
                .into());
            }
            if matches!(sign, BsrMeasureElement::Note(_)) {
                self.line_has_note = true;
            }
            self.cells_used += width;
            open.append_element(sign);
        }
        self.line.append_element(BsrLineElement::Measure(open));
        Ok(())
    }

    /// The first note of every output line states its octave outright, so
    /// reading a line never depends on a note on an earlier line.
    fn mark_if_line_opener(&self, sign: &mut BsrMeasureElement) {
        if self.line_has_note {
            return;
        }
        if let BsrMeasureElement::Note(note) = sign {
            note.octave_mark_needed = true;
        }
    }

    /// Moves the reflow to a fresh line in the middle of a measure. Signs
    /// already placed stay behind as a finished measure node; the
    /// continuation node keeps the same print number.
    fn wrap_measure(&mut self, open: &mut BsrMeasure, source: &BsrMeasure) {
        if !open.elements.is_empty() {
            let finished = mem::replace(
                open,
                BsrMeasure::new(&source.print_measure_number, source.input_line_number),
            );
            self.line.append_element(BsrLineElement::Measure(finished));
        }
        self.flush_line();
    }

    /// A line break present in the input is honored even when the open
    /// line still has room.
    fn take_line_break(&mut self) {
        self.flush_line();
    }

    fn take_page_break(&mut self) {
        self.flush_line();
        self.flush_page();
    }

    /// Closes the open line and starts a fresh one, rotating to a new
    /// page first when the current one is full.
    fn flush_line(&mut self) {
        let mut fresh = BsrLine::new(self.next_line_number);
        fresh.max_cells = Some(self.cells_per_line);
        self.next_line_number += 1;
        let finished = mem::replace(&mut self.line, fresh);
        if self.page.lines.len() == self.lines_per_page {
            self.flush_page();
        }
        self.page.lines.push(finished);
        self.cells_used = 0;
        self.line_has_note = false;
    }

    fn flush_page(&mut self) {
        let mut fresh = BsrPage::new(self.page.print_page_number + 1);
        fresh.max_lines = Some(self.lines_per_page);
        let finished = mem::replace(&mut self.page, fresh);
        self.score.pages.push(finished);
    }

    fn finish(mut self) -> BsrScore {
        self.flush_line();
        self.score.pages.push(self.page);
        self.score
    }
}
