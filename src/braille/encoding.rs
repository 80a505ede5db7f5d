//! Byte codecs for braille cell streams.
//!
//! Three encodings are supported: UTF-8 and UTF-16 in both byte orders.
//! The codec is chosen once per run and every emitted unit goes through
//! it, including the line and page separators:
//!
//! ```text
//!   cell         U+2800 + dot bits
//!   end of line  U+000A (LINE FEED)
//!   end of page  U+000C (FORM FEED)
//! ```
//!
//! A byte order mark is only meaningful for UTF-16; UTF-16 runs open with
//! one unless the configuration explicitly declined it.

use serde::{Deserialize, Serialize};

use super::cells::BrailleCell;

/// End-of-line scalar, emitted after every line of a page.
pub const END_OF_LINE: u8 = 0x0A;
/// End-of-page scalar, emitted after every page.
pub const END_OF_PAGE: u8 = 0x0C;

/// The concrete output encoding of one translation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrailleOutputKind {
    Utf8,
    Utf16BigEndian,
    Utf16LittleEndian,
}

impl BrailleOutputKind {
    /// Appends the byte order mark, where the encoding carries one.
    ///
    /// UTF-8 output is always BOM-less; callers that want a mark under
    /// UTF-8 are rejected at configuration time, not here.
    pub fn push_bom(self, out: &mut Vec<u8>) {
        match self {
            BrailleOutputKind::Utf8 => {}
            BrailleOutputKind::Utf16BigEndian => out.extend_from_slice(&[0xFE, 0xFF]),
            BrailleOutputKind::Utf16LittleEndian => out.extend_from_slice(&[0xFF, 0xFE]),
        }
    }

    /// Appends the encoded form of one braille cell.
    pub fn push_cell(self, cell: BrailleCell, out: &mut Vec<u8>) {
        let bits = cell.dot_bits();
        match self {
            // U+28xx encodes as 1110_0010 1010_0000 10xx_xxxx: the block
            // start fixes the first two bytes, the dots fill the third.
            BrailleOutputKind::Utf8 => out.extend_from_slice(&[0xE2, 0xA0, 0x80 | bits]),
            BrailleOutputKind::Utf16BigEndian => out.extend_from_slice(&[0x28, bits]),
            BrailleOutputKind::Utf16LittleEndian => out.extend_from_slice(&[bits, 0x28]),
        }
    }

    /// Appends a run of cells.
    pub fn push_cells(self, cells: &[BrailleCell], out: &mut Vec<u8>) {
        for &cell in cells {
            self.push_cell(cell, out);
        }
    }

    /// Appends the line separator.
    pub fn push_end_of_line(self, out: &mut Vec<u8>) {
        self.push_control(END_OF_LINE, out);
    }

    /// Appends the page separator.
    pub fn push_end_of_page(self, out: &mut Vec<u8>) {
        self.push_control(END_OF_PAGE, out);
    }

    fn push_control(self, scalar: u8, out: &mut Vec<u8>) {
        match self {
            BrailleOutputKind::Utf8 => out.push(scalar),
            BrailleOutputKind::Utf16BigEndian => out.extend_from_slice(&[0x00, scalar]),
            BrailleOutputKind::Utf16LittleEndian => out.extend_from_slice(&[scalar, 0x00]),
        }
    }

    /// Number of bytes one cell occupies under this encoding.
    pub fn bytes_per_cell(self) -> usize {
        match self {
            BrailleOutputKind::Utf8 => 3,
            BrailleOutputKind::Utf16BigEndian | BrailleOutputKind::Utf16LittleEndian => 2,
        }
    }
}

impl std::fmt::Display for BrailleOutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BrailleOutputKind::Utf8 => "UTF-8",
            BrailleOutputKind::Utf16BigEndian => "UTF-16 (big-endian)",
            BrailleOutputKind::Utf16LittleEndian => "UTF-16 (little-endian)",
        };
        write!(f, "{}", name)
    }
}
