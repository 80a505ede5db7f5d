//! The configuration bundle one translation run receives.
//!
//! All options are plain data, immutable once a run starts; the pipeline
//! stages borrow the bundle and never write it back. Bundles load from
//! YAML or JSON with every field optional, falling back to the defaults
//! below, and are validated once up front so the passes can trust the
//! values they read.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::braille::BrailleOutputKind;
use crate::errors::ConfigError;

/// Output encoding family, selected by numeral as the external option
/// surface spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum UtfKind {
    Utf8,
    Utf16,
}

impl TryFrom<u32> for UtfKind {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<UtfKind, ConfigError> {
        match value {
            8 => Ok(UtfKind::Utf8),
            16 => Ok(UtfKind::Utf16),
            other => Err(ConfigError::UnknownUtfKind(other)),
        }
    }
}

impl From<UtfKind> for u32 {
    fn from(kind: UtfKind) -> u32 {
        match kind {
            UtfKind::Utf8 => 8,
            UtfKind::Utf16 => 16,
        }
    }
}

/// Byte-order-mark request for UTF-16 output.
///
/// Leaving the option unset (the `Option` around it) means "decide per
/// encoding": UTF-16 then gets a big-endian mark, UTF-8 none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrderingKind {
    None,
    Big,
    Small,
}

impl FromStr for ByteOrderingKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<ByteOrderingKind, ConfigError> {
        match name {
            "none" => Ok(ByteOrderingKind::None),
            "big" => Ok(ByteOrderingKind::Big),
            "small" => Ok(ByteOrderingKind::Small),
            other => Err(ConfigError::UnknownByteOrdering(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrailleConfig {
    /// Maximum braille cells per line.
    pub cells_per_line: usize,
    /// Soft layout hint; carried for alternative layout strategies, not
    /// enforced by the width-based refiner.
    pub measures_per_line: usize,
    /// Maximum lines per page.
    pub lines_per_page: usize,
    pub utf_kind: UtfKind,
    pub byte_ordering_mark: Option<ByteOrderingKind>,
    /// Whether clef signs are transcribed at all.
    pub include_clefs: bool,
    /// Suppresses lyric syllables.
    pub no_braille_lyrics: bool,
    /// Suppresses the render pass entirely (summary-only run).
    pub no_braille_code: bool,
    /// Preserve the source page/line layout instead of reflowing.
    pub facsimile: bool,
    /// Stop after the build pass.
    pub exit_after_build: bool,
    /// Stop after the refine pass.
    pub exit_after_finalize: bool,
    /// Emit the human-readable tree dump.
    pub display_bsr: bool,
    /// Free-text notes for transcribers, copied onto the score.
    pub transcription_notes: Vec<String>,
}

impl Default for BrailleConfig {
    fn default() -> BrailleConfig {
        BrailleConfig {
            cells_per_line: 30,
            measures_per_line: 7,
            lines_per_page: 27,
            utf_kind: UtfKind::Utf8,
            byte_ordering_mark: None,
            include_clefs: false,
            no_braille_lyrics: false,
            no_braille_code: false,
            facsimile: false,
            exit_after_build: false,
            exit_after_finalize: false,
            display_bsr: false,
            transcription_notes: Vec::new(),
        }
    }
}

impl BrailleConfig {
    pub fn from_yaml(source: &str) -> Result<BrailleConfig, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<BrailleConfig, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Checks the bundle once before a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells_per_line == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                option: "cells_per_line",
                value: self.cells_per_line,
            });
        }
        if self.lines_per_page == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                option: "lines_per_page",
                value: self.lines_per_page,
            });
        }
        if self.measures_per_line == 0 {
            return Err(ConfigError::NonPositiveCapacity {
                option: "measures_per_line",
                value: self.measures_per_line,
            });
        }
        if self.utf_kind == UtfKind::Utf8
            && matches!(
                self.byte_ordering_mark,
                Some(ByteOrderingKind::Big) | Some(ByteOrderingKind::Small)
            )
        {
            return Err(ConfigError::OrderingMarkWithUtf8);
        }
        Ok(())
    }

    /// The concrete codec this bundle selects.
    pub fn output_kind(&self) -> BrailleOutputKind {
        match self.utf_kind {
            UtfKind::Utf8 => BrailleOutputKind::Utf8,
            UtfKind::Utf16 => match self.byte_ordering_mark {
                Some(ByteOrderingKind::Small) => BrailleOutputKind::Utf16LittleEndian,
                _ => BrailleOutputKind::Utf16BigEndian,
            },
        }
    }

    /// Whether the output stream opens with a byte order mark.
    pub fn emits_bom(&self) -> bool {
        match self.utf_kind {
            UtfKind::Utf8 => false,
            // UTF-16 gets a mark unless one was explicitly declined.
            UtfKind::Utf16 => !matches!(self.byte_ordering_mark, Some(ByteOrderingKind::None)),
        }
    }
}
