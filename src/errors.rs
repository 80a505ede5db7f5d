//! Error types for the braille transcription pipeline.
//!
//! Two tiers: configuration problems caught before any pass runs, and
//! run-level failures raised by the refine and render passes. Elements
//! the transcription cannot express are not errors at all; the builder
//! omits them and reports them separately.

use thiserror::Error;

/// Problems with the configuration bundle itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The UTF kind option accepts exactly two numerals.
    #[error("UTF kind '{0}' is unknown; possible values are 8 and 16")]
    UnknownUtfKind(u32),

    /// The byte ordering option accepts three names.
    #[error("byte ordering '{0}' is unknown; possible values are none, big and small")]
    UnknownByteOrdering(String),

    /// A layout capacity was configured as zero.
    #[error("{option} must be at least 1, got {value}")]
    NonPositiveCapacity { option: &'static str, value: usize },

    /// UTF-8 output never carries a byte order mark.
    #[error("a byte order mark cannot be combined with UTF-8 output")]
    OrderingMarkWithUtf8,

    /// A single sign is wider than a whole line; reflowing can never
    /// converge under such a capacity, so the run is rejected instead.
    #[error(
        "a {width}-cell sign cannot fit on a {capacity}-cell line (near input line {input_line_number})"
    )]
    SignExceedsLineCapacity {
        width: usize,
        capacity: usize,
        input_line_number: u32,
    },

    #[error("configuration is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures that terminate one translation run. When any of these is
/// raised no output bytes have been produced.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A sign kind with no wired cell pattern reached the code
    /// generator. Indicates a bug, not bad input.
    #[error("integration defect: {0}")]
    IntegrationDefect(String),

    #[error("failed to write braille output: {0}")]
    OutputFailed(#[from] std::io::Error),
}
