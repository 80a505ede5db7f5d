//! The transcription pipeline: source score in, braille code out.
//!
//! ```text
//!   MsrScore
//!      |  pass 1: build            (mandatory)
//!   BsrScore, unconstrained        <- exit_after_build stops here
//!      |  pass 2: refine           (mandatory)
//!   BsrScore, refined              <- exit_after_finalize stops here
//!      |  pass 3: display          (optional, display_bsr)
//!      |  pass 4: generate         (skipped by no_braille_code)
//!   braille code bytes
//! ```
//!
//! Every pass that runs is timed, and the report keeps mandatory and
//! optional passes apart.

use std::time::{Duration, Instant};

use crate::bsr::{build_bsr_score, finalize_bsr_score, BsrBuildResult, BsrScore, SkippedElement};
use crate::config::BrailleConfig;
use crate::errors::TranslationError;
use crate::msr::MsrScore;
use crate::renderers::{bsr_as_text, generate_braille};

/// Wall-clock timing of one pipeline pass.
#[derive(Debug, Clone)]
pub struct PassTiming {
    pub name: &'static str,
    pub mandatory: bool,
    pub duration: Duration,
}

/// Pass timings in execution order.
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    pub passes: Vec<PassTiming>,
}

impl TimingReport {
    fn record(&mut self, name: &'static str, mandatory: bool, duration: Duration) {
        log::debug!("pass '{}' took {:?}", name, duration);
        self.passes.push(PassTiming {
            name,
            mandatory,
            duration,
        });
    }

    /// Total time spent across the recorded passes.
    pub fn total(&self) -> Duration {
        self.passes.iter().map(|pass| pass.duration).sum()
    }
}

impl std::fmt::Display for TimingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "timing report:")?;
        for pass in &self.passes {
            let kind = if pass.mandatory { "mandatory" } else { "optional" };
            writeln!(f, "  {:<26} {:<9} {:?}", pass.name, kind, pass.duration)?;
        }
        write!(f, "  total: {:?}", self.total())
    }
}

/// Everything one translation run produces. `braille` stays `None` when
/// the run stopped at an early exit or code generation was suppressed.
#[derive(Debug, Clone)]
pub struct TranslationOutput {
    /// The braille score the run ended with: unconstrained after an
    /// `exit_after_build` stop, refined otherwise.
    pub bsr: BsrScore,
    pub braille: Option<Vec<u8>>,
    pub bsr_dump: Option<String>,
    pub skipped: Vec<SkippedElement>,
    pub timing: TimingReport,
}

/// Runs the whole pipeline under one configuration bundle.
pub fn run_translation(
    score: &MsrScore,
    config: &BrailleConfig,
) -> Result<TranslationOutput, TranslationError> {
    config.validate()?;
    let mut timing = TimingReport::default();

    let started = Instant::now();
    let BsrBuildResult {
        score: unconstrained,
        skipped,
    } = build_bsr_score(score, config);
    timing.record("build the braille score", true, started.elapsed());

    if config.exit_after_build {
        log::info!("stopping after the build pass (exit_after_build is set)");
        let bsr_dump = config.display_bsr.then(|| bsr_as_text(&unconstrained));
        return Ok(TranslationOutput {
            bsr: unconstrained,
            braille: None,
            bsr_dump,
            skipped,
            timing,
        });
    }

    let started = Instant::now();
    let refined = finalize_bsr_score(&unconstrained, config)?;
    timing.record("refine the braille score", true, started.elapsed());

    if config.exit_after_finalize {
        log::info!("stopping after the refine pass (exit_after_finalize is set)");
        let bsr_dump = config.display_bsr.then(|| bsr_as_text(&refined));
        return Ok(TranslationOutput {
            bsr: refined,
            braille: None,
            bsr_dump,
            skipped,
            timing,
        });
    }

    let bsr_dump = if config.display_bsr {
        let started = Instant::now();
        let dump = bsr_as_text(&refined);
        timing.record("display the braille score", false, started.elapsed());
        Some(dump)
    } else {
        None
    };

    let braille = if config.no_braille_code {
        log::info!("skipping braille code generation (no_braille_code is set)");
        None
    } else {
        let started = Instant::now();
        let bytes = generate_braille(&refined, config)?;
        timing.record("generate the braille code", true, started.elapsed());
        Some(bytes)
    };

    log::info!(
        "translation finished in {:?} across {} pass(es)",
        timing.total(),
        timing.passes.len()
    );

    Ok(TranslationOutput {
        bsr: refined,
        braille,
        bsr_dump,
        skipped,
        timing,
    })
}
