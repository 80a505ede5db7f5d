//! The braille score representation: a tree of pages, lines, measures and
//! signs, plus the two transformation stages that produce and shape it.
//!
//! ```text
//!   MsrScore --build_bsr_score--> BsrScore (unconstrained)
//!                                     |
//!                              finalize_bsr_score
//!                                     v
//!                                 BsrScore (refined)
//! ```

pub mod builder;
pub mod elements;
pub mod finalizer;
pub mod score;
pub mod walk;

pub use builder::{build_bsr_score, BsrBuildResult, SkippedElement};
pub use finalizer::finalize_bsr_score;
pub use score::{BsrLine, BsrPage, BsrScore, BsrTranscriptionNotes, MsrSummary};
pub use walk::{sign_sequence, walk_score, BsrSign, BsrVisitor};
