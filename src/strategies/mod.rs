//! # Extraction Strategies
//!
//! Each strategy turns a [`RawSourceUnit`] into unvalidated
//! [`MenuCandidate`]s. The orchestrator tries them in priority order and
//! keeps the output of the first one that finds a named candidate.

use crate::menu_model::{MenuCandidate, RawSourceUnit, SourceStrategy};

pub mod price_pattern;
pub mod structured;
pub mod text_line;

pub use price_pattern::PricePatternStrategy;
pub use structured::StructuredElementStrategy;
pub use text_line::TextLineStrategy;

/// A way of locating menu items in raw input
pub trait ExtractionStrategy: Send + Sync {
    fn source(&self) -> SourceStrategy;

    /// Candidates found in `input`, or `None` when the strategy does not
    /// apply to this input
    fn try_extract(&self, input: &RawSourceUnit) -> Option<Vec<MenuCandidate>>;
}
