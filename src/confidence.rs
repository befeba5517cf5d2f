//! # Confidence Scorer
//!
//! Combines the knowledge base match confidence with the reliability of the
//! extraction strategy and completeness bonuses into a 0-100 score.

use crate::menu_model::SourceStrategy;

/// Match confidence assumed for names the knowledge base does not know
pub const BASELINE_MATCH_CONFIDENCE: f64 = 40.0;
/// Added once per satisfied completeness condition
pub const COMPLETENESS_BONUS: f64 = 5.0;

pub const STRUCTURED_WEIGHT: f64 = 1.0;
pub const TEXT_LINE_WEIGHT: f64 = 0.95;
pub const FALLBACK_WEIGHT: f64 = 0.8;

/// Reliability of each strategy's output
pub fn strategy_weight(strategy: SourceStrategy) -> f64 {
    match strategy {
        SourceStrategy::StructuredElement => STRUCTURED_WEIGHT,
        SourceStrategy::TextLine => TEXT_LINE_WEIGHT,
        SourceStrategy::PricePatternFallback => FALLBACK_WEIGHT,
    }
}

/// Everything the score depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// Knowledge base match confidence, `None` when nothing matched
    pub match_confidence: Option<f64>,
    pub strategy: SourceStrategy,
    pub has_both_names: bool,
    pub has_specific_category: bool,
    pub strict_price: bool,
    /// Recognizer confidence (0-100) for OCR input
    pub recognition_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score an enriched item
    ///
    /// `match × weight + 5 per bonus`, clamped to 0-100. A recognition
    /// confidence scales the result by `0.5 + 0.5 × rc / 100`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menu_extract::confidence::{ConfidenceScorer, ScoreInputs};
    /// use menu_extract::menu_model::SourceStrategy;
    ///
    /// let score = ConfidenceScorer::new().score(&ScoreInputs {
    ///     match_confidence: Some(100.0),
    ///     strategy: SourceStrategy::TextLine,
    ///     has_both_names: true,
    ///     has_specific_category: true,
    ///     strict_price: true,
    ///     recognition_confidence: None,
    /// });
    /// assert_eq!(score, 100.0);
    /// ```
    pub fn score(&self, inputs: &ScoreInputs) -> f64 {
        let base = inputs
            .match_confidence
            .unwrap_or(BASELINE_MATCH_CONFIDENCE)
            * strategy_weight(inputs.strategy);

        let bonuses = [
            inputs.has_both_names,
            inputs.has_specific_category,
            inputs.strict_price,
        ]
        .iter()
        .filter(|satisfied| **satisfied)
        .count() as f64
            * COMPLETENESS_BONUS;

        let score = (base + bonuses).clamp(0.0, 100.0);

        match inputs.recognition_confidence {
            Some(rc) => score * recognition_factor(rc),
            None => score,
        }
    }
}

fn recognition_factor(recognition_confidence: f64) -> f64 {
    let rc = if recognition_confidence.is_finite() {
        recognition_confidence.clamp(0.0, 100.0)
    } else {
        0.0
    };
    0.5 + 0.5 * rc / 100.0
}
