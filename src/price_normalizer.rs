//! # Price Normalizer
//!
//! Turns raw price tokens into numbers. OCR-derived prices are multiplied by
//! a calibration factor that corrects a systematic overcount of the price
//! recognition heuristic; structured-element prices are taken as they are.

use log::{trace, warn};

use crate::menu_config::DEFAULT_PRICE_CALIBRATION_FACTOR;
use crate::menu_model::SourceStrategy;
use crate::price_patterns::{BARE_AMOUNT_REGEX, PRICE_TOKEN_REGEX, STRICT_PRICE_REGEX};

/// Price parser with a fixed calibration factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceNormalizer {
    calibration_factor: f64,
}

impl PriceNormalizer {
    pub fn new(calibration_factor: f64) -> Self {
        Self { calibration_factor }
    }

    pub fn calibration_factor(&self) -> f64 {
        self.calibration_factor
    }

    /// Parse the amount out of a raw token, ignoring any currency marker
    ///
    /// Grouping separators are stripped before parsing. Returns `None` when
    /// the token holds no number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menu_extract::price_normalizer::PriceNormalizer;
    ///
    /// assert_eq!(PriceNormalizer::parse_amount("LKR 1,200"), Some(1200.0));
    /// assert_eq!(PriceNormalizer::parse_amount("450.50"), Some(450.5));
    /// assert_eq!(PriceNormalizer::parse_amount("free"), None);
    /// ```
    pub fn parse_amount(token: &str) -> Option<f64> {
        let digits = match PRICE_TOKEN_REGEX.captures(token) {
            Some(caps) => caps.name("amount")?.as_str(),
            None => BARE_AMOUNT_REGEX.find(token)?.as_str(),
        };

        let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!("Unparseable price token '{}'", token);
                None
            }
        }
    }

    /// Normalize a token for the strategy that produced it
    ///
    /// OCR-derived prices are calibrated; all prices are rounded to cents.
    pub fn normalize(&self, token: &str, strategy: SourceStrategy) -> Option<f64> {
        let amount = Self::parse_amount(token)?;
        let value = if strategy.is_ocr_derived() {
            amount * self.calibration_factor
        } else {
            amount
        };
        let rounded = round_to_cents(value);
        trace!("Normalized price '{}' ({}) -> {}", token, strategy, rounded);
        Some(rounded)
    }

    /// Check whether the token is a complete currency-marked price
    pub fn is_strict(token: &str) -> bool {
        STRICT_PRICE_REGEX.is_match(token)
    }
}

impl Default for PriceNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_CALIBRATION_FACTOR)
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_prices_are_calibrated() {
        let normalizer = PriceNormalizer::default();

        assert_eq!(normalizer.normalize("LKR 1200", SourceStrategy::TextLine), Some(1140.0));
        assert_eq!(normalizer.normalize("LKR 80", SourceStrategy::TextLine), Some(76.0));
        assert_eq!(
            normalizer.normalize("Rs. 1,500", SourceStrategy::PricePatternFallback),
            Some(1425.0)
        );
    }

    #[test]
    fn test_structured_prices_are_not_calibrated() {
        let normalizer = PriceNormalizer::default();
        assert_eq!(
            normalizer.normalize("LKR 1,200.00", SourceStrategy::StructuredElement),
            Some(1200.0)
        );
        assert_eq!(normalizer.normalize("950", SourceStrategy::StructuredElement), Some(950.0));
    }

    #[test]
    fn test_unparseable_tokens() {
        let normalizer = PriceNormalizer::default();
        assert_eq!(normalizer.normalize("", SourceStrategy::TextLine), None);
        assert_eq!(normalizer.normalize("market price", SourceStrategy::StructuredElement), None);
    }

    #[test]
    fn test_custom_factor() {
        let normalizer = PriceNormalizer::new(1.0);
        assert_eq!(normalizer.normalize("LKR 333", SourceStrategy::TextLine), Some(333.0));
    }

    #[test]
    fn test_strictness() {
        assert!(PriceNormalizer::is_strict("LKR 1,200"));
        assert!(!PriceNormalizer::is_strict("1,200"));
    }
}
