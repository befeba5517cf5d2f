//! Price-pattern fallback: scans the whole text for prices and takes the
//! text between consecutive prices as the item name.

use log::{debug, trace};

use super::ExtractionStrategy;
use crate::menu_model::{MenuCandidate, RawSourceUnit, SourceStrategy, MAX_NAME_CHARS};
use crate::price_normalizer::PriceNormalizer;
use crate::price_patterns::PRICE_TOKEN_REGEX;

pub const MIN_NAME_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct PricePatternStrategy;

impl PricePatternStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for PricePatternStrategy {
    fn source(&self) -> SourceStrategy {
        SourceStrategy::PricePatternFallback
    }

    fn try_extract(&self, input: &RawSourceUnit) -> Option<Vec<MenuCandidate>> {
        let text = input.as_text();
        let mut candidates = Vec::new();
        let mut previous_end = 0;

        for price in PRICE_TOKEN_REGEX.find_iter(&text) {
            let name = text[previous_end..price.start()]
                .trim_matches(|c: char| c.is_whitespace() || c.is_control());
            previous_end = price.end();

            let name_chars = name.chars().count();
            if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&name_chars) {
                trace!("Fallback name rejected by length ({}): '{}'", name_chars, name);
                continue;
            }
            match PriceNormalizer::parse_amount(price.as_str()) {
                Some(amount) if amount > 0.0 => {}
                _ => {
                    trace!("Fallback price rejected: '{}'", price.as_str());
                    continue;
                }
            }

            candidates.push(MenuCandidate::new(
                name,
                price.as_str(),
                SourceStrategy::PricePatternFallback,
            ));
        }

        debug!("Price-pattern fallback found {} candidates", candidates.len());
        Some(candidates)
    }
}
