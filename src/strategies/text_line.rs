//! Text-line strategy: walks OCR text line by line, tracking the active
//! category header and reading one dish per price on each priced line.

use log::{debug, trace};
use std::sync::Arc;

use super::ExtractionStrategy;
use crate::category_detector::CategoryDetector;
use crate::menu_model::{
    MenuCandidate, RawSourceUnit, SourceStrategy, DEFAULT_CATEGORY, MAX_NAME_CHARS,
};
use crate::price_patterns::{count_price_tokens, PRICE_TOKEN_REGEX};
use crate::text_processing::clean_name;

#[derive(Debug, Clone)]
pub struct TextLineStrategy {
    detector: Arc<CategoryDetector>,
}

impl TextLineStrategy {
    pub fn new(detector: Arc<CategoryDetector>) -> Self {
        Self { detector }
    }

    /// Dish candidates for a priced line
    ///
    /// Each price closes one dish whose name is the text since the previous
    /// price, so "Plain Tea LKR 60 / Milk Tea LKR 90" gives two candidates.
    fn parse_dish_line(&self, line: &str, category: &str) -> Vec<MenuCandidate> {
        let mut candidates = Vec::new();
        let mut previous_end = 0;

        for price in PRICE_TOKEN_REGEX.find_iter(line) {
            let name = clean_name(&line[previous_end..price.start()], MAX_NAME_CHARS);
            previous_end = price.end();

            if name.is_empty() {
                trace!("Price without a name in '{}': '{}'", line, price.as_str());
                continue;
            }
            candidates.push(
                MenuCandidate::new(&name, price.as_str(), SourceStrategy::TextLine)
                    .with_category_hint(Some(category.to_string())),
            );
        }
        candidates
    }
}

impl ExtractionStrategy for TextLineStrategy {
    fn source(&self) -> SourceStrategy {
        SourceStrategy::TextLine
    }

    fn try_extract(&self, input: &RawSourceUnit) -> Option<Vec<MenuCandidate>> {
        let text = input.as_text();
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if let [only_line] = lines.as_slice() {
            if count_price_tokens(only_line) > 1 {
                debug!("Single line with several prices; no usable line structure");
                return None;
            }
        }

        let mut active_category: Option<String> = None;
        let mut candidates = Vec::new();

        for line in lines {
            if let Some(category) = self.detector.detect_header(line) {
                debug!("Category header '{}' -> {}", line, category);
                active_category = Some(category);
                continue;
            }

            let category = active_category.as_deref().unwrap_or(DEFAULT_CATEGORY);
            let found = self.parse_dish_line(line, category);
            if found.is_empty() {
                trace!("Discarded line '{}'", line);
            }
            candidates.extend(found);
        }

        Some(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_config::PipelineConfig;

    fn strategy() -> TextLineStrategy {
        let detector = CategoryDetector::new(PipelineConfig::default().category_header_table);
        TextLineStrategy::new(Arc::new(detector))
    }

    fn extract(text: &str) -> Option<Vec<MenuCandidate>> {
        strategy().try_extract(&RawSourceUnit::text(text))
    }

    #[test]
    fn test_headers_are_sticky() {
        let candidates = extract(
            "Rice Dishes\nநண்டு கறி (Jaffna Crab Curry) LKR 1200\nFried Rice LKR 650\nBread\nஅப்பம் (Hoppers) LKR 80",
        )
        .unwrap();

        let hints: Vec<&str> = candidates
            .iter()
            .map(|c| c.category_hint.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(hints, vec!["Rice", "Rice", "Bread"]);
        assert_eq!(candidates[0].raw_name, "நண்டு கறி (Jaffna Crab Curry)");
        assert_eq!(candidates[0].raw_price_token, "LKR 1200");
    }

    #[test]
    fn test_lines_before_any_header_are_main_course() {
        let candidates = extract("Dish 1 LKR 100\nDish 2 LKR 200").unwrap();

        assert_eq!(candidates.len(), 2);
        assert!(candidates
            .iter()
            .all(|c| c.category_hint.as_deref() == Some(DEFAULT_CATEGORY)));
    }

    #[test]
    fn test_noise_lines_are_discarded() {
        let candidates =
            extract("Welcome to Jaffna Kitchen\n\n   \nOpen daily 7am - 10pm\nPittu - Rs. 150/-").unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw_name, "Pittu");
        assert_eq!(candidates[0].raw_price_token, "Rs. 150");
    }

    #[test]
    fn test_declines_single_run_together_line() {
        assert!(extract("Wade Rs. 60 Vadai Rs. 70").is_none());
    }

    #[test]
    fn test_multi_price_line_splits_under_active_header() {
        let candidates = extract(
            "Rice Dishes\nFried Rice LKR 650\nBeverages\nPlain Tea LKR 60 / Milk Tea LKR 90",
        )
        .unwrap();

        let names: Vec<&str> = candidates.iter().map(|c| c.raw_name.as_str()).collect();
        assert_eq!(names, vec!["Fried Rice", "Plain Tea", "Milk Tea"]);
        let prices: Vec<&str> = candidates.iter().map(|c| c.raw_price_token.as_str()).collect();
        assert_eq!(prices, vec!["LKR 650", "LKR 60", "LKR 90"]);
        let hints: Vec<&str> = candidates
            .iter()
            .map(|c| c.category_hint.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(hints, vec!["Rice", "Beverages", "Beverages"]);
    }

    #[test]
    fn test_no_prices_gives_no_candidates() {
        assert!(extract("Rice\nBread\nThank you").unwrap().is_empty());
    }
}
