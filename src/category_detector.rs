//! # Category Detector
//!
//! Decides whether a text line is a category header and maps headers and
//! category hints onto canonical category names through the configured
//! header table.

use log::trace;

use crate::menu_config::HeaderMapping;
use crate::price_patterns::has_price_token;
use crate::text_processing::{clean_name, contains_word_prefix, has_tamil};

/// Longest line (in characters) still treated as a header
pub const MAX_HEADER_CHARS: usize = 40;
/// Most words a header line may have
pub const MAX_HEADER_WORDS: usize = 5;

const MAX_HINT_CHARS: usize = 60;

#[derive(Debug, Clone)]
pub struct CategoryDetector {
    header_table: Vec<HeaderMapping>,
}

impl CategoryDetector {
    pub fn new(header_table: Vec<HeaderMapping>) -> Self {
        Self { header_table }
    }

    /// Canonical category when `line` is a header, `None` otherwise
    ///
    /// A header is short, carries no price and contains a header keyword.
    /// Latin keywords must start a word ("Rice Dishes" but not "Price
    /// List"); Tamil keywords match anywhere.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menu_extract::category_detector::CategoryDetector;
    /// use menu_extract::menu_config::PipelineConfig;
    ///
    /// let detector = CategoryDetector::new(PipelineConfig::default().category_header_table);
    /// assert_eq!(detector.detect_header("Rice Dishes").as_deref(), Some("Rice"));
    /// assert_eq!(detector.detect_header("Fried Rice LKR 650"), None);
    /// ```
    pub fn detect_header(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty()
            || line.chars().count() > MAX_HEADER_CHARS
            || line.split_whitespace().count() > MAX_HEADER_WORDS
            || has_price_token(line)
        {
            return None;
        }

        let category = self.canonical_category(line);
        if let Some(category) = &category {
            trace!("Header line '{}' -> {}", line, category);
        }
        category
    }

    /// Canonical category for text containing a header keyword
    ///
    /// Rows are tried in table order; the first match wins.
    pub fn canonical_category(&self, text: &str) -> Option<String> {
        self.header_table
            .iter()
            .find(|row| keyword_matches(text, &row.keyword))
            .map(|row| row.category.clone())
    }

    /// Resolve a category hint from the source
    ///
    /// Hints naming a known header map to its canonical category; anything
    /// else is kept as written after cleanup. Blank hints resolve to `None`.
    pub fn resolve_hint(&self, hint: &str) -> Option<String> {
        if let Some(category) = self.canonical_category(hint) {
            return Some(category);
        }
        let cleaned = clean_name(hint, MAX_HINT_CHARS);
        (!cleaned.is_empty()).then_some(cleaned)
    }
}

fn keyword_matches(text: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }
    if has_tamil(keyword) {
        text.contains(keyword)
    } else {
        contains_word_prefix(text, keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_config::PipelineConfig;

    fn detector() -> CategoryDetector {
        CategoryDetector::new(PipelineConfig::default().category_header_table)
    }

    #[test]
    fn test_english_headers() {
        let detector = detector();

        assert_eq!(detector.detect_header("Rice Dishes").as_deref(), Some("Rice"));
        assert_eq!(detector.detect_header("BREAD").as_deref(), Some("Bread"));
        assert_eq!(detector.detect_header("  Hoppers  ").as_deref(), Some("Hoppers"));
        assert_eq!(detector.detect_header("Short Eats").as_deref(), Some("Short Eats"));
    }

    #[test]
    fn test_tamil_headers() {
        let detector = detector();

        assert_eq!(detector.detect_header("கறி வகைகள்").as_deref(), Some("Curries"));
        assert_eq!(detector.detect_header("காலை உணவு").as_deref(), Some("Breakfast"));
    }

    #[test]
    fn test_non_headers() {
        let detector = detector();

        assert_eq!(detector.detect_header("Price List"), None);
        assert_eq!(detector.detect_header("Fried Rice LKR 650"), None);
        assert_eq!(detector.detect_header("Welcome to our restaurant"), None);
        assert_eq!(detector.detect_header(""), None);
        assert_eq!(
            detector.detect_header("Rice served with three curries of the day and papadam"),
            None
        );
    }

    #[test]
    fn test_table_order_wins() {
        let detector = CategoryDetector::new(vec![
            HeaderMapping {
                keyword: "seafood".to_string(),
                category: "Seafood".to_string(),
            },
            HeaderMapping {
                keyword: "rice".to_string(),
                category: "Rice".to_string(),
            },
        ]);

        assert_eq!(detector.detect_header("Seafood Rice").as_deref(), Some("Seafood"));
    }

    #[test]
    fn test_resolve_hint() {
        let detector = detector();

        assert_eq!(detector.resolve_hint("Rice Dishes").as_deref(), Some("Rice"));
        assert_eq!(detector.resolve_hint(" Chef Specials: ").as_deref(), Some("Chef Specials"));
        assert_eq!(detector.resolve_hint("   "), None);
    }
}
