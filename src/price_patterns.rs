//! # Price Patterns Module
//!
//! This module contains the regex patterns shared by the extraction strategies
//! and the price normalizer.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency marker followed by an amount: "LKR 1,200", "Rs. 80", "රු 450.00"
pub const PRICE_TOKEN_PATTERN: &str = r"(?P<currency>\b(?i:lkr|rs)\.?|රු\.?)\s*(?P<amount>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)";

/// Amount without a currency marker, accepted only inside price-like elements
pub const BARE_AMOUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?";

/// A run of Tamil-script characters (U+0B80 to U+0BFF)
pub const TAMIL_CHAR_PATTERN: &str = r"[\x{0B80}-\x{0BFF}]";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref PRICE_TOKEN_REGEX: Regex =
        Regex::new(PRICE_TOKEN_PATTERN).expect("Price token pattern should be valid");
    pub static ref STRICT_PRICE_REGEX: Regex =
        Regex::new(&format!(r"^\s*{}\s*(?:/-)?\s*$", PRICE_TOKEN_PATTERN))
            .expect("Strict price pattern should be valid");
    pub static ref BARE_AMOUNT_REGEX: Regex =
        Regex::new(BARE_AMOUNT_PATTERN).expect("Bare amount pattern should be valid");
    pub static ref TAMIL_CHAR_REGEX: Regex =
        Regex::new(TAMIL_CHAR_PATTERN).expect("Tamil character pattern should be valid");
}

/// Check whether text contains at least one currency-marked price
pub fn has_price_token(text: &str) -> bool {
    PRICE_TOKEN_REGEX.is_match(text)
}

/// Number of currency-marked prices in the text
pub fn count_price_tokens(text: &str) -> usize {
    PRICE_TOKEN_REGEX.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_token_variants() {
        let test_cases = vec![
            ("Hoppers LKR 80", true),
            ("Kottu lkr1,250.00", true),
            ("Wade Rs. 60", true),
            ("Wade Rs 60", true),
            ("இடியப்பம் රු 150", true),
            ("Hoppers 80", false),
            ("LKR", false),
            ("Peppers 80", false),
            ("", false),
        ];

        for (text, should_match) in test_cases {
            assert_eq!(
                has_price_token(text),
                should_match,
                "Price token detection failed for: '{}' (expected: {})",
                text,
                should_match
            );
        }
    }

    #[test]
    fn test_amount_capture() {
        let caps = PRICE_TOKEN_REGEX.captures("Crab Curry LKR 1,200.50 each").unwrap();
        assert_eq!(&caps["amount"], "1,200.50");
        assert_eq!(&caps["currency"], "LKR");
    }

    #[test]
    fn test_strict_price() {
        assert!(STRICT_PRICE_REGEX.is_match("LKR 1,200"));
        assert!(STRICT_PRICE_REGEX.is_match(" Rs. 450/- "));
        assert!(!STRICT_PRICE_REGEX.is_match("1200"));
        assert!(!STRICT_PRICE_REGEX.is_match("from LKR 1200"));
    }

    #[test]
    fn test_count_price_tokens() {
        assert_eq!(count_price_tokens("Wade Rs. 60 Vadai Rs. 70"), 2);
        assert_eq!(count_price_tokens("no prices here"), 0);
    }

    #[test]
    fn test_tamil_detection() {
        assert!(TAMIL_CHAR_REGEX.is_match("நண்டு கறி"));
        assert!(!TAMIL_CHAR_REGEX.is_match("Crab Curry"));
    }
}
