#[cfg(test)]
mod tests {
    use menu_extract::menu_model::SourceStrategy;
    use menu_extract::price_normalizer::PriceNormalizer;
    use menu_extract::price_patterns::{count_price_tokens, has_price_token};
    use menu_extract::text_processing::{
        clean_name, contains_keyword, has_tamil, normalize_for_match, split_scripts,
    };

    #[test]
    fn test_script_splitting_on_menu_lines() {
        let test_cases = vec![
            ("நண்டு கறி (Jaffna Crab Curry)", "நண்டு கறி", "Jaffna Crab Curry"),
            ("Hoppers / அப்பம்", "அப்பம்", "Hoppers"),
            ("கோழி கொத்து", "கோழி கொத்து", ""),
            ("Chicken Kottu", "", "Chicken Kottu"),
            ("Dish 1", "", "Dish 1"),
            ("இட்லி 2 pcs", "இட்லி 2", "pcs"),
        ];

        for (raw, tamil, english) in test_cases {
            let names = split_scripts(raw);
            assert_eq!(names.tamil, tamil, "Tamil part of '{}'", raw);
            assert_eq!(names.english, english, "English part of '{}'", raw);
        }
    }

    #[test]
    fn test_tamil_detection() {
        assert!(has_tamil("அப்பம்"));
        assert!(has_tamil("Hoppers அப்பம்"));
        assert!(!has_tamil("Hoppers"));
        assert!(!has_tamil(""));
    }

    #[test]
    fn test_name_cleanup() {
        assert_eq!(clean_name("  Pittu -  ", 100), "Pittu");
        assert_eq!(clean_name("Sothi\n\n(Coconut Gravy)", 100), "Sothi (Coconut Gravy)");
        assert_eq!(clean_name("...", 100), "");
    }

    #[test]
    fn test_match_normalization() {
        assert_eq!(normalize_for_match("  STRING-Hoppers "), "string hoppers");
        assert_eq!(normalize_for_match("Café Latte"), "cafe latte");
        assert_eq!(normalize_for_match("இடி\u{200D}யப்பம்"), "இடியப்பம்");
    }

    #[test]
    fn test_keyword_matching() {
        assert!(contains_keyword("Fish Curry", "fish"));
        assert!(!contains_keyword("Selfish Curry", "fish"));
        assert!(contains_keyword("மீன் கறி", "மீன்"));
        assert!(!contains_keyword("Fish Curry", ""));
    }

    #[test]
    fn test_price_detection() {
        assert!(has_price_token("Kottu Roti LKR 950"));
        assert!(has_price_token("Kottu Roti රු 950"));
        assert!(!has_price_token("Kottu Roti 950"));
        assert_eq!(count_price_tokens("Tea Rs.60 Coffee Rs.90"), 2);
    }

    #[test]
    fn test_price_normalization() {
        let normalizer = PriceNormalizer::default();

        let test_cases = vec![
            ("LKR 1200", SourceStrategy::TextLine, Some(1140.0)),
            ("LKR 80", SourceStrategy::TextLine, Some(76.0)),
            ("Rs. 1,250.00", SourceStrategy::PricePatternFallback, Some(1187.5)),
            ("1,250.00", SourceStrategy::StructuredElement, Some(1250.0)),
            ("", SourceStrategy::StructuredElement, None),
        ];

        for (token, strategy, expected) in test_cases {
            assert_eq!(
                normalizer.normalize(token, strategy),
                expected,
                "Normalization failed for '{}' ({})",
                token,
                strategy
            );
        }
    }
}
