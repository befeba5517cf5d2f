//! # Attribute Classifier
//!
//! Keyword heuristics deriving dietary and spice attributes and ingredients
//! from an item's name and description. All vocabulary comes from
//! [`PipelineConfig`], so the classifier itself holds no business terms.

use log::trace;
use std::collections::BTreeSet;

use crate::menu_config::{
    IngredientTerm, KeywordSet, PipelineConfig, TAG_CURRY, TAG_GLUTEN_FREE, TAG_HALAL,
    TAG_HEAT_MODIFIER, TAG_NON_VEGETARIAN, TAG_SPICY, TAG_VEGETARIAN,
};
use crate::text_processing::{capitalize, contains_keyword};

/// Keyword classifier built once from configuration
#[derive(Debug, Clone)]
pub struct AttributeClassifier {
    spicy: KeywordSet,
    curry: KeywordSet,
    heat_modifier: KeywordSet,
    vegetarian: KeywordSet,
    non_vegetarian: KeywordSet,
    halal: KeywordSet,
    gluten_free: KeywordSet,
    ingredients: Vec<IngredientTerm>,
}

impl AttributeClassifier {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            spicy: config.keyword_set(TAG_SPICY),
            curry: config.keyword_set(TAG_CURRY),
            heat_modifier: config.keyword_set(TAG_HEAT_MODIFIER),
            vegetarian: config.keyword_set(TAG_VEGETARIAN),
            non_vegetarian: config.keyword_set(TAG_NON_VEGETARIAN),
            halal: config.keyword_set(TAG_HALAL),
            gluten_free: config.keyword_set(TAG_GLUTEN_FREE),
            ingredients: config.ingredient_vocabulary.clone(),
        }
    }

    /// Spicy when a spice keyword appears, or a curry word appears next to a
    /// heat modifier. A plain curry is not spicy.
    pub fn is_spicy(&self, text: &str) -> bool {
        matches_any(text, &self.spicy)
            || (matches_any(text, &self.curry) && matches_any(text, &self.heat_modifier))
    }

    /// Vegetarian status from keywords
    ///
    /// Non-vegetarian keywords win over vegetarian ones. `None` means the
    /// text says nothing either way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menu_extract::attribute_classifier::AttributeClassifier;
    /// use menu_extract::menu_config::PipelineConfig;
    ///
    /// let classifier = AttributeClassifier::from_config(&PipelineConfig::default());
    /// assert_eq!(classifier.vegetarian("Chicken and vegetable fried rice"), Some(false));
    /// assert_eq!(classifier.vegetarian("Vegetable Kottu"), Some(true));
    /// assert_eq!(classifier.vegetarian("Plain Tea"), None);
    /// ```
    pub fn vegetarian(&self, text: &str) -> Option<bool> {
        if matches_any(text, &self.non_vegetarian) {
            Some(false)
        } else if matches_any(text, &self.vegetarian) {
            Some(true)
        } else {
            None
        }
    }

    pub fn is_halal(&self, text: &str) -> Option<bool> {
        matches_any(text, &self.halal).then_some(true)
    }

    pub fn is_gluten_free(&self, text: &str) -> bool {
        matches_any(text, &self.gluten_free)
    }

    /// Tags justified by keywords in the text alone
    pub fn dietary_tags(&self, text: &str) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();

        if self.is_spicy(text) {
            tags.insert(TAG_SPICY.to_string());
        }
        if self.vegetarian(text) == Some(true) {
            tags.insert(TAG_VEGETARIAN.to_string());
        }
        if self.is_halal(text).is_some() {
            tags.insert(TAG_HALAL.to_string());
        }
        if self.is_gluten_free(text) {
            tags.insert(TAG_GLUTEN_FREE.to_string());
        }

        trace!("Dietary tags for '{}': {:?}", text, tags);
        tags
    }

    /// Vocabulary ingredients mentioned in the text, capitalized, in
    /// vocabulary order, each at most once
    pub fn extract_ingredients(&self, text: &str) -> Vec<String> {
        self.ingredients
            .iter()
            .filter(|term| {
                contains_keyword(text, &term.name)
                    || term.aliases.iter().any(|alias| contains_keyword(text, alias))
            })
            .map(|term| capitalize(&term.name))
            .fold(Vec::new(), |mut found, name| {
                if !found.contains(&name) {
                    found.push(name);
                }
                found
            })
    }
}

impl Default for AttributeClassifier {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

fn matches_any(text: &str, set: &KeywordSet) -> bool {
    set.english
        .iter()
        .chain(set.tamil.iter())
        .any(|keyword| contains_keyword(text, keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spice_detection() {
        let classifier = AttributeClassifier::default();

        assert!(classifier.is_spicy("Devilled Chicken"));
        assert!(classifier.is_spicy("Hot Butter Cuttlefish"));
        assert!(classifier.is_spicy("காரமான கோழி"));
        assert!(classifier.is_spicy("நண்டு கறி (Jaffna Crab Curry)"));
        assert!(classifier.is_spicy("Red Chicken Curry"));
    }

    #[test]
    fn test_curry_alone_is_not_spicy() {
        let classifier = AttributeClassifier::default();

        assert!(!classifier.is_spicy("Dhal Curry"));
        assert!(!classifier.is_spicy("பருப்பு கறி"));
        assert!(!classifier.is_spicy("Hoppers"));
    }

    #[test]
    fn test_non_vegetarian_precedence() {
        let classifier = AttributeClassifier::default();

        assert_eq!(classifier.vegetarian("Chicken with vegetable rice"), Some(false));
        assert_eq!(classifier.vegetarian("அசைவ கொத்து"), Some(false));
        assert_eq!(classifier.vegetarian("சைவ கொத்து"), Some(true));
        assert_eq!(classifier.vegetarian("Egg Hoppers"), Some(false));
        assert_eq!(classifier.vegetarian("Hoppers"), None);
    }

    #[test]
    fn test_halal_and_gluten_free() {
        let classifier = AttributeClassifier::default();

        assert_eq!(classifier.is_halal("Halal Chicken Biryani"), Some(true));
        assert_eq!(classifier.is_halal("Chicken Biryani"), None);
        assert!(classifier.is_gluten_free("Gluten-free hoppers"));
        assert!(!classifier.is_gluten_free("Hoppers"));
    }

    #[test]
    fn test_dietary_tags() {
        let classifier = AttributeClassifier::default();
        let tags = classifier.dietary_tags("Spicy vegetable kottu, halal, gluten free");

        let expected: BTreeSet<String> = [TAG_SPICY, TAG_VEGETARIAN, TAG_HALAL, TAG_GLUTEN_FREE]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(tags, expected);
        assert!(classifier.dietary_tags("Plain Tea").is_empty());
    }

    #[test]
    fn test_ingredient_extraction() {
        let classifier = AttributeClassifier::default();

        let ingredients =
            classifier.extract_ingredients("Crab cooked with coconut milk, garlic and நண்டு");
        assert_eq!(ingredients, vec!["Crab", "Coconut", "Garlic"]);

        let ingredients = classifier.extract_ingredients("Rice with curry leaves and chillies");
        assert_eq!(ingredients, vec!["Rice", "Curry leaves", "Chili"]);

        assert!(classifier.extract_ingredients("Plain Tea").is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let mut config = PipelineConfig::default();
        config.ingredient_vocabulary = vec![IngredientTerm {
            name: "jackfruit".to_string(),
            aliases: vec!["பலா".to_string()],
        }];
        let classifier = AttributeClassifier::from_config(&config);

        assert_eq!(classifier.extract_ingredients("பலாக்காய் கறி"), vec!["Jackfruit"]);
        assert!(classifier.extract_ingredients("Chicken Curry").is_empty());
    }
}
