//! # Extraction Orchestrator
//!
//! Entry point of the pipeline. Runs the strategies in priority order, enriches
//! the winning candidates against the knowledge base and classifier, scores
//! them and hands them to the validator.
//!
//! ## Usage
//!
//! ```rust
//! use menu_extract::menu_model::RawSourceUnit;
//! use menu_extract::orchestrator::MenuExtractor;
//!
//! let extractor = MenuExtractor::with_defaults()?;
//! let menu = extractor.extract(&RawSourceUnit::text("Bread\nஅப்பம் (Hoppers) LKR 80"));
//!
//! assert_eq!(menu.total_items, 1);
//! assert_eq!(menu.categories[0].name, "Bread");
//! assert_eq!(menu.categories[0].items[0].price, 76.0);
//! # Ok::<(), menu_extract::menu_errors::MenuError>(())
//! ```

use log::{debug, info, trace};
use std::sync::Arc;

use crate::attribute_classifier::AttributeClassifier;
use crate::category_detector::CategoryDetector;
use crate::confidence::{ConfidenceScorer, ScoreInputs};
use crate::dish_knowledge::DishKnowledgeBase;
use crate::dish_matcher::{DishMatch, DishMatcher, MatchKind};
use crate::menu_config::{PipelineConfig, TAG_SPICY, TAG_VEGETARIAN};
use crate::menu_errors::MenuResult;
use crate::menu_model::{
    ExtractionRequest, MenuCandidate, MenuItem, ParsedMenu, RawSourceUnit, DEFAULT_CATEGORY,
    MAX_NAME_CHARS,
};
use crate::price_normalizer::PriceNormalizer;
use crate::strategies::{
    ExtractionStrategy, PricePatternStrategy, StructuredElementStrategy, TextLineStrategy,
};
use crate::text_processing::{clean_name, split_scripts};
use crate::validator::MenuValidator;

/// The assembled extraction pipeline
///
/// Holds only read-only state, so one extractor can serve many threads.
pub struct MenuExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    detector: Arc<CategoryDetector>,
    matcher: DishMatcher,
    classifier: AttributeClassifier,
    normalizer: PriceNormalizer,
    scorer: ConfidenceScorer,
    validator: MenuValidator,
}

impl MenuExtractor {
    /// Build the pipeline from a configuration and a shared knowledge base
    pub fn new(config: PipelineConfig, knowledge_base: Arc<DishKnowledgeBase>) -> MenuResult<Self> {
        config.validate()?;

        let detector = Arc::new(CategoryDetector::new(config.category_header_table.clone()));
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(StructuredElementStrategy::new()),
            Box::new(TextLineStrategy::new(Arc::clone(&detector))),
            Box::new(PricePatternStrategy::new()),
        ];

        info!(
            "Menu extractor ready: {} known dishes, calibration factor {}, confidence floor {}",
            knowledge_base.len(),
            config.price_calibration_factor,
            config.confidence_floor
        );

        Ok(Self {
            strategies,
            detector,
            matcher: DishMatcher::new(knowledge_base, config.max_edit_distance),
            classifier: AttributeClassifier::from_config(&config),
            normalizer: PriceNormalizer::new(config.price_calibration_factor),
            scorer: ConfidenceScorer::new(),
            validator: MenuValidator::new(config.confidence_floor),
        })
    }

    /// Default configuration with the built-in knowledge base
    pub fn with_defaults() -> MenuResult<Self> {
        Self::new(PipelineConfig::default(), Arc::new(DishKnowledgeBase::builtin()?))
    }

    /// Validate a request and extract from it
    pub fn extract_request(&self, request: ExtractionRequest) -> MenuResult<ParsedMenu> {
        let source = request.into_source()?;
        Ok(self.extract(&source))
    }

    /// Extract a menu from one source unit
    ///
    /// Input without usable items gives an empty menu, never an error.
    pub fn extract(&self, input: &RawSourceUnit) -> ParsedMenu {
        if input.is_empty() {
            debug!("Empty input, nothing to extract");
            return ParsedMenu::empty();
        }

        let candidates = match self.select_candidates(input) {
            Some(candidates) => candidates,
            None => {
                info!("No strategy found menu items");
                return ParsedMenu::empty();
            }
        };

        let items: Vec<MenuItem> = candidates
            .iter()
            .map(|candidate| self.enrich(candidate, input.recognition_confidence()))
            .collect();

        let menu = self.validator.validate(items);
        info!(
            "Extracted {} items in {} categories from {} candidates",
            menu.total_items,
            menu.total_categories,
            candidates.len()
        );
        menu
    }

    /// Output of the first strategy yielding a named candidate
    fn select_candidates(&self, input: &RawSourceUnit) -> Option<Vec<MenuCandidate>> {
        for strategy in &self.strategies {
            let Some(candidates) = strategy.try_extract(input) else {
                debug!("Strategy {} declined", strategy.source());
                continue;
            };

            let named: Vec<MenuCandidate> =
                candidates.into_iter().filter(MenuCandidate::has_name).collect();
            if named.is_empty() {
                debug!("Strategy {} found no named candidates", strategy.source());
                continue;
            }

            info!("Strategy {} produced {} candidates", strategy.source(), named.len());
            return Some(named);
        }
        None
    }

    /// Turn a candidate into a scored item
    fn enrich(&self, candidate: &MenuCandidate, recognition_confidence: Option<f64>) -> MenuItem {
        let raw_name = clean_name(&candidate.raw_name, MAX_NAME_CHARS);
        let names = split_scripts(&raw_name);

        // Attributes come from what the menu says, not from a corrected name
        let text = [raw_name.as_str(), candidate.raw_description.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join(" ");
        let stated_vegetarian = self.classifier.vegetarian(&text);

        let kb_match = self
            .matcher
            .match_name(&raw_name)
            .filter(|m| !contradicts_stated_diet(m, stated_vegetarian));

        let (name_english, name_tamil) = resolve_names(names.english, names.tamil, kb_match.as_ref());

        let price = self
            .normalizer
            .normalize(&candidate.raw_price_token, candidate.source_strategy)
            .unwrap_or(0.0);

        let category = candidate
            .category_hint
            .as_deref()
            .and_then(|hint| self.detector.resolve_hint(hint))
            .or_else(|| kb_match.as_ref().map(|m| m.category.clone()))
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let is_vegetarian = stated_vegetarian
            .or_else(|| kb_match.as_ref().map(|m| m.is_vegetarian))
            .unwrap_or(false);
        let is_spicy =
            self.classifier.is_spicy(&text) || kb_match.as_ref().is_some_and(|m| m.is_spicy);

        let mut dietary_tags = self.classifier.dietary_tags(&text);
        if is_spicy {
            dietary_tags.insert(TAG_SPICY.to_string());
        }
        if is_vegetarian {
            dietary_tags.insert(TAG_VEGETARIAN.to_string());
        }

        let confidence = self.scorer.score(&ScoreInputs {
            match_confidence: kb_match.as_ref().map(|m| m.match_confidence),
            strategy: candidate.source_strategy,
            has_both_names: !name_english.is_empty() && !name_tamil.is_empty(),
            has_specific_category: category != DEFAULT_CATEGORY,
            strict_price: PriceNormalizer::is_strict(&candidate.raw_price_token),
            recognition_confidence,
        });

        let mut item = MenuItem::new(&name_english, &name_tamil, price)
            .with_description(&candidate.raw_description)
            .with_category(&category)
            .with_confidence(confidence);
        item.is_vegetarian = is_vegetarian;
        item.is_spicy = is_spicy;
        item.is_halal = self.classifier.is_halal(&text);
        item.dietary_tags = dietary_tags;
        item.ingredients = self.classifier.extract_ingredients(&text);

        trace!("Enriched '{}' -> {:?}", candidate.raw_name, item);
        item
    }
}

/// Names after knowledge base reconciliation
///
/// Exact matches fill a missing script; fuzzy matches also replace the
/// English name, which is then assumed to be misread. Partial matches leave
/// the names alone.
fn resolve_names(english: String, tamil: String, kb_match: Option<&DishMatch>) -> (String, String) {
    match kb_match {
        Some(m) if m.kind == MatchKind::Exact => (
            if english.is_empty() { m.canonical_english.clone() } else { english },
            if tamil.is_empty() { m.canonical_tamil.clone() } else { tamil },
        ),
        Some(m) if m.kind == MatchKind::Fuzzy => (
            m.canonical_english.clone(),
            if tamil.is_empty() { m.canonical_tamil.clone() } else { tamil },
        ),
        _ => (english, tamil),
    }
}

/// A fuzzy match whose dish disagrees with a vegetarian keyword in the raw text
fn contradicts_stated_diet(kb_match: &DishMatch, stated_vegetarian: Option<bool>) -> bool {
    let contradicts = kb_match.kind == MatchKind::Fuzzy
        && stated_vegetarian.is_some_and(|stated| stated != kb_match.is_vegetarian);
    if contradicts {
        debug!(
            "Ignoring fuzzy match '{}': contradicts stated diet",
            kb_match.canonical_english
        );
    }
    contradicts
}
