//! # Pipeline Configuration Module
//!
//! This module defines the configuration consumed by the extraction pipeline:
//! price calibration, the confidence floor, the category header table, the
//! ingredient vocabulary and the bilingual dietary keyword sets. Every piece of
//! business vocabulary lives here so it can be replaced without code changes.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::menu_errors::{MenuError, MenuResult};

// Constants for pipeline configuration
pub const DEFAULT_PRICE_CALIBRATION_FACTOR: f64 = 0.95;
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 10.0;
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

// Environment overrides
pub const ENV_CONFIG_PATH: &str = "MENU_CONFIG_PATH";
pub const ENV_PRICE_CALIBRATION_FACTOR: &str = "MENU_PRICE_CALIBRATION_FACTOR";
pub const ENV_CONFIDENCE_FLOOR: &str = "MENU_CONFIDENCE_FLOOR";
pub const ENV_MAX_EDIT_DISTANCE: &str = "MENU_MAX_EDIT_DISTANCE";

// Dietary keyword set tags
pub const TAG_SPICY: &str = "Spicy";
pub const TAG_VEGETARIAN: &str = "Vegetarian";
pub const TAG_NON_VEGETARIAN: &str = "Non-Vegetarian";
pub const TAG_HALAL: &str = "Halal";
pub const TAG_GLUTEN_FREE: &str = "Gluten-Free";
/// Curry words only count as spicy next to a heat modifier
pub const TAG_CURRY: &str = "Curry";
pub const TAG_HEAT_MODIFIER: &str = "Heat-Modifier";

/// Keyword sets that must be present for the classifier to work
pub const REQUIRED_KEYWORD_SETS: [&str; 5] = [
    TAG_SPICY,
    TAG_VEGETARIAN,
    TAG_NON_VEGETARIAN,
    TAG_HALAL,
    TAG_GLUTEN_FREE,
];

/// Keywords for one tag, split by script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    /// Latin-script keywords, matched case-insensitively on word boundaries
    #[serde(default)]
    pub english: Vec<String>,
    /// Tamil-script keywords, matched by substring
    #[serde(default)]
    pub tamil: Vec<String>,
}

impl KeywordSet {
    pub fn new(english: &[&str], tamil: &[&str]) -> Self {
        Self {
            english: english.iter().map(|s| s.to_string()).collect(),
            tamil: tamil.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.english.is_empty() && self.tamil.is_empty()
    }
}

/// One row of the header to canonical category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub keyword: String,
    pub category: String,
}

/// One ingredient of the vocabulary: canonical English name plus aliases in
/// either script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientTerm {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Configuration structure for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Multiplier applied to every OCR-derived price
    pub price_calibration_factor: f64,
    /// Items scoring below this confidence are dropped
    pub confidence_floor: f64,
    /// Maximum edit distance for the fuzzy knowledge base tier
    pub max_edit_distance: usize,
    /// Ordered header keyword table; first matching row wins
    pub category_header_table: Vec<HeaderMapping>,
    pub ingredient_vocabulary: Vec<IngredientTerm>,
    pub dietary_keyword_sets: BTreeMap<String, KeywordSet>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            price_calibration_factor: DEFAULT_PRICE_CALIBRATION_FACTOR,
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            category_header_table: default_header_table(),
            ingredient_vocabulary: default_ingredient_vocabulary(),
            dietary_keyword_sets: default_dietary_keyword_sets(),
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON configuration; absent keys take their defaults
    pub fn from_json_str(json: &str) -> MenuResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> MenuResult<Self> {
        let path = path.as_ref();
        info!("Loading pipeline configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build the configuration from the process environment
    ///
    /// Loads `.env` if present, starts from the file named by
    /// `MENU_CONFIG_PATH` (or the defaults) and applies scalar overrides.
    pub fn from_env() -> MenuResult<Self> {
        dotenv::dotenv().ok();

        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply scalar overrides from a key lookup and re-validate
    pub fn with_overrides<F>(mut self, lookup: F) -> MenuResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_PRICE_CALIBRATION_FACTOR) {
            self.price_calibration_factor = parse_override(ENV_PRICE_CALIBRATION_FACTOR, &raw)?;
            debug!("Calibration factor overridden to {}", self.price_calibration_factor);
        }
        if let Some(raw) = lookup(ENV_CONFIDENCE_FLOOR) {
            self.confidence_floor = parse_override(ENV_CONFIDENCE_FLOOR, &raw)?;
            debug!("Confidence floor overridden to {}", self.confidence_floor);
        }
        if let Some(raw) = lookup(ENV_MAX_EDIT_DISTANCE) {
            self.max_edit_distance = parse_override(ENV_MAX_EDIT_DISTANCE, &raw)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject configurations that would make the pipeline misbehave
    pub fn validate(&self) -> MenuResult<()> {
        if !self.price_calibration_factor.is_finite() || self.price_calibration_factor <= 0.0 {
            return Err(MenuError::Configuration(format!(
                "priceCalibrationFactor must be a positive number, got {}",
                self.price_calibration_factor
            )));
        }

        if !(0.0..=100.0).contains(&self.confidence_floor) {
            return Err(MenuError::Configuration(format!(
                "confidenceFloor must be within 0-100, got {}",
                self.confidence_floor
            )));
        }

        if self.category_header_table.is_empty() {
            return Err(MenuError::Configuration(
                "categoryHeaderTable must not be empty".to_string(),
            ));
        }

        if let Some(row) = self
            .category_header_table
            .iter()
            .find(|row| row.keyword.trim().is_empty() || row.category.trim().is_empty())
        {
            return Err(MenuError::Configuration(format!(
                "categoryHeaderTable row has an empty keyword or category: {:?}",
                row
            )));
        }

        for tag in REQUIRED_KEYWORD_SETS {
            match self.dietary_keyword_sets.get(tag) {
                Some(set) if !set.is_empty() => {}
                Some(_) => {
                    return Err(MenuError::Configuration(format!(
                        "dietaryKeywordSets.{} has no keywords",
                        tag
                    )))
                }
                None => {
                    return Err(MenuError::Configuration(format!(
                        "dietaryKeywordSets is missing required key '{}'",
                        tag
                    )))
                }
            }
        }

        Ok(())
    }

    /// Keyword set for a tag, empty when absent
    pub fn keyword_set(&self, tag: &str) -> KeywordSet {
        self.dietary_keyword_sets.get(tag).cloned().unwrap_or_default()
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> MenuResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| MenuError::Configuration(format!("{} has an invalid value '{}'", key, raw)))
}

fn default_header_table() -> Vec<HeaderMapping> {
    let rows: [(&str, &str); 34] = [
        ("rice", "Rice"),
        ("biryani", "Rice"),
        ("kottu", "Kottu"),
        ("hopper", "Hoppers"),
        ("bread", "Bread"),
        ("roti", "Bread"),
        ("breakfast", "Breakfast"),
        ("soup", "Soups"),
        ("curry", "Curries"),
        ("curries", "Curries"),
        ("seafood", "Seafood"),
        ("starter", "Starters"),
        ("appetizer", "Starters"),
        ("short eats", "Short Eats"),
        ("snack", "Snacks"),
        ("dessert", "Desserts"),
        ("sweet", "Desserts"),
        ("beverage", "Beverages"),
        ("drink", "Beverages"),
        ("juice", "Beverages"),
        ("main", "Main Course"),
        ("கறி", "Curries"),
        ("குழம்பு", "Curries"),
        ("ரொட்டி", "Bread"),
        ("காலை", "Breakfast"),
        ("சோறு", "Rice"),
        ("சாதம்", "Rice"),
        ("பிரியாணி", "Rice"),
        ("கொத்து", "Kottu"),
        ("சூப்", "Soups"),
        ("இனிப்பு", "Desserts"),
        ("பானம்", "Beverages"),
        ("கடல் உணவு", "Seafood"),
        ("சிற்றுண்டி", "Snacks"),
    ];

    rows.iter()
        .map(|(keyword, category)| HeaderMapping {
            keyword: keyword.to_string(),
            category: category.to_string(),
        })
        .collect()
}

fn default_ingredient_vocabulary() -> Vec<IngredientTerm> {
    let terms: [(&str, &[&str]); 20] = [
        ("chicken", &["கோழி"]),
        ("mutton", &["ஆட்டு"]),
        ("fish", &["மீன்"]),
        ("prawn", &["prawns", "shrimp", "இறால்"]),
        ("crab", &["crabs", "நண்டு"]),
        ("squid", &["cuttlefish", "கணவாய்"]),
        ("beef", &["மாட்டு"]),
        ("egg", &["eggs", "முட்டை"]),
        ("rice", &["அரிசி", "சோறு", "சாதம்"]),
        ("coconut", &["தேங்காய்"]),
        ("potato", &["potatoes", "உருளைக்கிழங்கு"]),
        ("dhal", &["dal", "parippu", "lentils", "பருப்பு"]),
        ("paneer", &["பனீர்"]),
        ("cheese", &["சீஸ்"]),
        ("onion", &["onions", "வெங்காயம்"]),
        ("garlic", &["பூண்டு"]),
        ("ginger", &["இஞ்சி"]),
        ("curry leaves", &["கறிவேப்பிலை"]),
        ("chili", &["chilli", "chillies", "மிளகாய்"]),
        ("tomato", &["tomatoes", "தக்காளி"]),
    ];

    terms
        .iter()
        .map(|(name, aliases)| IngredientTerm {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        })
        .collect()
}

fn default_dietary_keyword_sets() -> BTreeMap<String, KeywordSet> {
    let mut sets = BTreeMap::new();

    sets.insert(
        TAG_SPICY.to_string(),
        KeywordSet::new(
            &["spicy", "hot", "chili", "chilli", "chillies", "pepper", "devilled", "deviled"],
            &["காரம்", "கார", "மிளகாய்", "மிளகு"],
        ),
    );
    sets.insert(
        TAG_CURRY.to_string(),
        KeywordSet::new(&["curry", "curries"], &["கறி", "குழம்பு"]),
    );
    sets.insert(
        TAG_HEAT_MODIFIER.to_string(),
        KeywordSet::new(&["red", "black", "jaffna", "fiery", "kochchi"], &["சிவப்பு", "யாழ்ப்பாண"]),
    );
    sets.insert(
        TAG_VEGETARIAN.to_string(),
        KeywordSet::new(
            &["veg", "vegetable", "vegetables", "vegetarian", "vegan", "paneer", "dhal", "dal", "parippu"],
            &["சைவ", "காய்கறி", "பருப்பு"],
        ),
    );
    // அசைவ (non-vegetarian) contains சைவ, so this set is always checked first
    sets.insert(
        TAG_NON_VEGETARIAN.to_string(),
        KeywordSet::new(
            &[
                "chicken", "mutton", "fish", "prawn", "prawns", "beef", "crab", "crabs", "meat",
                "pork", "lamb", "squid", "cuttlefish", "egg", "eggs", "seafood", "lobster",
            ],
            &["அசைவ", "கோழி", "ஆட்டு", "மீன்", "இறால்", "மாட்டு", "நண்டு", "இறைச்சி", "முட்டை", "கணவாய்"],
        ),
    );
    sets.insert(TAG_HALAL.to_string(), KeywordSet::new(&["halal"], &["ஹலால்"]));
    sets.insert(
        TAG_GLUTEN_FREE.to_string(),
        KeywordSet::new(&["gluten-free", "gluten free"], &[]),
    );

    sets
}
