//! # Dish Knowledge Base
//!
//! A static bilingual dictionary of known dishes used to canonicalize
//! extracted names and to boost confidence. The base is loaded once and shared
//! read-only; adding a dish means appending a record, not changing code.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::menu_errors::{MenuError, MenuResult};
use crate::text_processing::normalize_for_match;

/// Dishes shipped with the crate
const BUILTIN_DISHES: &str = include_str!("../data/dishes.json");

/// One known dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishKnowledgeEntry {
    pub tamil: String,
    pub english: String,
    pub default_category: String,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
}

impl DishKnowledgeEntry {
    pub fn new(tamil: &str, english: &str, default_category: &str) -> Self {
        Self {
            tamil: tamil.to_string(),
            english: english.to_string(),
            default_category: default_category.to_string(),
            is_vegetarian: false,
            is_spicy: false,
        }
    }

    pub fn vegetarian(mut self) -> Self {
        self.is_vegetarian = true;
        self
    }

    pub fn spicy(mut self) -> Self {
        self.is_spicy = true;
        self
    }
}

/// An entry with its names pre-normalized for matching
#[derive(Debug, Clone)]
pub(crate) struct IndexedEntry {
    pub entry: DishKnowledgeEntry,
    pub english_key: String,
    pub tamil_key: String,
}

/// Immutable, validated dish dictionary
#[derive(Debug, Clone)]
pub struct DishKnowledgeBase {
    entries: Vec<IndexedEntry>,
}

impl DishKnowledgeBase {
    /// Validate entries and build the base
    ///
    /// Every entry needs both names and a category; English names must be
    /// unique after normalization.
    pub fn new(entries: Vec<DishKnowledgeEntry>) -> MenuResult<Self> {
        let mut seen = HashSet::new();
        let mut indexed = Vec::with_capacity(entries.len());

        for (position, entry) in entries.into_iter().enumerate() {
            let english_key = normalize_for_match(&entry.english);
            let tamil_key = normalize_for_match(&entry.tamil);

            if english_key.is_empty() || tamil_key.is_empty() {
                return Err(MenuError::KnowledgeBase(format!(
                    "entry {} needs both a Tamil and an English name: {:?}",
                    position, entry
                )));
            }
            if entry.default_category.trim().is_empty() {
                return Err(MenuError::KnowledgeBase(format!(
                    "entry {} ('{}') has no default category",
                    position, entry.english
                )));
            }
            if !seen.insert(english_key.clone()) {
                return Err(MenuError::KnowledgeBase(format!(
                    "duplicate dish '{}' at entry {}",
                    entry.english, position
                )));
            }

            indexed.push(IndexedEntry {
                entry,
                english_key,
                tamil_key,
            });
        }

        Ok(Self { entries: indexed })
    }

    /// The dictionary bundled with the crate
    pub fn builtin() -> MenuResult<Self> {
        let base = Self::from_json_str(BUILTIN_DISHES)?;
        info!("Loaded built-in dish knowledge base with {} entries", base.len());
        Ok(base)
    }

    /// Parse a JSON list of entries
    pub fn from_json_str(json: &str) -> MenuResult<Self> {
        let entries: Vec<DishKnowledgeEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a JSON list of entries from disk
    pub fn from_file(path: impl AsRef<Path>) -> MenuResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let base = Self::from_json_str(&content)?;
        info!(
            "Loaded dish knowledge base from {} with {} entries",
            path.display(),
            base.len()
        );
        Ok(base)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &DishKnowledgeEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    pub(crate) fn indexed(&self) -> &[IndexedEntry] {
        &self.entries
    }
}
