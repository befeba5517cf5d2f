//! # Menu Data Model
//!
//! This module defines the data structures flowing through the extraction
//! pipeline, from raw source units to the final grouped menu.
//!
//! ## Core Concepts
//!
//! - **RawSourceUnit**: OCR text or scraped element descriptors, produced elsewhere
//! - **MenuCandidate**: an unvalidated, unenriched strategy output
//! - **MenuItem**: an enriched, scored item ready for catalog import
//! - **ParsedMenu**: items grouped into categories in document order
//!
//! ## Usage
//!
//! ```rust
//! use menu_extract::menu_model::{MenuItem, ParsedMenu};
//!
//! let item = MenuItem::new("Hoppers", "அப்பம்", 76.0)
//!     .with_category("Bread")
//!     .with_confidence(92.5);
//!
//! let menu = ParsedMenu::from_items(vec![item]);
//! assert_eq!(menu.total_items, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::menu_errors::{MenuError, MenuResult};

/// Currency attached to every extracted price
pub const CURRENCY: &str = "LKR";

/// Category used when no header or hint was resolved
pub const DEFAULT_CATEGORY: &str = "Main Course";

/// Longest item name kept, in characters
pub const MAX_NAME_CHARS: usize = 100;

/// Tags that do not break a line when rendered
const INLINE_TAGS: [&str; 10] = ["span", "b", "strong", "em", "i", "a", "small", "sup", "sub", "br"];

/// A DOM-like element handed over by the scraping collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Lowercase tag name (e.g., "div", "h3")
    pub tag: String,
    /// Rendered text of the element
    #[serde(default)]
    pub text: String,
    /// Attributes such as `class` or `data-category`
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Nested elements in document order
    #[serde(default)]
    pub children: Vec<ElementDescriptor>,
}

impl ElementDescriptor {
    /// Create an element with a tag and text
    pub fn new(tag: &str, text: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Add an attribute to this element
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Shorthand for the `class` attribute
    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    /// Append a child element
    pub fn with_child(mut self, child: ElementDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whitespace-separated class tokens
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check whether this is a heading element (h1 to h6)
    pub fn is_heading(&self) -> bool {
        let tag = self.tag.as_bytes();
        tag.len() == 2 && tag[0] == b'h' && (b'1'..=b'6').contains(&tag[1])
    }

    fn is_inline(&self) -> bool {
        INLINE_TAGS.contains(&self.tag.as_str())
    }

    /// Rendered text, falling back to the joined text of the children when
    /// the element itself carries none
    pub fn full_text(&self) -> String {
        let own = self.text.trim();
        if !own.is_empty() {
            return own.to_string();
        }
        self.children
            .iter()
            .map(|c| c.full_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Append the text of every leaf element, in document order
    ///
    /// An element whose children are all inline markup renders as one line.
    pub fn collect_leaf_text(&self, lines: &mut Vec<String>) {
        if self.children.is_empty() || self.children.iter().all(|c| c.is_inline()) {
            let text = self.full_text();
            if !text.is_empty() {
                lines.push(text);
            }
            return;
        }
        for child in &self.children {
            child.collect_leaf_text(lines);
        }
    }
}

/// Raw input to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum RawSourceUnit {
    /// OCR or pasted text, optionally carrying the recognizer's 0-100 confidence
    TextBlock {
        text: String,
        recognition_confidence: Option<f64>,
    },
    /// Scraped element descriptors in document order
    Elements(Vec<ElementDescriptor>),
}

impl RawSourceUnit {
    /// Create a text block without a recognition confidence
    pub fn text(text: &str) -> Self {
        RawSourceUnit::TextBlock {
            text: text.to_string(),
            recognition_confidence: None,
        }
    }

    /// Line-oriented text view of the input
    ///
    /// Element input is flattened to one line per leaf element so the text
    /// strategies can run on it.
    pub fn as_text(&self) -> String {
        match self {
            RawSourceUnit::TextBlock { text, .. } => text.clone(),
            RawSourceUnit::Elements(elements) => {
                let mut lines = Vec::new();
                for element in elements {
                    element.collect_leaf_text(&mut lines);
                }
                lines.join("\n")
            }
        }
    }

    pub fn elements(&self) -> Option<&[ElementDescriptor]> {
        match self {
            RawSourceUnit::Elements(elements) => Some(elements),
            RawSourceUnit::TextBlock { .. } => None,
        }
    }

    pub fn recognition_confidence(&self) -> Option<f64> {
        match self {
            RawSourceUnit::TextBlock {
                recognition_confidence,
                ..
            } => *recognition_confidence,
            RawSourceUnit::Elements(_) => None,
        }
    }

    /// Check whether the input carries nothing to extract from
    pub fn is_empty(&self) -> bool {
        match self {
            RawSourceUnit::TextBlock { text, .. } => text.trim().is_empty(),
            RawSourceUnit::Elements(elements) => elements.is_empty(),
        }
    }
}

/// Caller-facing request: exactly one of `text` or `elements` must be set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub text: Option<String>,
    pub elements: Option<Vec<ElementDescriptor>>,
    pub recognition_confidence: Option<f64>,
}

impl ExtractionRequest {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn from_elements(elements: Vec<ElementDescriptor>) -> Self {
        Self {
            elements: Some(elements),
            ..Default::default()
        }
    }

    /// Validate the input contract and convert into a source unit
    pub fn into_source(self) -> MenuResult<RawSourceUnit> {
        match (self.text, self.elements) {
            (Some(_), Some(_)) => Err(MenuError::ContractViolation(
                "supply either a text block or element descriptors, not both".to_string(),
            )),
            (None, None) => Err(MenuError::ContractViolation(
                "no input supplied: expected a text block or element descriptors".to_string(),
            )),
            (Some(text), None) => Ok(RawSourceUnit::TextBlock {
                text,
                recognition_confidence: self.recognition_confidence,
            }),
            (None, Some(elements)) => Ok(RawSourceUnit::Elements(elements)),
        }
    }
}

/// Which strategy produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceStrategy {
    StructuredElement,
    TextLine,
    PricePatternFallback,
}

impl SourceStrategy {
    /// OCR-derived prices receive the calibration factor; structured prices do not
    pub fn is_ocr_derived(&self) -> bool {
        !matches!(self, SourceStrategy::StructuredElement)
    }
}

impl fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceStrategy::StructuredElement => "structured-element",
            SourceStrategy::TextLine => "text-line",
            SourceStrategy::PricePatternFallback => "price-pattern-fallback",
        };
        write!(f, "{}", name)
    }
}

/// Unvalidated strategy output
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCandidate {
    pub raw_name: String,
    pub raw_description: String,
    pub raw_price_token: String,
    pub category_hint: Option<String>,
    pub source_strategy: SourceStrategy,
}

impl MenuCandidate {
    pub fn new(raw_name: &str, raw_price_token: &str, source_strategy: SourceStrategy) -> Self {
        Self {
            raw_name: raw_name.trim().to_string(),
            raw_description: String::new(),
            raw_price_token: raw_price_token.trim().to_string(),
            category_hint: None,
            source_strategy,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.raw_description = description.trim().to_string();
        self
    }

    pub fn with_category_hint(mut self, hint: Option<String>) -> Self {
        self.category_hint = hint.filter(|h| !h.trim().is_empty());
        self
    }

    pub fn has_name(&self) -> bool {
        !self.raw_name.trim().is_empty()
    }
}

/// A fully enriched and scored menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name_english: String,
    pub name_tamil: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub is_halal: Option<bool>,
    pub dietary_tags: BTreeSet<String>,
    pub ingredients: Vec<String>,
    /// Confidence level (0.0 to 100.0)
    pub confidence: f64,
}

impl MenuItem {
    /// Create a new item with names and price
    pub fn new(name_english: &str, name_tamil: &str, price: f64) -> Self {
        Self {
            name_english: name_english.trim().to_string(),
            name_tamil: name_tamil.trim().to_string(),
            description: String::new(),
            price,
            currency: CURRENCY.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            is_vegetarian: false,
            is_spicy: false,
            is_halal: None,
            dietary_tags: BTreeSet::new(),
            ingredients: Vec::new(),
            confidence: 0.0,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the confidence level, clamped to 0-100
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 100.0);
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name_english.is_empty() || !self.name_tamil.is_empty()
    }

    /// Preferred display name: English, then Tamil
    pub fn display_name(&self) -> &str {
        if self.name_english.is_empty() {
            &self.name_tamil
        } else {
            &self.name_english
        }
    }
}

/// Items sharing a category, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Final pipeline result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMenu {
    pub categories: Vec<Category>,
    pub total_items: usize,
    pub total_categories: usize,
}

impl ParsedMenu {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Group items into categories, keeping first-seen category order and
    /// insertion order within each category
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        let total_items = items.len();

        for item in items {
            match categories.iter_mut().find(|c| c.name == item.category) {
                Some(category) => category.items.push(item),
                None => categories.push(Category {
                    name: item.category.clone(),
                    items: vec![item],
                }),
            }
        }

        Self {
            total_categories: categories.len(),
            categories,
            total_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All items in category order
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name_english.is_empty(), self.name_tamil.is_empty()) {
            (false, false) => write!(f, "{} / {}", self.name_english, self.name_tamil)?,
            _ => write!(f, "{}", self.display_name())?,
        }
        write!(f, " - {} {:.2}", self.currency, self.price)?;

        let mut flags = Vec::new();
        if self.is_vegetarian {
            flags.push("veg");
        }
        if self.is_spicy {
            flags.push("spicy");
        }
        if self.is_halal == Some(true) {
            flags.push("halal");
        }
        if !flags.is_empty() {
            write!(f, " [{}]", flags.join(", "))?;
        }

        write!(f, " ({:.0}%)", self.confidence)
    }
}

impl fmt::Display for ParsedMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Menu ({} items in {} categories):",
            self.total_items, self.total_categories
        )?;

        for category in &self.categories {
            writeln!(f, "{}", category.name)?;
            for item in &category.items {
                writeln!(f, "  • {}", item)?;
            }
        }

        Ok(())
    }
}
