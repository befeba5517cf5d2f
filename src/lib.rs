//! # Menu Extract
//!
//! Extracts structured restaurant menu items from OCR text of photographed
//! menus (mixed Tamil/English) and from scraped web pages. Items are matched
//! against a bilingual dish knowledge base, classified for dietary and spice
//! attributes, priced, scored and grouped into categories.
//!
//! The entry point is [`orchestrator::MenuExtractor`].

pub mod attribute_classifier;
pub mod category_detector;
pub mod confidence;
pub mod dish_knowledge;
pub mod dish_matcher;
pub mod html_elements;
pub mod menu_config;
pub mod menu_errors;
pub mod menu_model;
pub mod orchestrator;
pub mod price_normalizer;
pub mod price_patterns;
pub mod strategies;
pub mod text_processing;
pub mod validator;
