//! # Menu Validator
//!
//! Last pipeline stage: discards items that violate the item invariants and
//! groups the survivors into a [`ParsedMenu`].

use log::{debug, warn};

use crate::menu_config::DEFAULT_CONFIDENCE_FLOOR;
use crate::menu_model::{MenuItem, ParsedMenu};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuValidator {
    confidence_floor: f64,
}

impl MenuValidator {
    pub fn new(confidence_floor: f64) -> Self {
        Self { confidence_floor }
    }

    /// Why an item must be discarded, `None` when it is valid
    pub fn rejection_reason(&self, item: &MenuItem) -> Option<String> {
        if !item.has_name() {
            return Some("no name in either script".to_string());
        }
        if !item.price.is_finite() || item.price <= 0.0 {
            return Some(format!("invalid price {}", item.price));
        }
        if item.confidence < self.confidence_floor {
            return Some(format!(
                "confidence {:.1} below floor {:.1}",
                item.confidence, self.confidence_floor
            ));
        }
        None
    }

    /// Drop invalid items and group the rest, preserving first-seen
    /// category order and item order
    pub fn validate(&self, items: Vec<MenuItem>) -> ParsedMenu {
        let total = items.len();
        let valid: Vec<MenuItem> = items
            .into_iter()
            .filter(|item| match self.rejection_reason(item) {
                Some(reason) => {
                    warn!("Dropping item '{}': {}", item.display_name(), reason);
                    false
                }
                None => true,
            })
            .collect();

        debug!("Validator kept {} of {} items", valid.len(), total);
        ParsedMenu::from_items(valid)
    }
}

impl Default for MenuValidator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_items_are_dropped() {
        let validator = MenuValidator::default();
        let items = vec![
            MenuItem::new("Hoppers", "", 76.0).with_confidence(50.0),
            MenuItem::new("", "", 100.0).with_confidence(50.0),
            MenuItem::new("Free Water", "", 0.0).with_confidence(50.0),
            MenuItem::new("Mystery", "", f64::INFINITY).with_confidence(50.0),
            MenuItem::new("Noise", "", 100.0).with_confidence(5.0),
            MenuItem::new("", "இட்லி", 120.0).with_confidence(50.0),
        ];

        let menu = validator.validate(items);
        let names: Vec<&str> = menu.items().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["Hoppers", "இட்லி"]);
        assert_eq!(menu.total_items, 2);
    }

    #[test]
    fn test_grouping_in_first_seen_order() {
        let validator = MenuValidator::new(0.0);
        let items = vec![
            MenuItem::new("Crab Curry", "", 1140.0).with_category("Rice"),
            MenuItem::new("Hoppers", "", 76.0).with_category("Bread"),
            MenuItem::new("Fried Rice", "", 600.0).with_category("Rice"),
        ];

        let menu = validator.validate(items);
        let categories: Vec<&str> = menu.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(categories, vec!["Rice", "Bread"]);
        assert_eq!(menu.categories[0].items.len(), 2);
        assert_eq!(menu.total_categories, 2);
    }

    #[test]
    fn test_empty_input() {
        let menu = MenuValidator::default().validate(Vec::new());
        assert!(menu.is_empty());
        assert_eq!(menu.total_categories, 0);
    }
}
