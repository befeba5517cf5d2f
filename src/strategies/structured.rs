//! Structured-element strategy: finds item containers in scraped markup by
//! class hints and reads name, description, price and category from them.

use log::{debug, trace};

use super::ExtractionStrategy;
use crate::menu_model::{
    ElementDescriptor, MenuCandidate, RawSourceUnit, SourceStrategy, MAX_NAME_CHARS,
};
use crate::price_patterns::{BARE_AMOUNT_REGEX, PRICE_TOKEN_REGEX};
use crate::text_processing::clean_name;

/// Whole class tokens marking an item container, in priority order
const CONTAINER_TOKENS: [&str; 4] = ["menu-item", "food-item", "dish", "product"];
/// Class substrings tried when no token matched
const CONTAINER_WILDCARDS: [&str; 3] = ["menu", "food", "dish"];

const NAME_CLASS_HINTS: [&str; 3] = ["item-name", "name", "title"];
const NAME_TAG_HINTS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b"];
const DESCRIPTION_CLASS_HINTS: [&str; 3] = ["description", "desc", "details"];
const PRICE_CLASS_HINTS: [&str; 3] = ["price", "cost", "amount"];

const CATEGORY_ATTRIBUTE: &str = "data-category";
const MAX_DESCRIPTION_CHARS: usize = 300;

/// Position of an element: its sibling list and index within it
type Frame<'a> = (&'a [ElementDescriptor], usize);

/// An item container and the path leading to it, outermost frame first
struct Container<'a> {
    element: &'a ElementDescriptor,
    path: Vec<Frame<'a>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredElementStrategy;

impl StructuredElementStrategy {
    pub fn new() -> Self {
        Self
    }

    fn find_containers<'a>(&self, elements: &'a [ElementDescriptor]) -> Vec<Container<'a>> {
        for token in CONTAINER_TOKENS {
            let mut found = Vec::new();
            find_outermost(elements, &mut Vec::new(), &|e| has_class_token(e, token), &mut found);
            if !found.is_empty() {
                debug!("Container hint '{}' matched {} elements", token, found.len());
                return found;
            }
        }

        for wildcard in CONTAINER_WILDCARDS {
            let mut found = Vec::new();
            find_innermost(
                elements,
                &mut Vec::new(),
                &|e| has_class_containing(e, wildcard),
                &mut found,
            );
            if !found.is_empty() {
                debug!("Container wildcard '{}' matched {} elements", wildcard, found.len());
                return found;
            }
        }

        Vec::new()
    }

    fn candidate_from(&self, container: &Container<'_>) -> Option<MenuCandidate> {
        let element = container.element;

        let name_element = find_by_class_hints(element, &NAME_CLASS_HINTS)
            .or_else(|| find_by_tags(element, &NAME_TAG_HINTS))?;
        let name = clean_name(&name_element.full_text(), MAX_NAME_CHARS);
        if name.is_empty() {
            trace!("Container without a usable name skipped");
            return None;
        }

        let description = find_by_class_hints(element, &DESCRIPTION_CLASS_HINTS)
            .or_else(|| find_by_tags(element, &["p"]))
            .filter(|d| !std::ptr::eq(*d, name_element))
            .map(|d| clean_name(&d.full_text(), MAX_DESCRIPTION_CHARS))
            .unwrap_or_default();

        let price_token = price_token(element);
        let category = category_for(container);

        trace!(
            "Structured candidate '{}' price '{}' category {:?}",
            name,
            price_token,
            category
        );

        Some(
            MenuCandidate::new(&name, &price_token, SourceStrategy::StructuredElement)
                .with_description(&description)
                .with_category_hint(category),
        )
    }
}

impl ExtractionStrategy for StructuredElementStrategy {
    fn source(&self) -> SourceStrategy {
        SourceStrategy::StructuredElement
    }

    fn try_extract(&self, input: &RawSourceUnit) -> Option<Vec<MenuCandidate>> {
        let elements = input.elements()?;
        let containers = self.find_containers(elements);
        if containers.is_empty() {
            debug!("No item containers found");
            return None;
        }

        Some(
            containers
                .iter()
                .filter_map(|container| self.candidate_from(container))
                .collect(),
        )
    }
}

fn has_class_token(element: &ElementDescriptor, token: &str) -> bool {
    element.classes().any(|class| class.eq_ignore_ascii_case(token))
}

fn has_class_containing(element: &ElementDescriptor, fragment: &str) -> bool {
    element
        .classes()
        .any(|class| class.to_ascii_lowercase().contains(fragment))
}

/// Matches that have no matching ancestor
fn find_outermost<'a>(
    siblings: &'a [ElementDescriptor],
    path: &mut Vec<Frame<'a>>,
    matches: &dyn Fn(&ElementDescriptor) -> bool,
    found: &mut Vec<Container<'a>>,
) {
    for (index, element) in siblings.iter().enumerate() {
        path.push((siblings, index));
        if matches(element) {
            found.push(Container {
                element,
                path: path.clone(),
            });
        } else {
            find_outermost(&element.children, path, matches, found);
        }
        path.pop();
    }
}

/// Matches with children and no matching descendant; returns whether
/// anything in `siblings` matched
fn find_innermost<'a>(
    siblings: &'a [ElementDescriptor],
    path: &mut Vec<Frame<'a>>,
    matches: &dyn Fn(&ElementDescriptor) -> bool,
    found: &mut Vec<Container<'a>>,
) -> bool {
    let mut any = false;
    for (index, element) in siblings.iter().enumerate() {
        path.push((siblings, index));
        let below = find_innermost(&element.children, path, matches, found);
        if !below && !element.children.is_empty() && matches(element) {
            found.push(Container {
                element,
                path: path.clone(),
            });
            any = true;
        }
        any |= below;
        path.pop();
    }
    any
}

/// First descendant, in document order, matching `predicate`
fn find_descendant<'a>(
    element: &'a ElementDescriptor,
    predicate: &dyn Fn(&ElementDescriptor) -> bool,
) -> Option<&'a ElementDescriptor> {
    element.children.iter().find_map(|child| {
        if predicate(child) {
            Some(child)
        } else {
            find_descendant(child, predicate)
        }
    })
}

fn find_by_class_hints<'a>(
    element: &'a ElementDescriptor,
    hints: &[&str],
) -> Option<&'a ElementDescriptor> {
    hints
        .iter()
        .find_map(|hint| find_descendant(element, &|e| has_class_containing(e, hint)))
}

fn find_by_tags<'a>(element: &'a ElementDescriptor, tags: &[&str]) -> Option<&'a ElementDescriptor> {
    tags.iter()
        .find_map(|tag| find_descendant(element, &|e| e.tag.eq_ignore_ascii_case(tag)))
}

/// Raw price token for a container, empty when none is found
///
/// Price-like elements may hold a bare amount; elsewhere a currency marker
/// is required.
fn price_token(container: &ElementDescriptor) -> String {
    if let Some(price_element) = find_by_class_hints(container, &PRICE_CLASS_HINTS) {
        let text = price_element.full_text();
        if let Some(m) = PRICE_TOKEN_REGEX.find(&text) {
            return m.as_str().to_string();
        }
        if let Some(m) = BARE_AMOUNT_REGEX.find(&text) {
            return m.as_str().to_string();
        }
    }

    PRICE_TOKEN_REGEX
        .find(&container.full_text())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Category from the nearest `data-category`, else the nearest preceding
/// heading sibling of the container or one of its ancestors
fn category_for(container: &Container<'_>) -> Option<String> {
    let from_attribute = container.path.iter().rev().find_map(|(siblings, index)| {
        siblings[*index]
            .attr(CATEGORY_ATTRIBUTE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    });
    if from_attribute.is_some() {
        return from_attribute;
    }

    container.path.iter().rev().find_map(|(siblings, index)| {
        siblings[..*index]
            .iter()
            .rev()
            .find(|sibling| sibling.is_heading())
            .map(|heading| heading.full_text())
            .filter(|text| !text.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: &str) -> ElementDescriptor {
        ElementDescriptor::new("div", "")
            .with_class("menu-item")
            .with_child(ElementDescriptor::new("h3", name))
            .with_child(ElementDescriptor::new("p", "Served with sambol"))
            .with_child(ElementDescriptor::new("span", price).with_class("price"))
    }

    fn extract(elements: Vec<ElementDescriptor>) -> Option<Vec<MenuCandidate>> {
        StructuredElementStrategy::new().try_extract(&RawSourceUnit::Elements(elements))
    }

    #[test]
    fn test_menu_item_containers() {
        let candidates = extract(vec![item("Hoppers", "LKR 80"), item("Pittu", "150")]).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].raw_name, "Hoppers");
        assert_eq!(candidates[0].raw_price_token, "LKR 80");
        assert_eq!(candidates[0].raw_description, "Served with sambol");
        assert_eq!(candidates[1].raw_price_token, "150");
        assert_eq!(candidates[1].source_strategy, SourceStrategy::StructuredElement);
    }

    #[test]
    fn test_container_without_name_yields_nothing() {
        let nameless = ElementDescriptor::new("div", "")
            .with_class("menu-item")
            .with_child(ElementDescriptor::new("span", "LKR 500").with_class("price"));

        let candidates = extract(vec![nameless]).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_missing_price_gives_empty_token() {
        let no_price = ElementDescriptor::new("div", "")
            .with_class("dish")
            .with_child(ElementDescriptor::new("strong", "Sothi"));

        let candidates = extract(vec![no_price]).unwrap();
        assert_eq!(candidates[0].raw_name, "Sothi");
        assert_eq!(candidates[0].raw_price_token, "");
    }

    #[test]
    fn test_price_found_anywhere_with_currency() {
        let container = ElementDescriptor::new("li", "")
            .with_class("product")
            .with_child(ElementDescriptor::new("span", "Milk Tea").with_class("title"))
            .with_child(ElementDescriptor::new("span", "only Rs. 120 today"));

        let candidates = extract(vec![container]).unwrap();
        assert_eq!(candidates[0].raw_name, "Milk Tea");
        assert_eq!(candidates[0].raw_price_token, "Rs. 120");
    }

    #[test]
    fn test_data_category_on_ancestor() {
        let section = ElementDescriptor::new("section", "")
            .with_attr("data-category", "Rice Dishes")
            .with_child(item("Fried Rice", "LKR 650"));

        let candidates = extract(vec![section]).unwrap();
        assert_eq!(candidates[0].category_hint.as_deref(), Some("Rice Dishes"));
    }

    #[test]
    fn test_preceding_heading_category() {
        let section = ElementDescriptor::new("div", "")
            .with_child(ElementDescriptor::new("h2", "Bread"))
            .with_child(item("Hoppers", "LKR 80"))
            .with_child(item("Parotta", "LKR 90"));
        let later = ElementDescriptor::new("div", "")
            .with_child(ElementDescriptor::new("h2", "Beverages"))
            .with_child(ElementDescriptor::new("div", "").with_child(item("Plain Tea", "LKR 60")));

        let candidates = extract(vec![section, later]).unwrap();
        let hints: Vec<Option<&str>> = candidates.iter().map(|c| c.category_hint.as_deref()).collect();
        assert_eq!(hints, vec![Some("Bread"), Some("Bread"), Some("Beverages")]);
    }

    #[test]
    fn test_wildcard_prefers_innermost_container() {
        let menu = ElementDescriptor::new("div", "")
            .with_class("menu-list")
            .with_child(
                ElementDescriptor::new("div", "")
                    .with_class("menu-entry")
                    .with_child(ElementDescriptor::new("span", "Idli").with_class("dish-name"))
                    .with_child(ElementDescriptor::new("span", "LKR 100").with_class("cost")),
            )
            .with_child(
                ElementDescriptor::new("div", "")
                    .with_class("menu-entry")
                    .with_child(ElementDescriptor::new("span", "Dosai").with_class("dish-name"))
                    .with_child(ElementDescriptor::new("span", "LKR 180").with_class("cost")),
            );

        let candidates = extract(vec![menu]).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.raw_name.as_str()).collect();
        assert_eq!(names, vec!["Idli", "Dosai"]);
        assert_eq!(candidates[1].raw_price_token, "LKR 180");
    }

    #[test]
    fn test_declines_text_and_unmarked_elements() {
        let strategy = StructuredElementStrategy::new();
        assert!(strategy.try_extract(&RawSourceUnit::text("Hoppers LKR 80")).is_none());

        let plain = vec![ElementDescriptor::new("p", "Hoppers LKR 80")];
        assert!(extract(plain).is_none());
    }
}
