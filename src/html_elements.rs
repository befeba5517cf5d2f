//! # HTML Adapter
//!
//! Converts a saved HTML page into the [`ElementDescriptor`] tree consumed by
//! the structured-element strategy. Each descriptor carries the element's
//! whole rendered text with whitespace collapsed.

use lazy_static::lazy_static;
use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::menu_model::ElementDescriptor;

/// Elements whose content is never menu text
const SKIPPED_TAGS: [&str; 6] = ["script", "style", "noscript", "template", "head", "svg"];

lazy_static! {
    static ref BODY_SELECTOR: Selector =
        Selector::parse("body").expect("Body selector should be valid");
}

/// Parse an HTML document into the element descriptors under `<body>`
///
/// # Examples
///
/// ```rust
/// use menu_extract::html_elements::parse_html;
///
/// let elements = parse_html(r#"<div class="dish"><h3>Pittu</h3><span>LKR 150</span></div>"#);
/// assert_eq!(elements[0].tag, "div");
/// assert_eq!(elements[0].text, "Pittu LKR 150");
/// assert_eq!(elements[0].children.len(), 2);
/// ```
pub fn parse_html(html: &str) -> Vec<ElementDescriptor> {
    let document = Html::parse_document(html);

    let elements: Vec<ElementDescriptor> = match document.select(&BODY_SELECTOR).next() {
        Some(body) => child_descriptors(body),
        None => child_descriptors(document.root_element()),
    };

    debug!("Parsed HTML into {} top-level elements", elements.len());
    elements
}

fn child_descriptors(parent: ElementRef<'_>) -> Vec<ElementDescriptor> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter_map(to_descriptor)
        .collect()
}

fn to_descriptor(element: ElementRef<'_>) -> Option<ElementDescriptor> {
    let tag = element.value().name().to_ascii_lowercase();
    if SKIPPED_TAGS.contains(&tag.as_str()) {
        return None;
    }

    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<&str>>()
        .join(" ");

    Some(ElementDescriptor {
        tag,
        text,
        attributes: element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect(),
        children: child_descriptors(element),
    })
}
