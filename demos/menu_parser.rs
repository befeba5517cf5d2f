//! # Menu Parser Example
//!
//! This example demonstrates the extraction pipeline on the three kinds of
//! input it accepts: line-structured OCR text, run-together OCR text that
//! only the price-pattern fallback can split, and scraped HTML. It also shows
//! how a custom configuration changes the price calibration.

use std::sync::Arc;

use menu_extract::dish_knowledge::DishKnowledgeBase;
use menu_extract::html_elements::parse_html;
use menu_extract::menu_config::PipelineConfig;
use menu_extract::menu_model::{ExtractionRequest, RawSourceUnit};
use menu_extract::orchestrator::MenuExtractor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍛 Menu Extraction Example");
    println!("==========================\n");

    let extractor = MenuExtractor::with_defaults()?;

    // Example 1: OCR text with category headers
    println!("📷 Example 1: Bilingual OCR Menu");
    println!("--------------------------------");

    let ocr_menu = r#"
    Jaffna Kitchen

    Rice Dishes
    நண்டு கறி (Jaffna Crab Curry) LKR 1200
    Chicken Biryani LKR 1,150
    Bread
    அப்பம் (Hoppers) LKR 80
    இடியப்பம் LKR 200
    Beverages
    Plain Tea - Rs. 60/-
    "#;

    let menu = extractor.extract(&RawSourceUnit::TextBlock {
        text: ocr_menu.to_string(),
        recognition_confidence: Some(88.0),
    });
    print!("{}", menu);

    println!("\n");

    // Example 2: OCR text without usable line breaks
    println!("🧾 Example 2: Run-Together OCR Text");
    println!("-----------------------------------");

    let blob = "Ulundu Vadai Rs. 70 Parippu Vadai Rs. 70 Pittu LKR 150 Sothi LKR 120";
    let menu = extractor.extract(&RawSourceUnit::text(blob));
    for item in menu.items() {
        println!("  {} ({})", item, item.category);
    }

    println!("\n");

    // Example 3: Scraped restaurant page
    println!("🌐 Example 3: Restaurant Web Page");
    println!("---------------------------------");

    let page = r#"
    <html><body>
      <h2>Kottu</h2>
      <div class="menu-item">
        <h3 class="item-name">Chicken Kottu</h3>
        <p class="desc">Chopped roti with chicken, egg and leeks</p>
        <span class="price">1,250.00</span>
      </div>
      <div class="menu-item" data-category="Curries">
        <h3 class="item-name">Dhal Curry</h3>
        <span class="price">LKR 450</span>
      </div>
    </body></html>
    "#;

    let menu = extractor.extract_request(ExtractionRequest::from_elements(parse_html(page)))?;
    println!("{}", serde_json::to_string_pretty(&menu)?);

    println!("\n");

    // Example 4: Custom calibration
    println!("⚙️  Example 4: Custom Configuration");
    println!("----------------------------------");

    let config = PipelineConfig {
        price_calibration_factor: 1.0,
        confidence_floor: 30.0,
        ..Default::default()
    };
    let uncalibrated = MenuExtractor::new(config, Arc::new(DishKnowledgeBase::builtin()?))?;
    let menu = uncalibrated.extract(&RawSourceUnit::text("Dish 1 LKR 100\nHoppers LKR 80"));
    for item in menu.items() {
        println!("  {}", item);
    }

    Ok(())
}
