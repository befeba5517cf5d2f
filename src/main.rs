use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use menu_extract::dish_knowledge::DishKnowledgeBase;
use menu_extract::html_elements::parse_html;
use menu_extract::menu_config::PipelineConfig;
use menu_extract::menu_model::{ElementDescriptor, ExtractionRequest};
use menu_extract::orchestrator::MenuExtractor;

#[derive(Parser)]
#[command(name = "menu-extract")]
#[command(about = "Extract structured menu items from OCR text or scraped menu pages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[arg(help = "Input file: OCR text, an HTML page or element JSON (\"-\" reads stdin)")]
    input: PathBuf,

    #[arg(long, help = "Treat the input as an HTML page")]
    html: bool,

    #[arg(long, conflicts_with = "html", help = "Treat the input as a JSON list of element descriptors")]
    elements: bool,

    #[arg(short, long, help = "Pipeline configuration file (JSON)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Dish knowledge base file (JSON), replaces the built-in one")]
    knowledge_base: Option<PathBuf>,

    #[arg(long, help = "OCR recognition confidence (0-100) of the input text")]
    recognition_confidence: Option<f64>,

    #[arg(long, help = "Emit logs as JSON")]
    log_json: bool,

    #[arg(long, help = "Print compact JSON instead of pretty JSON")]
    compact: bool,

    #[arg(long, conflicts_with = "compact", help = "Print a human-readable summary instead of JSON")]
    summary: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_json);

    info!("Starting menu extraction for {}", cli.input.display());

    let config = load_config(cli.config.as_deref())?;
    let knowledge_base = match &cli.knowledge_base {
        Some(path) => DishKnowledgeBase::from_file(path)
            .with_context(|| format!("Failed to load knowledge base from {}", path.display()))?,
        None => DishKnowledgeBase::builtin().context("Built-in knowledge base is invalid")?,
    };

    let extractor = MenuExtractor::new(config, Arc::new(knowledge_base))
        .context("Failed to build the extraction pipeline")?;

    let content = read_input(&cli.input)?;
    let request = build_request(&cli, &content)?;
    let menu = extractor
        .extract_request(request)
        .context("Extraction request rejected")?;

    if menu.is_empty() {
        warn!("No menu items found in {}", cli.input.display());
    }

    if cli.summary {
        print!("{}", menu);
    } else if cli.compact {
        println!("{}", serde_json::to_string(&menu)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&menu)?);
    }

    Ok(())
}

/// Install env_logger, or a JSON tracing subscriber that also captures the
/// library's `log` records
fn init_logging(json: bool) {
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config = match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?
            .with_overrides(|key| std::env::var(key).ok())
            .context("Invalid configuration override in environment")?,
        None => PipelineConfig::from_env().context("Failed to load configuration")?,
    };
    debug!(
        "Configuration: calibration factor {}, confidence floor {}, max edit distance {}",
        config.price_calibration_factor, config.confidence_floor, config.max_edit_distance
    );
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read input from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn build_request(cli: &Cli, content: &str) -> Result<ExtractionRequest> {
    let request = if cli.html {
        ExtractionRequest::from_elements(parse_html(content))
    } else if cli.elements {
        let elements: Vec<ElementDescriptor> =
            serde_json::from_str(content).context("Input is not a JSON list of elements")?;
        ExtractionRequest::from_elements(elements)
    } else {
        let mut request = ExtractionRequest::from_text(content);
        request.recognition_confidence = cli.recognition_confidence;
        request
    };
    Ok(request)
}
