mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use xpick_dom::{BlockLayout, Document, LayoutConfig};
use xpick_html::HtmlParser;
use xpick_inspector::{BoundedPathMode, InspectorConfig, absolute_path, resolve_str};

#[derive(Parser)]
#[command(name = "xpick")]
#[command(about = "xpick: point at elements, get structural path locators")]
#[command(version)]
struct Cli {
    /// JSON inspector configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Width of the layout viewport in pixels
    #[arg(long, global = true, default_value_t = 800.0)]
    viewport_width: f64,

    /// URL the document is treated as being loaded from
    #[arg(long, global = true, default_value = "about:blank")]
    url: String,

    /// Keep the row index in bounded paths
    #[arg(long, global = true)]
    exact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the absolute path of every element
    Paths {
        file: PathBuf,

        /// Only elements with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Print the elements matched by a path expression
    Resolve { file: PathBuf, expr: String },
    /// Replay a JSON list of pointer events against the page
    Replay { file: PathBuf, script: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.exact)?;

    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), ?config, "loaded inspector config");
    }

    match &cli.command {
        Commands::Paths { file, tag } => {
            let doc = load_document(file, &cli.url)?;
            print_paths(&doc, tag.as_deref())?;
        }
        Commands::Resolve { file, expr } => {
            let doc = load_document(file, &cli.url)?;
            let matches = resolve_str(&doc, expr)
                .with_context(|| format!("invalid path expression `{expr}`"))?;
            if matches.is_empty() {
                warn!(expr = %expr, "no element matched");
            }
            for el in matches {
                println!("{}", absolute_path(&doc, el)?);
            }
        }
        Commands::Replay { file, script } => {
            let mut doc = load_document(file, &cli.url)?;
            let layout = BlockLayout::new(LayoutConfig {
                viewport_width: cli.viewport_width,
                ..LayoutConfig::default()
            });
            let height = layout.run(&mut doc);
            info!(width = cli.viewport_width, height, "page laid out");

            let script = replay::Script::load(script)?;
            for line in replay::run(&mut doc, config, &script) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, exact: bool) -> Result<InspectorConfig> {
    let mut config = match path {
        Some(path) => InspectorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => InspectorConfig::default(),
    };
    if exact {
        config.bounded_path = BoundedPathMode::Exact;
    }
    Ok(config)
}

fn load_document(path: &Path, url: &str) -> Result<Document> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = HtmlParser::new()
        .parse_with_url(&html, url)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(
        file = %path.display(),
        nodes = doc.tree().len(),
        frames = doc.iframes().len(),
        "document loaded"
    );
    Ok(doc)
}

fn print_paths(doc: &Document, tag: Option<&str>) -> Result<()> {
    let tree = doc.tree();
    let elements = tree.descendants(tree.root()).filter(|&n| match tag {
        Some(tag) => tree.tag_name(n).is_some_and(|t| t.eq_ignore_ascii_case(tag)),
        None => tree.is_element(n),
    });
    for el in elements {
        println!("{}", absolute_path(doc, el)?);
    }
    Ok(())
}
