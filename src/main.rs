use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use pagecraft::config::BuilderConfig;
use pagecraft::editor::palette::{page_template, page_templates};
use pagecraft::editor::{BuilderSession, DropTarget};
use pagecraft::generator::generate_page_markup;
use pagecraft::model::{BlockMode, PageDocument};
use pagecraft::store::{DocumentStore, JsonFileStore};
use pagecraft::style::resolve_style;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render and inspect page-builder documents", long_about = None)]
struct Cli {
    /// Builder configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Verbose logging (overridden by PAGECRAFT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the page markup of a document
    Render {
        #[arg(value_name = "PAGE_FILE")]
        file: Utf8PathBuf,
    },
    /// Print every block with its content resolved against defaults
    Resolve {
        #[arg(value_name = "PAGE_FILE")]
        file: Utf8PathBuf,
    },
    /// Print render instructions for every style-bearing block
    Styles {
        #[arg(value_name = "PAGE_FILE")]
        file: Utf8PathBuf,
    },
    /// Validate a document and summarize its blocks
    Check {
        #[arg(value_name = "PAGE_FILE")]
        file: Utf8PathBuf,
    },
    /// Render every page document under a directory to HTML
    RenderDir {
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,
        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: Utf8PathBuf,
    },
    /// Create a page document from a template (lists templates when no name is given)
    Template {
        name: Option<String>,
        /// Write the document here instead of printing it
        #[arg(long, value_name = "FILE")]
        out: Option<Utf8PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PAGECRAFT_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pagecraft=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Utf8Path) -> Result<PageDocument> {
    JsonFileStore::new(".").load(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = match &cli.config {
        Some(path) => BuilderConfig::from_json_file(path)?,
        None => BuilderConfig::default(),
    };

    match cli.command {
        Command::Render { file } => {
            let doc = load(&file)?;
            print!("{}", generate_page_markup(&doc));
        }
        Command::Resolve { file } => {
            let doc = load(&file)?;
            let blocks: Vec<_> = doc
                .iter()
                .map(|b| {
                    json!({
                        "id": b.id,
                        "type": b.kind(),
                        "mode": b.mode,
                        "resolved": b.resolved(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Command::Styles { file } => {
            let doc = load(&file)?;
            let mut out = Vec::new();
            for block in &doc {
                let resolved = block.resolved();
                if let Some(style) = resolved.style() {
                    let instructions = resolve_style(style);
                    out.push(json!({
                        "id": block.id,
                        "type": block.kind(),
                        "css": instructions.css_text(),
                        "classes": instructions.visibility_classes(),
                        "instructions": instructions,
                    }));
                }
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Check { file } => {
            let doc = load(&file)?;
            let mut over_limit = 0;
            for (i, block) in doc.iter().enumerate() {
                let mode = match block.mode {
                    BlockMode::Visual => "visual",
                    BlockMode::Code => "code",
                };
                println!(
                    "{:>3}  {:<14} {:<7} {}  versions={}",
                    i,
                    block.kind().as_str(),
                    mode,
                    block.id,
                    block.code_version_history.len()
                );
                if block.code_version_history.len() > config.code_version_limit {
                    warn!(
                        block = %block.id,
                        versions = block.code_version_history.len(),
                        limit = config.code_version_limit,
                        "code version history exceeds configured limit"
                    );
                    over_limit += 1;
                }
            }
            println!("{}: {} blocks, ok", file, doc.len());
            if over_limit > 0 {
                bail!("{} block(s) exceed the code version limit", over_limit);
            }
        }
        Command::RenderDir { dir, out } => render_dir(&dir, &out)?,
        Command::Template { name, out } => {
            let Some(name) = name else {
                for t in page_templates() {
                    println!("{:<18} {}", t.name, t.description);
                }
                return Ok(());
            };
            let template = page_template(&name)
                .with_context(|| format!("Unknown template '{}'", name))?;
            let mut session = BuilderSession::new(config);
            session.begin_palette_drag(template.to_item());
            session.drop_on(Some(&DropTarget::CanvasEnd));
            match out {
                Some(path) => JsonFileStore::new(".").save(&path, session.document())?,
                None => println!("{}", session.document().to_json_pretty()?),
            }
        }
    }
    Ok(())
}

fn render_dir(dir: &Utf8Path, out: &Utf8Path) -> Result<()> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Walk {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
        if path.extension() == Some("json") {
            pages.push(path);
        }
    }
    info!(count = pages.len(), dir = %dir, "rendering pages");

    let failures: Vec<(Utf8PathBuf, anyhow::Error)> = pages
        .par_iter()
        .filter_map(|page| render_one(dir, out, page).err().map(|e| (page.clone(), e)))
        .collect();

    for (page, err) in &failures {
        eprintln!("{}: {:#}", page, err);
    }
    println!("rendered {} of {} pages", pages.len() - failures.len(), pages.len());
    if !failures.is_empty() {
        bail!("{} page(s) failed to render", failures.len());
    }
    Ok(())
}

fn render_one(root: &Utf8Path, out: &Utf8Path, page: &Utf8Path) -> Result<()> {
    let doc = load(page)?;
    let relative = page.strip_prefix(root).unwrap_or(page);
    let target = out.join(relative).with_extension("html");
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("Create dir {}", parent))?;
    }
    std::fs::write(&target, generate_page_markup(&doc))
        .with_context(|| format!("Failed to write {}", target))?;
    Ok(())
}
