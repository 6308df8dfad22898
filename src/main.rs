//! Docpress - markdown content pipeline for documentation sites.
//!
//! # Usage
//!
//! ```bash
//! docpress --docs-dir public/docs sections /docs/vectorAPI/api-reference.md
//! docpress --base-url https://docs.example.com render /docs/sdk/python.md
//! docpress --json code README.md
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docpress::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use docpress::content::{ContentLoader, Fetcher, Registry};
use docpress::document::{extract_code_blocks, parse_sections};
use docpress::render::{RenderOptions, to_html};

/// Markdown content pipeline for documentation sites
#[derive(Parser, Debug)]
#[command(name = "docpress", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Fetch documents missing from the registry from this base URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Register every markdown file under DIR as /docs/<relative path>
    #[arg(long, global = true, value_name = "DIR")]
    docs_dir: Option<PathBuf>,

    /// Rule table used for rendered HTML
    #[arg(long, global = true, value_enum)]
    theme: Option<ThemeMode>,

    /// Render code blocks without syntax highlighting
    #[arg(long, global = true)]
    no_highlight: bool,

    /// Print sections and code blocks as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a document into sections on level 1 and 2 headings
    Sections {
        /// Logical document path or local markdown file
        source: String,
    },
    /// List fenced code blocks
    Code {
        /// Logical document path or local markdown file
        source: String,
    },
    /// Render a document to styled HTML
    Render {
        /// Logical document path or local markdown file
        source: String,
    },
    /// Print a document's raw text (empty when unavailable)
    Load {
        /// Logical document path
        path: String,
    },
}

fn build_loader(flags: &ConfigFlags) -> Result<ContentLoader> {
    let registry = match &flags.docs_dir {
        Some(dir) => Registry::from_dir(dir)
            .with_context(|| format!("Failed to register documents in {}", dir.display()))?,
        None => Registry::default(),
    };
    let loader = ContentLoader::new(registry);
    Ok(match &flags.base_url {
        Some(url) => loader.with_fetcher(Fetcher::new(url.clone())),
        None => loader,
    })
}

/// Resolve `source` through the loader, reading it as a local file only when
/// the registry does not know the path.
async fn read_source(loader: &ContentLoader, source: &str) -> Result<String> {
    if let Some(content) = loader.load_registered(source) {
        return Ok(content.to_string());
    }
    let path = Path::new(source);
    if path.is_file() {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    Ok(loader.load(source).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective configuration");

    let loader = build_loader(&effective)?;
    let render_options = RenderOptions {
        theme: effective.theme.unwrap_or_default(),
        highlight: !effective.no_highlight,
    };

    match cli.command {
        Command::Sections { source } => {
            let text = read_source(&loader, &source).await?;
            let sections = parse_sections(&text);
            if effective.json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for section in &sections {
                    println!("## {}\n\n{}\n", section.title, section.content);
                }
            }
        }
        Command::Code { source } => {
            let text = read_source(&loader, &source).await?;
            let blocks = extract_code_blocks(&text);
            if effective.json {
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            } else {
                for block in &blocks {
                    println!("```{}\n{}\n```\n", block.language, block.code);
                }
            }
        }
        Command::Render { source } => {
            let text = read_source(&loader, &source).await?;
            println!("{}", to_html(&text, &render_options));
        }
        Command::Load { path } => {
            print!("{}", loader.load(&path).await);
        }
    }

    Ok(())
}
