use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tern::config::DEFAULT_CONFIG_FILE;
use tern::context::{BuildContext, ContextModule};
use tern::markdown::render_html;
use tern::storage::DiskStorage;
use tern::{SiteConfig, Sitemap};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "blog", about = "Build tooling for the blog")]
struct Cli {
    /// The project root.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to the site config. Defaults to `blog.toml` in the project root.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the sitemap.
    Sitemap,

    /// Print the `virtual:context` module for this build.
    Context {
        /// Write the module here instead of printing it.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render a Markdown file to HTML.
    Render { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Sitemap => {
            let config_path = cli
                .config
                .unwrap_or_else(|| cli.root.join(DEFAULT_CONFIG_FILE));
            let config = SiteConfig::load_or_default(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;

            generate_sitemap(&cli.root, &config)?;
        }
        Command::Context { out } => {
            let module = ContextModule::new(BuildContext::from_env());
            let source = module.source()?;

            match out {
                Some(out) => fs::write(&out, source)
                    .with_context(|| format!("writing {}", out.display()))?,
                None => println!("{source}"),
            }
        }
        Command::Render { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;

            print!("{}", render_html(&text));
        }
    }

    Ok(())
}

fn generate_sitemap(root: &Path, config: &SiteConfig) -> Result<()> {
    let sitemap = Sitemap::build(root, config).context("building sitemap")?;

    println!("{}", "Sitemap:".on_yellow().bright_green());
    for url in sitemap.urls() {
        println!("  {}", url.dimmed());
    }

    sitemap
        .write(&DiskStorage::new(root), &config.sitemap_path)
        .with_context(|| format!("writing {}", config.sitemap_path.display()))?;

    println!(
        "{} {}",
        "Wrote".bright_green(),
        root.join(&config.sitemap_path).display()
    );

    Ok(())
}
