//! Command-line driver for the article model layer.
//!
//! # Responsibility
//! - Load configuration, apply flag overrides and start logging.
//! - Run one repository operation per invocation and print its result.

use articles_core::{
    article_status, init_logging, load_config, AppConfig, ArticleId, ArticleRenderer,
    ArticleRepository, FetchOutcome, HttpArticleStore,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "articles", version, about = "Load, seed and render articles from a remote collection")]
struct Cli {
    /// Configuration file (defaults to ./articles.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Server root; overrides `base_url`.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Seed fixture; overrides `fixture_path`.
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,
    /// Handlebars template; overrides `template_path`.
    #[arg(long, global = true)]
    template: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the collection (seeding it if empty) and list articles newest first.
    List,
    /// Load the collection and print every article as HTML.
    Render,
    /// Seed the remote collection from the fixture if it is empty.
    Seed,
    /// Delete every remote article.
    Truncate,
    /// Delete one remote article by id.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    if let Some(log_dir) = &config.log.dir {
        init_logging(&config.log.level, &log_dir.to_string_lossy())?;
    }
    info!(
        "event=cli_start module=cli status=ok command={:?} base_url={}",
        cli.command, config.base_url
    );

    let store = HttpArticleStore::with_timeout(&config.base_url, config.request_timeout())?;
    let mut repo = ArticleRepository::new(store, config.fixture_path.clone());

    match cli.command {
        Command::List => {
            repo.fetch_all().await?;
            let now = Utc::now();
            for article in repo.articles() {
                println!(
                    "{}\t{}\t{}\t{}",
                    article.id.as_ref().map_or("-", ArticleId::as_str),
                    article_status(article, now),
                    article.author,
                    article.title
                );
            }
        }
        Command::Render => {
            repo.fetch_all().await?;
            let renderer = match &config.template_path {
                Some(path) => ArticleRenderer::from_template_file(path)?,
                None => ArticleRenderer::bundled()?,
            };
            for html in repo.render_all(&renderer)? {
                println!("{html}");
            }
        }
        Command::Seed => match repo.fetch_all().await? {
            FetchOutcome::Loaded { loaded } => {
                println!("collection already holds {loaded} articles; nothing seeded");
            }
            FetchOutcome::Seeded { created, loaded } => {
                println!("seeded {created} articles; collection now holds {loaded}");
            }
        },
        Command::Truncate => {
            let ack = repo.truncate_all().await?;
            println!("{}", ack.body);
        }
        Command::Delete { id } => {
            let ack = repo.delete_by_id(&ArticleId::new(id)).await?;
            println!("{}", ack.body);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(fixture) = &cli.fixture {
        config.fixture_path = fixture.clone();
    }
    if let Some(template) = &cli.template {
        config.template_path = Some(template.clone());
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log.dir = Some(log_dir.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log.level = log_level.clone();
    }
}
