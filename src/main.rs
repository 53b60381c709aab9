//! # tweetforge CLI
//!
//! Command-line entry point for the draft service. Two subcommands:
//!
//! - `serve`: run the HTTP API that accepts generation requests
//! - `generate`: run one request from the command line and print the drafts
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! `KLUSTER_API_KEY` for the completion service, `FIRECRAWL_API_KEY` as the
//! process-wide scraping default, and either `LIBSQL_URL` +
//! `LIBSQL_AUTH_TOKEN` for a remote cache store or a local database file.
//! Missing request-level credentials fail the request, not the process.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tweetforge::cache::CacheStore;
use tweetforge::completion::{OpenAiClient, PacedCompletionModel};
use tweetforge::config::Config;
use tweetforge::firecrawl::FirecrawlClient;
use tweetforge::generator::DraftGenerator;
use tweetforge::pipeline::{GenerateRequest, Pipeline};
use tweetforge::server;

#[derive(Parser)]
#[command(author, version, about = "Generate social post drafts from a website", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Generate drafts for a single URL and print them
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// Local cache database path (ignored when LIBSQL_URL is set)
    #[arg(long, default_value = "cache.db")]
    database: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// URL to generate drafts for
    #[arg(required = true)]
    url: String,

    /// Crawl at the full page limit (requires --firecrawl-key)
    #[arg(long)]
    full: bool,

    /// Firecrawl API key for this request
    #[arg(long)]
    firecrawl_key: Option<String>,

    /// Local cache database path (ignored when LIBSQL_URL is set)
    #[arg(long, default_value = "cache.db")]
    database: PathBuf,
}

type ServicePipeline = Pipeline<PacedCompletionModel<OpenAiClient>, FirecrawlClient>;

async fn build_pipeline(database: &PathBuf) -> anyhow::Result<ServicePipeline> {
    let config = Config::from_env();

    let model = PacedCompletionModel::per_second(
        OpenAiClient::new(env::var("KLUSTER_API_KEY").ok()),
        1,
    );
    let generator = DraftGenerator::new(model, config.generator_options.clone());

    let cache = match env::var("LIBSQL_URL") {
        Ok(url) => {
            let token = env::var("LIBSQL_AUTH_TOKEN")
                .context("LIBSQL_AUTH_TOKEN must be set when LIBSQL_URL is used")?;
            CacheStore::new_remote(url, token).await?
        }
        Err(_) => {
            let path = database
                .to_str()
                .context("database path is not valid UTF-8")?;
            CacheStore::new_local(path).await?
        }
    };

    Ok(Pipeline::new(config, generator, FirecrawlClient::new(), cache))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let pipeline = build_pipeline(&args.database).await?;
            server::serve(&args.bind, Arc::new(pipeline)).await?;
        }
        Commands::Generate(args) => {
            let pipeline = build_pipeline(&args.database).await?;
            let drafts = pipeline
                .run(&GenerateRequest {
                    url: args.url,
                    firecrawl_key: args.firecrawl_key,
                    wants_full: args.full,
                })
                .await?;

            for draft in drafts.as_slice() {
                println!("{}", draft);
            }
        }
    }

    Ok(())
}
