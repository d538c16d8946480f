//! # sitescout CLI
//!
//! Command-line interface for the site crawler and index builder:
//!
//! - `crawl`: run one full crawl now and rebuild the index
//! - `search`: query the persisted index by substring
//! - `status`: inspect the persisted index
//! - `schedule`: run the daily crawl scheduler in the foreground

mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use url::Url;

use sitescout::crawler::CrawlerConfig;
use sitescout::index::{IndexStore, search};
use sitescout::scheduler::{Scheduler, SchedulerConfig, run_crawl};
use sitescout::summarizer::{GEMINI_API_KEY_VAR, GeminiSummarizer, TitleFallbackSummarizer};

#[derive(Parser)]
#[command(author, version, about = "A bounded, polite site crawler and index builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl the target site now and rebuild the index
    Crawl(CrawlArgs),

    /// Search the persisted index
    Search(SearchArgs),

    /// Show the persisted index status
    Status(StatusArgs),

    /// Run the daily crawl scheduler in the foreground
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Base URL of the site to crawl
    #[arg(required = true)]
    url: Url,

    /// Maximum crawl depth
    #[arg(short = 'd', long, default_value = "3")]
    max_depth: u32,

    /// Maximum number of pages to index
    #[arg(short = 'p', long, default_value = "200")]
    max_pages: usize,

    /// Politeness delay between pages in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// URL substrings to exclude (comma-separated)
    #[arg(short, long)]
    exclude: Option<String>,

    /// Index file path
    #[arg(long, default_value = "site_index.json")]
    index: PathBuf,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query
    #[arg(required = true)]
    query: String,

    /// Limit results
    #[arg(short, long, default_value = "15")]
    limit: usize,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Index file path
    #[arg(long, default_value = "site_index.json")]
    index: PathBuf,
}

#[derive(Args, Debug)]
struct StatusArgs {
    /// List every indexed page
    #[arg(short, long)]
    details: bool,

    /// Index file path
    #[arg(long, default_value = "site_index.json")]
    index: PathBuf,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Base URL of the site to crawl
    #[arg(required = true)]
    url: Url,

    /// Hour of day (UTC) for the daily crawl
    #[arg(long, default_value = "3")]
    hour: u32,

    /// Run one crawl immediately before scheduling
    #[arg(long)]
    immediate: bool,

    /// Maximum crawl depth
    #[arg(short = 'd', long, default_value = "3")]
    max_depth: u32,

    /// Maximum number of pages to index
    #[arg(short = 'p', long, default_value = "200")]
    max_pages: usize,

    /// Politeness delay between pages in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// Directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Index file path
    #[arg(long, default_value = "site_index.json")]
    index: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut _log_guard = None;
    match &cli.command {
        Some(Commands::Schedule(args)) if args.log_dir.is_some() => {
            if let Some(log_dir) = &args.log_dir {
                _log_guard = Some(telemetry::init_tracing_with_file(log_dir)?);
            }
        }
        _ => telemetry::init_tracing(),
    }

    match cli.command {
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Search(args)) => {
            search_command(args).await?;
        }
        Some(Commands::Status(args)) => {
            status_command(args).await?;
        }
        Some(Commands::Schedule(args)) => {
            schedule_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

/// Cancel the returned token when the operator hits ctrl-c, so an
/// in-progress crawl aborts without touching the persisted index.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    cancel
}

#[instrument(skip(args))]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    println!("Crawling {}...", args.url);

    let mut builder = CrawlerConfig::builder(args.url.clone())
        .max_depth(args.max_depth)
        .max_pages(args.max_pages)
        .page_delay_ms(args.delay_ms);
    if let Some(exclude) = args.exclude {
        builder = builder.deny_substrings(exclude.split(',').map(String::from).collect());
    }
    let config = builder.build();

    let cancel = cancel_on_ctrl_c();
    let store = IndexStore::new(&args.index);

    let index = match GeminiSummarizer::from_env() {
        Some(summarizer) => run_crawl(&config, summarizer, &store, &cancel).await?,
        None => {
            println!("{GEMINI_API_KEY_VAR} not set; summaries fall back to page titles");
            run_crawl(&config, TitleFallbackSummarizer, &store, &cancel).await?
        }
    };

    println!(
        "Indexed {} pages to {}",
        index.total_pages,
        args.index.display()
    );
    Ok(())
}

#[instrument(skip(args))]
async fn search_command(args: SearchArgs) -> anyhow::Result<()> {
    let store = IndexStore::new(&args.index);
    let Some(index) = store.load().await? else {
        println!(
            "No index found at {}; run a crawl first",
            args.index.display()
        );
        return Ok(());
    };

    let results: Vec<_> = search(&index, &args.query)
        .into_iter()
        .take(args.limit)
        .collect();

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        _ => {
            println!("Found {} results", results.len());
            for (i, page) in results.iter().enumerate() {
                println!("{}. {}", i + 1, page.title);
                println!("   URL: {}", page.url);
                println!("   {}", page.summary);
            }
        }
    }

    Ok(())
}

#[instrument(skip(args))]
async fn status_command(args: StatusArgs) -> anyhow::Result<()> {
    let store = IndexStore::new(&args.index);
    let Some(index) = store.load().await? else {
        println!(
            "No index found at {}; run a crawl first",
            args.index.display()
        );
        return Ok(());
    };

    println!("Index: {}", args.index.display());
    println!("Last updated: {}", index.last_updated.to_rfc3339());
    println!("Total pages: {}", index.total_pages);

    if args.details {
        for page in &index.pages {
            println!("  {} ({})", page.url, page.title);
        }
    }

    Ok(())
}

#[instrument(skip(args))]
async fn schedule_command(args: ScheduleArgs) -> anyhow::Result<()> {
    let config = CrawlerConfig::builder(args.url.clone())
        .max_depth(args.max_depth)
        .max_pages(args.max_pages)
        .page_delay_ms(args.delay_ms)
        .build();
    let scheduler_config = SchedulerConfig::new(config, &args.index).with_trigger_hour(args.hour);
    let scheduler = Scheduler::from_env(scheduler_config);

    if args.immediate {
        scheduler.trigger_manual_crawl().await;
    }

    let Some(handle) = scheduler.start() else {
        println!("Scheduler disabled: set {GEMINI_API_KEY_VAR} to enable the daily crawl");
        return Ok(());
    };

    let mut handle = handle;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("Shutting down scheduler");
            scheduler.shutdown();
            let _ = (&mut handle).await;
        }
        _ = &mut handle => {}
    }

    Ok(())
}
