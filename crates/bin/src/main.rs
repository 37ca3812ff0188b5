//! tenk CLI binary.
//!
//! `tenk fetch` downloads recent 10-K filings for S&P 500 companies;
//! `tenk convert` renders the downloaded filings to PDF.

mod integration;

use clap::{Args, Parser, Subcommand};
use integration::convert_pipeline::{ConvertSettings, run_convert};
use integration::fetch_pipeline::{FetchSettings, run_fetch};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tenk::GicsSector;
use tenk::universe::SP500_URL;
use tenk_data::FetchConfig;
use tenk_data::edgar::EdgarClientConfig;
use tenk_data::retriever::DEFAULT_DATA_DIR;
use tenk_pdf::{Backend, DEFAULT_WORKERS, RenderOptions};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "tenk=info,tenk_data=info,tenk_pdf=info";

#[derive(Debug, Parser)]
#[command(name = "tenk")]
#[command(about = "Fetch S&P 500 10-K filings from SEC EDGAR and render them to PDF", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Download the trailing year's 10-K filings and company facts
    Fetch(FetchArgs),

    /// Convert downloaded filing.html documents to PDF
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Root of the filing tree
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// User-Agent sent to the SEC (name and contact email)
    #[arg(long, env = "SEC_USER_AGENT")]
    user_agent: Option<String>,

    /// Only fetch these tickers (repeatable)
    #[arg(long = "ticker")]
    tickers: Vec<String>,

    /// Only fetch companies in this GICS sector
    #[arg(long)]
    sector: Option<GicsSector>,

    /// Process at most this many companies
    #[arg(long)]
    limit: Option<usize>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pause after each filing and each company, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Page listing the index constituents
    #[arg(long, default_value = SP500_URL, hide = true)]
    roster_url: String,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Root of the filing tree
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Rendering program (wkhtmltopdf or weasyprint)
    #[arg(long, default_value = "weasyprint")]
    renderer: Backend,

    /// Path to the renderer executable, instead of looking it up on PATH
    #[arg(long)]
    renderer_path: Option<PathBuf>,

    /// Number of concurrent conversions
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Paper size (e.g. A4, Letter)
    #[arg(long, default_value = "A4")]
    page_size: String,
}

impl FetchArgs {
    fn into_settings(self) -> FetchSettings {
        let mut client = EdgarClientConfig::from_env();
        if let Some(user_agent) = self.user_agent.filter(|ua| !ua.trim().is_empty()) {
            client.user_agent = user_agent;
        }
        client.timeout = (self.timeout_secs > 0).then_some(Duration::from_secs(self.timeout_secs));

        let delay = Duration::from_millis(self.delay_ms);
        FetchSettings {
            roster_url: self.roster_url,
            client,
            fetch: FetchConfig {
                data_dir: self.data_dir,
                filing_delay: delay,
                company_delay: delay,
            },
            tickers: self.tickers,
            sector: self.sector,
            limit: self.limit,
        }
    }
}

impl ConvertArgs {
    fn into_settings(self) -> ConvertSettings {
        ConvertSettings {
            data_dir: self.data_dir,
            backend: self.renderer,
            program: self.renderer_path,
            workers: self.workers,
            options: RenderOptions {
                page_size: self.page_size,
                ..RenderOptions::default()
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => {
            let data_dir = args.data_dir.clone();
            let summary = run_fetch(args.into_settings()).await?;

            println!("\n10-K Retrieval Summary");
            println!("======================\n");
            println!("  Companies processed:   {}", summary.companies);
            println!("  Companies failed:      {}", summary.companies_failed);
            println!("  Filings matched:       {}", summary.filings);
            println!("  Documents written:     {}", summary.documents_written);
            println!("  Company facts written: {}", summary.facts_written);
            println!("  Download failures:     {}", summary.download_failures);
            println!("\nOutput: {}", data_dir.display());
        }
        Commands::Convert(args) => {
            let summary = run_convert(args.into_settings()).await?;

            println!("\nPDF Conversion Summary");
            println!("======================\n");
            println!("  HTML files found: {}", summary.found);
            println!("  Converted:        {}", summary.converted);
            println!("  Already present:  {}", summary.skipped);
            println!("  Failed:           {}", summary.failed);
        }
    }

    Ok(())
}
