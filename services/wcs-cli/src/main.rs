//! WCS client CLI
//!
//! Inspect a Web Coverage Service 1.1.0 server and download coverages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wcs_protocol::{BoundingBox, ByteStream, GetCoverageRequest, WebCoverageService};

#[derive(Parser, Debug)]
#[command(name = "wcs")]
#[command(about = "Command-line client for OGC Web Coverage Service 1.1.0 servers")]
struct Cli {
    /// Service base URL
    #[arg(short, long, env = "WCS_URL")]
    url: String,

    /// Read the capabilities document from a file instead of the server
    #[arg(long)]
    capabilities_file: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show service identification, provider and operations
    Capabilities,

    /// List advertised coverages
    Coverages {
        /// Print full coverage metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the temporal extent of a coverage (issues DescribeCoverage)
    TimeLimits {
        /// Coverage identifier
        identifier: String,
    },

    /// Download a coverage
    GetCoverage {
        /// Coverage identifiers
        #[arg(required = true)]
        identifiers: Vec<String>,

        /// Bounding box as minx,miny,maxx,maxy
        #[arg(short, long, allow_hyphen_values = true, value_parser = BoundingBox::from_kvp_string)]
        bbox: Option<BoundingBox>,

        /// Time positions (repeatable)
        #[arg(short, long = "time")]
        times: Vec<String>,

        /// Output format, e.g. application/netcdf
        #[arg(short, long)]
        format: Option<String>,

        /// Ask the server to store the output and return a reference
        #[arg(long)]
        store: bool,

        /// Vendor parameters as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// File to write the response body to
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let xml = match &cli.capabilities_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let wcs = WebCoverageService::new(&cli.url, xml.as_deref())
        .await
        .with_context(|| format!("Failed to load capabilities from {}", cli.url))?;

    match cli.command {
        Commands::Capabilities => print_capabilities(&wcs),
        Commands::Coverages { json } => print_coverages(&wcs, json)?,
        Commands::TimeLimits { identifier } => {
            let coverage = wcs.coverage(&identifier)?;
            match coverage.time_limits(&wcs).await? {
                Some(limits) => println!("{} / {}", limits.begin, limits.end),
                None => println!("No temporal domain advertised for {}", identifier),
            }
        }
        Commands::GetCoverage {
            identifiers,
            bbox,
            times,
            format,
            store,
            params,
            output,
        } => {
            let mut request = GetCoverageRequest::with_identifiers(identifiers)
                .time_sequence(times)
                .store(store);
            request.bbox = bbox;
            request.format = format;
            request.extra = params;

            let response = wcs.fetch_coverage(&request).await?;
            info!(content_type = ?response.content_type(), "Coverage response received");
            let written = write_body(response.into_stream(), &output).await?;
            println!("Wrote {} bytes to {}", written, output.display());
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_capabilities(wcs: &WebCoverageService) {
    let id = wcs.identification();
    println!("{} ({} {})", id.title, id.service, id.version);
    println!("  {}", id.abstract_text);
    if !id.keywords.is_empty() {
        println!("  Keywords: {}", id.keywords.join(", "));
    }
    println!("  Fees: {}", id.fees);
    println!("  Access constraints: {}", id.access_constraints);

    let provider = wcs.provider();
    println!();
    println!("Provider: {}", provider.name);
    if let Some(url) = &provider.url {
        println!("  {}", url);
    }

    println!();
    println!("Operations:");
    for op in wcs.operations() {
        println!("  {}", op.name);
        for (method, url) in &op.methods {
            println!("    {:<4} {}", method.to_string(), url);
        }
        if !op.format_options.is_empty() {
            println!("    Formats: {}", op.format_options.join(", "));
        }
    }
}

fn print_coverages(wcs: &WebCoverageService, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(wcs.contents())?);
        return Ok(());
    }

    for (id, cm) in wcs.items() {
        match &cm.title {
            Some(title) => println!("{:<24} {}", id, title),
            None => println!("{}", id),
        }
    }
    Ok(())
}

/// Stream a response body to `path`, returning the number of bytes written.
async fn write_body(mut body: ByteStream, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
