use clap::Parser;
use httpload_common::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, DEFAULT_TOTAL_REQUESTS};
use httpload_common::{HttpLoadError, RunConfig};
use httpload_engine::render::{render_banner, render_json, render_text};
use httpload_engine::runner;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "httpload", about = "Fire GET requests at one URL and report status codes and latency")]
struct Args {
    /// Target URL
    #[arg(long)]
    url: String,

    /// Total number of requests to issue
    #[arg(long, default_value_t = DEFAULT_TOTAL_REQUESTS)]
    requests: usize,

    /// Maximum requests in flight at once (clamped to --requests)
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout, e.g. 500ms, 10s, 1m [default: 10s]
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors (overridden by RUST_LOG)
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.quiet);

    let config = RunConfig::new(args.url.as_str(), args.requests, args.concurrency, args.timeout.unwrap_or(DEFAULT_TIMEOUT))
        .unwrap_or_else(|e| {
            match e {
                HttpLoadError::InvalidConfig(problems) => {
                    eprintln!("Invalid arguments:");
                    for p in problems {
                        eprintln!("- {p}");
                    }
                }
                other => eprintln!("{other}"),
            }
            process::exit(2);
        });

    if !args.json {
        print!("{}", render_banner(&config, args.json));
    }

    let report = runner::run_http(&config).await.unwrap_or_else(|e| {
        eprintln!("Failed to start load run: {e}");
        process::exit(3);
    });

    if args.json {
        match render_json(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to encode report as JSON: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", render_text(&report));
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();
}
