//! Subrelay CLI - run the subscriber-sync pipeline against a trigger event
//!
//! Stands in for the hosting platform's function runtime: reads a trigger
//! event from a file or stdin, loads bridge configuration from the
//! environment (and `.env`), runs the pipeline, and prints the structured
//! sync response as JSON. The exit code tracks the response's `success`
//! flag.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use serde_json::Value;
use subrelay_core::{process_event, BridgeConfig, SubscriberClient, SyncOutcome, SyncResponse};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "subrelay",
    version,
    about = "Forward a document-update event to the subscriber API"
)]
struct Cli {
    /// Path to the trigger-event JSON; reads stdin when omitted
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Pretty-print the response JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let response = run(&cli).await;

    match render(&response, cli.pretty) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("failed to render response: {e}");
            println!("{{\"success\":false,\"error\":\"response serialization failed\"}}");
        }
    }

    if response.success {
        eprintln!("{}", "subscriber sync succeeded".green());
        process::exit(0);
    }
    eprintln!("{}", "subscriber sync failed".red());
    process::exit(1);
}

async fn run(cli: &Cli) -> SyncResponse {
    let event = match read_event(cli) {
        Ok(event) => event,
        Err(e) => return SyncResponse::failure(format!("failed to read event: {e:#}")),
    };

    let outcome = execute(&event).await;
    SyncResponse::from_result(outcome)
}

async fn execute(event: &Value) -> subrelay_core::Result<SyncOutcome> {
    let config = BridgeConfig::from_env()?;
    tracing::info!(
        collection = %config.subscriber_collection,
        base_url = %config.base_url,
        "bridge configured"
    );

    let client = SubscriberClient::new(&config)?;
    process_event(event, &config, &client).await
}

fn read_event(cli: &Cli) -> anyhow::Result<Value> {
    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading event from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("event payload is not valid JSON")
}

fn render(response: &SyncResponse, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
