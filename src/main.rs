//! initparams - context init-parameter exporter
//!
//! Binds configuration properties from files and environment variables and
//! exports them as the flat init-parameters a UI component library reads.

use anyhow::Context;
use clap::Parser;
use initparams::cli::Cli;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.debug, cli.log_json);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    info!("Starting initparams");

    cli.execute().await.context("initparams command failed")
}

fn init_logging(debug: bool, json: bool) {
    let default_directive = if debug {
        "initparams=debug"
    } else {
        "initparams=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    // Logs go to stderr so stdout stays clean for exported parameters
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
