//! ng-serve - serve local volumes and open them in Neuroglancer.
//!
//! This binary validates the inputs, stages them under one server root,
//! starts the CORS file server, prints the viewer URL and blocks until
//! interrupted.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ng_serve::config::Cli;
use ng_serve::server::start_server;
use ng_serve::staging::ServeRoot;
use ng_serve::viewer::{build_state, viewer_url, LayerSpec};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await
}

async fn run(cli: Cli) -> ExitCode {
    // Validate all inputs before anything binds or touches the filesystem
    let inputs = match cli.resolve_inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Make every input reachable under one root
    let resources: Vec<_> = inputs.iter().map(|i| i.resource.clone()).collect();
    let serve_root = match ServeRoot::prepare(&resources) {
        Ok(root) => root,
        Err(e) => {
            error!("Failed to prepare server root: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // The bind doubles as the port-availability check
    let handle = match start_server(serve_root.path(), &cli.host, cli.port, !cli.no_tracing).await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Build the viewer state from the served URLs, in input order
    let specs: Vec<LayerSpec> = inputs
        .iter()
        .map(|i| LayerSpec {
            url: i.resource.served_url(&cli.host, cli.port),
            name: i.layer_name.clone(),
            kind: i.resource.kind,
        })
        .collect();

    let state = build_state(&specs);
    let url = match viewer_url(&state) {
        Ok(url) => url,
        Err(e) => {
            error!("Failed to serialize viewer state: {}", e);
            handle.stop().await;
            return ExitCode::FAILURE;
        }
    };

    info!("Serving {} layer(s):", specs.len());
    for spec in &specs {
        info!("  {} <- {}://{}", spec.name, spec.kind.scheme(), spec.url);
    }

    println!("\nNeuroglancer URL:");
    println!("{}\n", url);

    if !cli.no_open {
        if let Err(e) = open::that(&url) {
            warn!("Could not open the browser: {} (use the URL above)", e);
        }
    }

    info!("Press Ctrl+C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        handle.stop().await;
        return ExitCode::FAILURE;
    }

    info!("Shutting down");
    handle.stop().await;
    drop(serve_root);

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "ng_serve=debug,tower_http=debug"
    } else {
        "ng_serve=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
