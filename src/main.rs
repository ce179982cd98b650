//! segment-router demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ net ──▶ http server ──▶ dispatcher         │
//!                           │                              │               │
//!                           │                              ▼               │
//!                           │                     routing (first match)    │
//!                           │                              │               │
//!     Client Response       │                              ▼               │
//!     ◀─────────────────────┼── response ◀──────────── handler             │
//!                           │                                              │
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use segment_router::config::validation::validate_config;
use segment_router::config::{load_config, ConfigError, ServerConfig};
use segment_router::http::escape_html;
use segment_router::observability::logging::init_logging;
use segment_router::{App, AppError, HandlerResult, MethodSet, RequestContext, Response};

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Minimal HTTP request router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        max_in_flight = config.listener.max_in_flight,
        "segment-router starting"
    );

    let get = MethodSet::parse(["GET"])?;
    let mut app = App::new(config);
    app.add_route(get.clone(), "/", index)
        .add_route(get, "/hello/:name", hello);

    app.run()?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn index(_: &RequestContext, _: &[String]) -> HandlerResult {
    Ok(Response::ok("Hello world --- segment-router."))
}

fn hello(_: &RequestContext, captures: &[String]) -> HandlerResult {
    let name = captures.first().map(String::as_str).unwrap_or_default();
    Ok(Response::ok(format!("Hello {}!", escape_html(name))))
}
