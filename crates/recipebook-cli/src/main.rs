//! Recipebook CLI
//!
//! Command-line interface for recipe editing and revision history

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recipebook_core::errors::ExError;
use recipebook_core::logging_facility::{init, Profile};
use recipebook_core_types::{RequestContext, TraceId};
use recipebook_store::StoreConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "recipebook")]
#[command(about = "Recipebook - recipe editing with a revision audit trail", long_about = None)]
struct Cli {
    /// SQLite database file (overrides RECIPEBOOK_DB from the environment)
    #[arg(long, global = true, env = "RECIPEBOOK_DB")]
    db: Option<PathBuf>,

    /// Log output: development (human) or production (JSON), written to stderr
    #[arg(
        long,
        global = true,
        env = "RECIPEBOOK_LOG_PROFILE",
        default_value = "development"
    )]
    log_profile: String,

    /// Join an existing trace; reported with any error
    #[arg(long, global = true, env = "RECIPEBOOK_TRACE_ID")]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Recipe operations
    Recipe(commands::recipe::RecipeArgs),
    /// Revision history queries
    Revisions(commands::revisions::RevisionsArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(Profile::parse(&cli.log_profile));

    let ctx = match cli.trace_id {
        Some(trace_id) => RequestContext::within_trace(TraceId::from_string(trace_id)),
        None => RequestContext::new(),
    };
    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_ref().map(TraceId::as_str)
    );
    let _entered = span.enter();

    let result = store_config(cli.db).and_then(|config| match cli.command {
        Commands::Init => commands::init::execute(&config, &ctx),
        Commands::Recipe(args) => commands::recipe::execute(args, &config, &ctx),
        Commands::Revisions(args) => commands::revisions::execute(args, &config, &ctx),
    });

    if let Err(e) = result {
        // Engine and store errors already carry the request ids.
        if e.downcast_ref::<ExError>().is_some() {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("Error: {} (request_id: {})", e, ctx.request_id);
        }
        std::process::exit(1);
    }
}

fn store_config(db: Option<PathBuf>) -> Result<StoreConfig, Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    Ok(match db {
        Some(path) => config.with_path(path),
        None => config,
    })
}
