//! LayoutX CLI
//!
//! Command-line interface for inspecting and reconciling field layouts

use clap::{Parser, Subcommand, ValueEnum};
use layoutx_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "layoutx")]
#[command(about = "LayoutX - Field layout reconciliation", long_about = None)]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, env = "LAYOUTX_DB", default_value = ".layoutx/store.db")]
    db: PathBuf,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        global = true,
        env = "LAYOUTX_LOG_FORMAT",
        value_enum,
        default_value = "pretty"
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Layout inspection and reconciliation
    Layout(commands::layout::LayoutArgs),
    /// Reusable field operations
    Field(commands::field::FieldArgs),
    /// JSON tool-call interface
    Tool(commands::tool::ToolArgs),
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args, &cli.db),
        Commands::Layout(args) => commands::layout::execute(args, &cli.db),
        Commands::Field(args) => commands::field::execute(args, &cli.db),
        Commands::Tool(args) => commands::tool::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
