//! Layout commands
//!
//! Usage:
//!   layoutx layout get <ID> [--as-submission]
//!   layoutx layout update <ID> [--file <PATH>] [--dry-run]

use clap::{Args, Subcommand};
use layoutx_core::{GroupSpec, LayoutError, UpdateOptions};
use std::path::{Path, PathBuf};

use crate::commands::read_input;

#[derive(Debug, Args)]
pub struct LayoutArgs {
    #[command(subcommand)]
    pub command: LayoutCommand,
}

#[derive(Debug, Subcommand)]
pub enum LayoutCommand {
    /// Print a layout as JSON
    Get(GetArgs),
    /// Reconcile a submitted group list into a layout
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct GetArgs {
    pub layout_id: String,

    /// Print the group list in submission form instead, ready to edit and
    /// pass to `layout update`
    #[arg(long)]
    pub as_submission: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub layout_id: String,

    /// JSON array of groups; stdin when omitted or `-`
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Compute and print the result without storing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: LayoutArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = layoutx_store::db::open(db)?;

    match args.command {
        LayoutCommand::Get(get) => {
            let output = if get.as_submission {
                serde_json::to_string_pretty(&layoutx_engine::layout_restate(
                    &get.layout_id,
                    &conn,
                )?)?
            } else {
                serde_json::to_string_pretty(&layoutx_engine::layout_get(&get.layout_id, &conn)?)?
            };
            println!("{}", output);
        }
        LayoutCommand::Update(update) => {
            let input = read_input(update.file.as_deref())?;
            let groups: Vec<GroupSpec> = serde_json::from_str(&input)
                .map_err(|e| LayoutError::malformed(e.to_string()))?;
            let result = layoutx_engine::layout_update(
                &update.layout_id,
                &groups,
                UpdateOptions {
                    dry_run: update.dry_run,
                },
                &mut conn,
            )?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
