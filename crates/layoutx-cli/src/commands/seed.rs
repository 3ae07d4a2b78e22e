//! Seed import command
//!
//! Usage: layoutx seed import <PATH>

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every .yaml/.yml file in a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

pub fn execute(args: SeedArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, db),
    }
}

fn execute_import(args: ImportArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = layoutx_store::db::open(db)?;

    let seed_files = if args.path.is_dir() {
        // Sorted for determinism
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let summary = layoutx_store::seed::import_seed(&seed_file, &mut conn)?;
        println!(
            "Imported {} fields, {} layouts (digest: {})",
            summary.fields, summary.layouts, summary.digest
        );
    }

    Ok(())
}
