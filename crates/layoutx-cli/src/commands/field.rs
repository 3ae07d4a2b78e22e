use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Debug, Args)]
pub struct FieldArgs {
    #[command(subcommand)]
    pub command: FieldCommand,
}

#[derive(Debug, Subcommand)]
pub enum FieldCommand {
    /// Print every reusable field as JSON
    List,
}

pub fn execute(args: FieldArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = layoutx_store::db::open(db)?;

    match args.command {
        FieldCommand::List => {
            let fields = layoutx_engine::field_list(&conn)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }

    Ok(())
}
