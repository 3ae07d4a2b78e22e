//! Tool-call command
//!
//! Usage: layoutx tool call [--file <PATH>] [--request-id <ID>] [--trace-id <ID>]
//!
//! Prints the response envelope. Exits non-zero when the call failed.

use clap::{Args, Subcommand};
use layoutx_core_types::{RequestContext, RequestId, TraceId};
use std::path::{Path, PathBuf};

use crate::commands::read_input;

#[derive(Debug, Args)]
pub struct ToolArgs {
    #[command(subcommand)]
    pub command: ToolCommand,
}

#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// Run one JSON tool request
    Call(CallArgs),
}

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Request JSON; stdin when omitted or `-`
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Correlation id echoed in errors; generated when omitted
    #[arg(long)]
    pub request_id: Option<String>,

    /// Client trace id echoed in errors
    #[arg(long)]
    pub trace_id: Option<String>,
}

pub fn execute(args: ToolArgs, db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ToolCommand::Call(call) => {
            let input = read_input(call.file.as_deref())?;
            let mut ctx = match call.request_id {
                Some(id) => RequestContext::with_request_id(RequestId::from_string(id)),
                None => RequestContext::new(),
            };
            if let Some(trace_id) = call.trace_id {
                ctx = ctx.with_trace_id(TraceId::from_string(trace_id));
            }

            let mut conn = layoutx_store::db::open(db)?;
            let response = layoutx_engine::handle_tool_call(&input, &mut conn, &ctx);
            println!("{}", serde_json::to_string_pretty(&response)?);

            if response["ok"] != true {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
