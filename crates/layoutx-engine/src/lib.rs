//! LayoutX Engine - Orchestration layer
//!
//! Wraps each layout operation in a SQLite transaction, owns lifecycle
//! logging, and exposes the JSON tool-call surface.

pub mod commands;

pub use commands::field::field_list;
pub use commands::layout::{layout_get, layout_restate, layout_update, LayoutUpdateResult};
pub use commands::tool::{apply_tool_request, handle_tool_call, ToolRequest, ToolResponse};
