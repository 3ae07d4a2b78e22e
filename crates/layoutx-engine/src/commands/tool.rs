//! JSON tool-call surface
//!
//! A request names a tool and carries its arguments:
//!
//! ```json
//! { "tool": "update_layout",
//!   "args": { "layoutId": "blog", "groups": [ { "name": "Content", "elements": [ { "uid": "A", "required": true } ] } ] } }
//! ```
//!
//! `handle_tool_call` always answers with an envelope, either
//! `{ "ok": true, "result": ... }` or `{ "ok": false, "error": { "code": ..., ... } }`.

use crate::commands::field::field_list;
use crate::commands::layout::{layout_get, layout_update, LayoutUpdateResult};
use layoutx_core::errors::{ExError, ExErrorKind, LayoutError};
use layoutx_core::model::FieldDescriptor;
use layoutx_core::{GroupSpec, LayoutView, UpdateOptions};
use layoutx_core_types::RequestContext;
use layoutx_store::errors::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A tool invocation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum ToolRequest {
    GetLayout {
        #[serde(rename = "layoutId")]
        layout_id: String,
    },
    UpdateLayout {
        #[serde(rename = "layoutId")]
        layout_id: String,
        groups: Vec<GroupSpec>,
        #[serde(default, rename = "dryRun")]
        dry_run: bool,
    },
    ListFields,
}

impl ToolRequest {
    /// Parse a request; anything unparseable is a malformed specification
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| {
            ExError::from(LayoutError::malformed(e.to_string())).with_op("tool_parse")
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::GetLayout { .. } => "get_layout",
            ToolRequest::UpdateLayout { .. } => "update_layout",
            ToolRequest::ListFields => "list_fields",
        }
    }
}

/// Result of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Layout(LayoutView),
    LayoutUpdated(LayoutUpdateResult),
    Fields { fields: Vec<FieldDescriptor> },
}

/// Run a parsed request
///
/// Errors carry the request id (and trace id, if any) of `ctx`.
pub fn apply_tool_request(
    request: ToolRequest,
    conn: &mut Connection,
    ctx: &RequestContext,
) -> Result<ToolResponse> {
    tracing::debug!(request_id = %ctx.request_id, tool = request.name(), "tool call");

    let result = match request {
        ToolRequest::GetLayout { layout_id } => {
            layout_get(&layout_id, conn).map(ToolResponse::Layout)
        }
        ToolRequest::UpdateLayout {
            layout_id,
            groups,
            dry_run,
        } => layout_update(&layout_id, &groups, UpdateOptions { dry_run }, conn)
            .map(ToolResponse::LayoutUpdated),
        ToolRequest::ListFields => field_list(conn).map(|fields| ToolResponse::Fields { fields }),
    };

    result.map_err(|e| with_context(e, ctx))
}

/// Parse, run, and wrap the outcome in a JSON envelope
pub fn handle_tool_call(input: &str, conn: &mut Connection, ctx: &RequestContext) -> Value {
    let outcome = ToolRequest::from_json(input)
        .map_err(|e| with_context(e, ctx))
        .and_then(|request| apply_tool_request(request, conn, ctx))
        .and_then(|response| {
            serde_json::to_value(response).map_err(|e| {
                with_context(
                    ExError::new(ExErrorKind::Serialization)
                        .with_op("tool_response")
                        .with_message(e.to_string()),
                    ctx,
                )
            })
        });

    match outcome {
        Ok(result) => json!({ "ok": true, "result": result }),
        Err(err) => json!({ "ok": false, "error": error_body(&err) }),
    }
}

/// Error body of a failed tool call
pub fn error_body(err: &ExError) -> Value {
    json!({
        "code": err.code(),
        "message": err.message(),
        "op": err.op(),
        "entityId": err.entity_id(),
        "uid": err.uid(),
        "requestId": err.request_id().map(|id| id.as_str()),
        "traceId": err.trace_id().map(|id| id.as_str()),
    })
}

fn with_context(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}
