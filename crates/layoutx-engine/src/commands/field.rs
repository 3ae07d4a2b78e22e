use crate::commands::elapsed_ms;
use layoutx_core::model::FieldDescriptor;
use layoutx_core::{log_op_end, log_op_error, log_op_start};
use layoutx_store::errors::Result;
use layoutx_store::SqliteRepo;
use rusqlite::Connection;
use std::time::Instant;

/// List the reusable fields available for placement, ordered by id
///
/// ## Errors
///
/// - `Persistence`: database error
pub fn field_list(conn: &Connection) -> Result<Vec<FieldDescriptor>> {
    log_op_start!("field_list");
    let start = Instant::now();

    let fields = SqliteRepo::list_fields(conn).map_err(|e| {
        let e = e.with_op("field_list");
        log_op_error!("field_list", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "field_list",
        duration_ms = elapsed_ms(start),
        count = fields.len()
    );

    Ok(fields)
}
