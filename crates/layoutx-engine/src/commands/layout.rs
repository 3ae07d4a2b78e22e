//! Layout command handlers with boundary logging.

use crate::commands::elapsed_ms;
use layoutx_core::errors::ExError;
use layoutx_core::{log_op_end, log_op_error, log_op_start};
use layoutx_core::{
    serialize_layout, GroupSpec, LayoutView, ReconcileReport, Reconciler, UpdateOptions,
};
use layoutx_store::errors::{from_rusqlite, Result};
use layoutx_store::SqliteContentStore;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::time::Instant;

/// Outcome of `layout_update`: the stored layout plus what changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutUpdateResult {
    #[serde(flatten)]
    pub layout: LayoutView,
    pub report: ReconcileReport,
    pub dry_run: bool,
}

/// Load a layout and project it into the response shape
///
/// ## Errors
///
/// - `LayoutNotFound`: no layout has this id
/// - `Persistence`: database error
pub fn layout_get(layout_id: &str, conn: &Connection) -> Result<LayoutView> {
    log_op_start!("layout_get", layout_id = layout_id);
    let start = Instant::now();

    let view = Reconciler::new(SqliteContentStore::new(conn))
        .get_layout(layout_id)
        .map(|layout| serialize_layout(&layout))
        .map_err(|e| {
            let e = ExError::from(e).with_op("layout_get");
            log_op_error!("layout_get", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "layout_get",
        duration_ms = elapsed_ms(start),
        layout_id = layout_id,
        group_count = view.groups.len()
    );

    Ok(view)
}

/// Current layout restated as a submission, every property explicit
///
/// The result can be edited and passed back to `layout_update`.
///
/// ## Errors
///
/// - `LayoutNotFound`: no layout has this id
/// - `Persistence`: database error
pub fn layout_restate(layout_id: &str, conn: &Connection) -> Result<Vec<GroupSpec>> {
    log_op_start!("layout_restate", layout_id = layout_id);
    let start = Instant::now();

    let layout = Reconciler::new(SqliteContentStore::new(conn))
        .get_layout(layout_id)
        .map_err(|e| {
            let e = ExError::from(e).with_op("layout_restate");
            log_op_error!("layout_restate", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "layout_restate",
        duration_ms = elapsed_ms(start),
        layout_id = layout_id
    );

    Ok(layout.groups.iter().map(GroupSpec::restating).collect())
}

/// Reconcile `groups` into the stored layout
///
/// Load, reconcile, and persist run in one transaction, committed only when
/// every step succeeded. With `dry_run` the transaction is rolled back and
/// the computed layout is returned as if stored.
///
/// ## Errors
///
/// - `LayoutNotFound`: no layout has this id
/// - `MalformedSpecification`, `InvalidWidth`: rejected submission
/// - `UnresolvedFieldReference`, `UnknownAttribute`: bad new placement
/// - `Persistence`: database error
pub fn layout_update(
    layout_id: &str,
    groups: &[GroupSpec],
    options: UpdateOptions,
    conn: &mut Connection,
) -> Result<LayoutUpdateResult> {
    log_op_start!(
        "layout_update",
        layout_id = layout_id,
        group_count = groups.len(),
        dry_run = options.dry_run
    );
    let start = Instant::now();

    let result = layout_update_impl(layout_id, groups, options, conn).map_err(|e| {
        log_op_error!(
            "layout_update",
            e.clone(),
            duration_ms = elapsed_ms(start),
            layout_id = layout_id
        );
        e
    })?;

    log_op_end!(
        "layout_update",
        duration_ms = elapsed_ms(start),
        layout_id = layout_id,
        preserved = result.report.preserved,
        created = result.report.created,
        removed = result.report.removed
    );

    Ok(result)
}

fn layout_update_impl(
    layout_id: &str,
    groups: &[GroupSpec],
    options: UpdateOptions,
    conn: &mut Connection,
) -> Result<LayoutUpdateResult> {
    // Take the write lock before loading so concurrent updates serialize
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let reconciliation = Reconciler::new(SqliteContentStore::new(&tx))
        .update_layout(layout_id, groups, options)
        .map_err(|e| ExError::from(e).with_op("layout_update"))?;

    if options.dry_run {
        tx.rollback().map_err(from_rusqlite)?;
    } else {
        tx.commit().map_err(from_rusqlite)?;
    }

    Ok(LayoutUpdateResult {
        layout: serialize_layout(&reconciliation.layout),
        report: reconciliation.report,
        dry_run: options.dry_run,
    })
}
