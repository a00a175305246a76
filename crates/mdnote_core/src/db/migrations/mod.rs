//! Article store schema upgrades.
//!
//! The schema version lives in `PRAGMA user_version`. Opening a store walks
//! it forward through [`STEPS`]; a store stamped by a newer `mdnote` is
//! refused untouched so an older binary never writes rows it cannot read.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// One schema step; `version` is the `user_version` after it ran.
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "articles",
    sql: include_str!("0001_articles.sql"),
}];

/// Schema version written by this build.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings the article schema up to [`latest_version`].
///
/// All pending steps share one transaction.
///
/// # Errors
/// - `SchemaTooNew` when the store is stamped above [`latest_version`].
/// - `Sqlite` when a step fails; the store keeps its previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = stored_version(conn)?;
    let supported = latest_version();

    if found > supported {
        warn!(
            "event=db_migrate module=db status=refused found_version={found} supported_version={supported}"
        );
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = pending_steps(found);
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={found} to_version={supported}"
    );
    Ok(())
}

fn pending_steps(found: u32) -> &'static [SchemaStep] {
    let first_pending = STEPS
        .iter()
        .position(|step| step.version > found)
        .unwrap_or(STEPS.len());
    &STEPS[first_pending..]
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
