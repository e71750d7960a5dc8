//! Connection bootstrap for file-backed and in-memory registries.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a 5s busy timeout.
//! - Returned connections have every migration applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the registry database file, creating it when absent.
///
/// The HTTP layer calls this once per request, so success is logged at
/// `debug` only; failures are always logged at `error`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let mut conn = Connection::open(path).map_err(|source| {
        error!(
            "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
            started_at.elapsed().as_millis(),
            source
        );
        DbError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    finish_open(&mut conn, "file", started_at)?;
    Ok(conn)
}

/// Opens a private in-memory registry. Used by tests and dry runs.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let mut conn = Connection::open_in_memory()?;
    finish_open(&mut conn, "memory", started_at)?;
    Ok(conn)
}

fn finish_open(conn: &mut Connection, mode: &str, started_at: Instant) -> DbResult<()> {
    match bootstrap_connection(conn) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
