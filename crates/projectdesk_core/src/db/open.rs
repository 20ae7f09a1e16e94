//! Connection bootstrap for SQLite.
//!
//! # Responsibility
//! - Open the primary (write) connection with pragmas and migrations applied.
//! - Hand out short-lived read-only connections for listing/get paths.
//!
//! # Invariants
//! - Every returned connection has `foreign_keys=ON`.
//! - Primary connections have all migrations applied before use.
//! - Read connections are `query_only` and therefore can never participate
//!   in a write transaction.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    ConnectionFactory::file(path).open_primary()
}

/// Opens a private in-memory database and applies all pending migrations.
///
/// The database lives only as long as the returned connection; use
/// [`ConnectionFactory::shared_memory`] when read paths need to see it too.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(|mut conn| {
            bootstrap_primary(&mut conn, false)?;
            Ok(conn)
        });
    match result {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            log_open_failure("memory", started_at, &err);
            Err(err)
        }
    }
}

/// Where the database lives; determines how additional connections reach
/// the same data.
#[derive(Debug, Clone)]
enum DbLocation {
    File(PathBuf),
    /// URI-named shared-cache in-memory database. The data survives as long
    /// as at least one connection to the name stays open.
    SharedMemory(String),
}

/// Opens connections against one database location.
///
/// The primary connection backs the unit of work; read connections are
/// short-lived, non-transactional and used by the listing/get paths so they
/// are never blocked by, and never join, an in-flight write transaction.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    location: DbLocation,
}

impl ConnectionFactory {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: DbLocation::File(path.as_ref().to_path_buf()),
        }
    }

    /// A named in-memory database shared between this factory's connections.
    pub fn shared_memory(tag: &str) -> Self {
        Self {
            location: DbLocation::SharedMemory(format!(
                "file:{tag}?mode=memory&cache=shared"
            )),
        }
    }

    /// Opens the write connection: pragmas configured, migrations applied.
    pub fn open_primary(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        let result = self.open_raw().and_then(|mut conn| {
            bootstrap_primary(&mut conn, self.is_file())?;
            Ok(conn)
        });
        match result {
            Ok(conn) => {
                info!(
                    "event=db_open module=db status=ok mode={} duration_ms={}",
                    self.mode(),
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                log_open_failure(self.mode(), started_at, &err);
                Err(err)
            }
        }
    }

    /// Opens a short-lived read-only connection. No migrations are applied;
    /// `query_only` rejects any write attempted through it.
    pub fn open_read(&self) -> DbResult<Connection> {
        let conn = self.open_raw()?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA query_only = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn open_raw(&self) -> DbResult<Connection> {
        let conn = match &self.location {
            DbLocation::File(path) => Connection::open(path)?,
            DbLocation::SharedMemory(uri) => Connection::open(uri)?,
        };
        Ok(conn)
    }

    fn is_file(&self) -> bool {
        matches!(self.location, DbLocation::File(_))
    }

    fn mode(&self) -> &'static str {
        match self.location {
            DbLocation::File(_) => "file",
            DbLocation::SharedMemory(_) => "shared_memory",
        }
    }
}

fn bootstrap_primary(conn: &mut Connection, file_backed: bool) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if file_backed {
        // WAL keeps read connections from blocking on the write transaction.
        conn.query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))?;
    }
    apply_migrations(conn)?;
    Ok(())
}

fn log_open_failure(mode: &str, started_at: Instant, err: &super::DbError) {
    error!(
        "event=db_open module=db status=error mode={} duration_ms={} error={}",
        mode,
        started_at.elapsed().as_millis(),
        err
    );
}
