//! Status reference-data reads.

use super::RepoResult;
use crate::model::status::Status;
use rusqlite::Connection;

/// Read-only contract for the seeded status table.
pub trait StatusRepository {
    fn list(&self) -> RepoResult<Vec<Status>>;
}

pub struct SqliteStatusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatusRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StatusRepository for SqliteStatusRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Status>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status_id, name FROM statuses ORDER BY status_id;")?;
        let mut rows = stmt.query([])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            statuses.push(Status {
                status_id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(statuses)
    }
}
