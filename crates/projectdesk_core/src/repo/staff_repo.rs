//! Staff lookup and insert, scoped by the (name, role) natural key.

use super::RepoResult;
use crate::model::staff::{Staff, StaffView};
use crate::model::{RoleId, StaffId};
use rusqlite::{params, Connection, OptionalExtension};

/// Fallback shown in listings for a staff row whose role join is missing.
const NO_ROLE: &str = "No Role";

/// Repository contract for staff rows. Natural key is `(name, role_id)`.
pub trait StaffRepository {
    fn find_by_name_and_role(&self, name: &str, role_id: RoleId) -> RepoResult<Option<Staff>>;
    fn find_by_id(&self, staff_id: StaffId) -> RepoResult<Option<Staff>>;
    fn insert(&self, name: &str, role_id: RoleId) -> RepoResult<StaffId>;
    fn list_views(&self) -> RepoResult<Vec<StaffView>>;
}

pub struct SqliteStaffRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStaffRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StaffRepository for SqliteStaffRepository<'_> {
    fn find_by_name_and_role(&self, name: &str, role_id: RoleId) -> RepoResult<Option<Staff>> {
        let staff = self
            .conn
            .query_row(
                "SELECT staff_id, name, role_id FROM staff
                 WHERE name = ?1 AND role_id = ?2;",
                params![name, role_id],
                |row| {
                    Ok(Staff {
                        staff_id: row.get(0)?,
                        name: row.get(1)?,
                        role_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(staff)
    }

    fn find_by_id(&self, staff_id: StaffId) -> RepoResult<Option<Staff>> {
        let staff = self
            .conn
            .query_row(
                "SELECT staff_id, name, role_id FROM staff WHERE staff_id = ?1;",
                params![staff_id],
                |row| {
                    Ok(Staff {
                        staff_id: row.get(0)?,
                        name: row.get(1)?,
                        role_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(staff)
    }

    fn insert(&self, name: &str, role_id: RoleId) -> RepoResult<StaffId> {
        self.conn.execute(
            "INSERT INTO staff (name, role_id) VALUES (?1, ?2);",
            params![name, role_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_views(&self) -> RepoResult<Vec<StaffView>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.staff_id, s.name, COALESCE(r.name, ?1)
             FROM staff s
             LEFT JOIN roles r ON r.role_id = s.role_id
             ORDER BY s.staff_id;",
        )?;
        let mut rows = stmt.query(params![NO_ROLE])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(StaffView {
                staff_id: row.get(0)?,
                name: row.get(1)?,
                role_name: row.get(2)?,
            });
        }
        Ok(views)
    }
}
