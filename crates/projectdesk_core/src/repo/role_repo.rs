//! Role lookup and insert.

use super::RepoResult;
use crate::model::role::Role;
use crate::model::RoleId;
use rusqlite::{params, Connection, OptionalExtension};

/// Repository contract for role rows. Natural key is the name.
pub trait RoleRepository {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>>;
    fn insert(&self, name: &str) -> RepoResult<RoleId>;
    fn list(&self) -> RepoResult<Vec<Role>>;
}

pub struct SqliteRoleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoleRepository for SqliteRoleRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let role = self
            .conn
            .query_row(
                "SELECT role_id, name FROM roles WHERE name = ?1;",
                params![name],
                |row| {
                    Ok(Role {
                        role_id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(role)
    }

    fn insert(&self, name: &str) -> RepoResult<RoleId> {
        self.conn
            .execute("INSERT INTO roles (name) VALUES (?1);", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<Role>> {
        let mut stmt = self
            .conn
            .prepare("SELECT role_id, name FROM roles ORDER BY role_id;")?;
        let mut rows = stmt.query([])?;
        let mut roles = Vec::new();
        while let Some(row) = rows.next()? {
            roles.push(Role {
                role_id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(roles)
    }
}
