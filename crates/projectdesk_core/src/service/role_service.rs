//! Role ensure-resolver and read paths.

use super::ensure::{ensure_or_create, Resolution};
use super::{WorkflowError, WorkflowResult};
use crate::db::{ConnectionFactory, UnitOfWork};
use crate::model::role::Role;
use crate::model::{RoleId, ValidationError};
use crate::repo::role_repo::{RoleRepository, SqliteRoleRepository};
use log::info;

pub struct RoleService<'a> {
    uow: &'a UnitOfWork,
    reads: &'a ConnectionFactory,
}

impl<'a> RoleService<'a> {
    pub fn new(uow: &'a UnitOfWork, reads: &'a ConnectionFactory) -> Self {
        Self { uow, reads }
    }

    /// Returns the key of the role named `role_name`, creating the row if
    /// absent. Idempotent: repeated calls yield the same key and exactly one
    /// row.
    ///
    /// The name is trimmed before both lookup and insert, so names differing
    /// only in surrounding whitespace resolve to one role.
    pub fn ensure_role(&self, role_name: &str) -> WorkflowResult<RoleId> {
        let name = role_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyRoleName.into());
        }

        ensure_or_create(
            self.uow,
            |conn| {
                let repo = SqliteRoleRepository::new(conn);
                Ok(match repo.find_by_name(name)? {
                    Some(role) => {
                        info!(
                            "event=ensure_role module=service status=hit name={name} role_id={}",
                            role.role_id
                        );
                        Resolution::Exists(role.role_id)
                    }
                    None => {
                        info!("event=ensure_role module=service status=miss name={name}");
                        Resolution::Absent
                    }
                })
            },
            |conn, _| SqliteRoleRepository::new(conn).insert(name),
        )
    }

    /// Looks up an existing role by name; fails with `NotFound` when absent.
    pub fn role_id_by_name(&self, role_name: &str) -> WorkflowResult<RoleId> {
        let name = role_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyRoleName.into());
        }
        let repo = SqliteRoleRepository::new(self.uow.connection());
        match repo.find_by_name(name)? {
            Some(role) => Ok(role.role_id),
            None => Err(WorkflowError::NotFound(format!(
                "role '{name}' does not exist"
            ))),
        }
    }

    /// Lists all roles on a short-lived read connection.
    pub fn list_roles(&self) -> WorkflowResult<Vec<Role>> {
        let conn = self.reads.open_read()?;
        let roles = SqliteRoleRepository::new(&conn).list()?;
        Ok(roles)
    }
}
