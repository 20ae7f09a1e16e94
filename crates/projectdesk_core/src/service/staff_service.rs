//! Staff ensure-resolver and read paths.
//!
//! Staff resolution composes the role resolver: the role named in the
//! request is ensured first, inside the same transaction scope, and the
//! staff lookup is keyed by `(name, role_id)`.

use super::ensure::{ensure_or_create, Resolution};
use super::role_service::RoleService;
use super::{WorkflowError, WorkflowResult};
use crate::db::{ConnectionFactory, UnitOfWork};
use crate::model::staff::{StaffRequest, StaffView};
use crate::model::StaffId;
use crate::repo::staff_repo::{SqliteStaffRepository, StaffRepository};
use log::info;

pub struct StaffService<'a> {
    uow: &'a UnitOfWork,
    reads: &'a ConnectionFactory,
}

impl<'a> StaffService<'a> {
    pub fn new(uow: &'a UnitOfWork, reads: &'a ConnectionFactory) -> Self {
        Self { uow, reads }
    }

    /// Returns the key of the staff member matching the request, creating
    /// the row if absent.
    ///
    /// The role is resolved first; an unresolvable role aborts with
    /// [`WorkflowError::Dependency`] before any staff write. The same person
    /// name under two different roles is two distinct staff rows.
    pub fn ensure_staff(&self, request: &StaffRequest) -> WorkflowResult<StaffId> {
        request.validate()?;

        let role_id = RoleService::new(self.uow, self.reads).ensure_role(&request.role_name)?;
        if role_id <= 0 {
            return Err(WorkflowError::Dependency(format!(
                "role '{}' could not be resolved",
                request.role_name
            )));
        }

        let name = request.name.as_str();
        ensure_or_create(
            self.uow,
            |conn| {
                let repo = SqliteStaffRepository::new(conn);
                Ok(match repo.find_by_name_and_role(name, role_id)? {
                    Some(staff) => {
                        info!(
                            "event=ensure_staff module=service status=hit staff_id={} role_id={role_id}",
                            staff.staff_id
                        );
                        Resolution::Exists(staff.staff_id)
                    }
                    None => {
                        info!("event=ensure_staff module=service status=miss role_id={role_id}");
                        Resolution::Absent
                    }
                })
            },
            |conn, _| SqliteStaffRepository::new(conn).insert(name, role_id),
        )
    }

    /// Whether a staff row with this key exists.
    pub fn staff_exists(&self, staff_id: StaffId) -> WorkflowResult<bool> {
        let repo = SqliteStaffRepository::new(self.uow.connection());
        Ok(repo.find_by_id(staff_id)?.is_some())
    }

    /// Lists all staff with their role names on a short-lived read
    /// connection.
    pub fn list_staff(&self) -> WorkflowResult<Vec<StaffView>> {
        let conn = self.reads.open_read()?;
        let views = SqliteStaffRepository::new(&conn).list_views()?;
        Ok(views)
    }
}
