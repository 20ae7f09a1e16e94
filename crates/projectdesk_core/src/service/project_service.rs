//! Project assembly workflow.
//!
//! # Responsibility
//! - Resolve every dependency of a project (customer, service, staff with
//!   its role) in dependency order inside one transaction boundary, then
//!   persist the project row.
//! - Provide the update/delete paths and the non-transactional read views.
//!
//! # Invariants
//! - Preconditions are validated before any transaction or resolver call.
//! - A failure after partial resolution rolls back everything done within
//!   the owned transaction scope; no orphaned dependency rows remain.
//! - Creating the same project number twice is not idempotent: the second
//!   attempt fails with a conflict and leaves the first result untouched.

use super::customer_service::CustomerService;
use super::ensure::run_owned;
use super::service_service::ServiceService;
use super::staff_service::StaffService;
use super::{WorkflowError, WorkflowResult};
use crate::db::{ConnectionFactory, UnitOfWork};
use crate::model::project::{
    Project, ProjectDetailsRequest, ProjectUpdateRequest, ProjectView, DEFAULT_DESCRIPTION,
};
use crate::model::status::Status;
use crate::model::{CustomerId, ProjectNumber, ValidationError};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::status_repo::{SqliteStatusRepository, StatusRepository};
use log::info;

/// Substituted when an update supplies a blank project name.
const UNNAMED_PROJECT: &str = "Unnamed Project";

pub struct ProjectService<'a> {
    uow: &'a UnitOfWork,
    reads: &'a ConnectionFactory,
}

impl<'a> ProjectService<'a> {
    pub fn new(uow: &'a UnitOfWork, reads: &'a ConnectionFactory) -> Self {
        Self { uow, reads }
    }

    /// Creates a project from descriptive input, resolving or creating its
    /// customer, service, role and staff dependencies atomically.
    ///
    /// Resolution order: customer, service, then staff (which ensures its
    /// role first). Any failure rolls back the whole attempt, including
    /// dependency rows created earlier in the same owned transaction.
    pub fn create_project_with_details(
        &self,
        request: &ProjectDetailsRequest,
    ) -> WorkflowResult<ProjectNumber> {
        request.validate()?;
        info!(
            "event=create_project module=service status=start project_number={}",
            request.project_number
        );

        run_owned(self.uow, |uow| -> WorkflowResult<ProjectNumber> {
            let customer_id = self.resolve_customer_id(request)?;

            let service = request
                .service
                .as_ref()
                .ok_or(ValidationError::MissingService)?;
            let staff = request.staff.as_ref().ok_or(ValidationError::MissingStaff)?;
            let start_date = request.start_date.ok_or(ValidationError::MissingStartDate)?;
            let end_date = request.end_date.ok_or(ValidationError::MissingEndDate)?;

            let service_id = ServiceService::new(uow, self.reads).ensure_service(service)?;
            let staff_id = StaffService::new(uow, self.reads).ensure_staff(staff)?;

            let project = Project {
                project_number: request.project_number.clone(),
                name: request.name.clone(),
                start_date,
                end_date,
                customer_id: Some(customer_id),
                service_id: Some(service_id),
                staff_id: Some(staff_id),
                status_id: Some(request.status_id),
                total_price: request.total_price,
                description: Some(defaulted_description(request.description.as_deref())),
            };

            SqliteProjectRepository::new(uow.connection()).insert(&project)?;
            info!(
                "event=create_project module=service status=ok project_number={}",
                project.project_number
            );
            Ok(project.project_number)
        })
    }

    /// Updates an existing project in place. Descriptive service, staff or
    /// customer input is re-resolved through the ensure-resolvers and
    /// overrides the plain foreign-key fields.
    pub fn update_project(&self, request: &ProjectUpdateRequest) -> WorkflowResult<()> {
        if request.project_number.trim().is_empty() {
            return Err(ValidationError::EmptyProjectNumber.into());
        }

        let repo = SqliteProjectRepository::new(self.uow.connection());
        let mut existing = repo.find(&request.project_number)?.ok_or_else(|| {
            WorkflowError::NotFound(format!(
                "project '{}' not found",
                request.project_number
            ))
        })?;

        run_owned(self.uow, |uow| -> WorkflowResult<()> {
            existing.name = if request.name.trim().is_empty() {
                UNNAMED_PROJECT.to_string()
            } else {
                request.name.clone()
            };
            existing.start_date = request.start_date;
            existing.end_date = request.end_date;
            existing.total_price = request.total_price;
            existing.description = Some(defaulted_description(request.description.as_deref()));

            if let Some(customer_id) = request.customer_id {
                existing.customer_id = Some(customer_id);
            }
            if let Some(service_id) = request.service_id {
                existing.service_id = Some(service_id);
            }
            if let Some(staff_id) = request.staff_id {
                existing.staff_id = Some(staff_id);
            }
            if let Some(status_id) = request.status_id {
                existing.status_id = Some(status_id);
            }

            if let Some(service) = &request.service {
                existing.service_id =
                    Some(ServiceService::new(uow, self.reads).ensure_service(service)?);
            }
            if let Some(staff) = &request.staff {
                existing.staff_id =
                    Some(StaffService::new(uow, self.reads).ensure_staff(staff)?);
            }
            if let Some(customer) = &request.customer {
                existing.customer_id = Some(
                    CustomerService::new(uow, self.reads)
                        .ensure_customer(&customer.name, customer.contact_person.as_deref())?,
                );
            }

            SqliteProjectRepository::new(uow.connection()).update(&existing)?;
            info!(
                "event=update_project module=service status=ok project_number={}",
                existing.project_number
            );
            Ok(())
        })
    }

    /// Deletes a project by number. Returns whether a row was removed.
    pub fn delete_project(&self, project_number: &str) -> WorkflowResult<bool> {
        if project_number.trim().is_empty() {
            return Err(ValidationError::EmptyProjectNumber.into());
        }

        run_owned(self.uow, |uow| {
            SqliteProjectRepository::new(uow.connection()).delete(project_number)
        })
    }

    /// Lists all projects with joined names on a short-lived read
    /// connection, never joining the write transaction.
    pub fn list_projects(&self) -> WorkflowResult<Vec<ProjectView>> {
        let conn = self.reads.open_read()?;
        let views = SqliteProjectRepository::new(&conn).list_views()?;
        Ok(views)
    }

    /// Fetches one project view by number on a short-lived read connection.
    pub fn project_by_number(
        &self,
        project_number: &str,
    ) -> WorkflowResult<Option<ProjectView>> {
        if project_number.trim().is_empty() {
            return Err(ValidationError::EmptyProjectNumber.into());
        }
        let conn = self.reads.open_read()?;
        let view = SqliteProjectRepository::new(&conn).view_by_number(project_number)?;
        Ok(view)
    }

    /// Lists the seeded project statuses on a short-lived read connection.
    pub fn list_statuses(&self) -> WorkflowResult<Vec<Status>> {
        let conn = self.reads.open_read()?;
        let statuses = SqliteStatusRepository::new(&conn).list()?;
        Ok(statuses)
    }

    /// A supplied positive customer id wins; otherwise descriptive customer
    /// input is required and resolved through the ensure path.
    fn resolve_customer_id(&self, request: &ProjectDetailsRequest) -> WorkflowResult<CustomerId> {
        if request.customer_id > 0 {
            return Ok(request.customer_id);
        }
        match &request.customer {
            Some(customer) if !customer.name.trim().is_empty() => {
                CustomerService::new(self.uow, self.reads)
                    .ensure_customer(&customer.name, customer.contact_person.as_deref())
            }
            _ => Err(ValidationError::MissingCustomer.into()),
        }
    }
}

fn defaulted_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => DEFAULT_DESCRIPTION.to_string(),
    }
}
