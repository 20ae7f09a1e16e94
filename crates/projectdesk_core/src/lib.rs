//! Core domain logic for the projectdesk backend.
//! This crate is the single source of truth for business invariants:
//! idempotent ensure-or-create resolution and the transactional project
//! assembly workflow.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, ConnectionFactory, UnitOfWork, UowError};
pub use logging::{default_log_level, init_logging};
pub use model::customer::{Customer, CustomerRequest, DEFAULT_CONTACT_PERSON};
pub use model::project::{
    Project, ProjectDetailsRequest, ProjectUpdateRequest, ProjectView, DEFAULT_DESCRIPTION,
};
pub use model::role::Role;
pub use model::service::{Service, ServiceRequest};
pub use model::staff::{Staff, StaffRequest, StaffView};
pub use model::status::Status;
pub use model::{
    CustomerId, ProjectNumber, RoleId, ServiceId, StaffId, StatusId, ValidationError,
};
pub use repo::{RepoError, RepoResult};
pub use service::customer_service::CustomerService;
pub use service::project_service::ProjectService;
pub use service::role_service::RoleService;
pub use service::service_service::ServiceService;
pub use service::staff_service::StaffService;
pub use service::{WorkflowError, WorkflowResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
