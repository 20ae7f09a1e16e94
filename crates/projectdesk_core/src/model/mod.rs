//! Domain model for the project-management core.
//!
//! # Responsibility
//! - Define the canonical entity records and request models used by the
//!   ensure-resolvers and the project workflow.
//! - Hold input validation so storage code never sees malformed data.
//!
//! # Invariants
//! - Surrogate keys are SQLite rowids; projects are keyed by their
//!   business-assigned project number instead.
//! - Validation failures are reported before any storage interaction.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer;
pub mod project;
pub mod role;
pub mod service;
pub mod staff;
pub mod status;

/// Surrogate key for `customers` rows.
pub type CustomerId = i64;
/// Surrogate key for `roles` rows.
pub type RoleId = i64;
/// Surrogate key for `services` rows.
pub type ServiceId = i64;
/// Surrogate key for `staff` rows.
pub type StaffId = i64;
/// Surrogate key for `statuses` rows.
pub type StatusId = i64;

/// Natural primary key for projects. Assigned by the caller, unique and
/// immutable once a project row exists.
pub type ProjectNumber = String;

/// Input validation failure, raised before any transaction or storage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyCustomerName,
    EmptyContactPerson,
    EmptyRoleName,
    EmptyServiceName,
    NegativeHourlyPrice,
    EmptyStaffName,
    EmptyProjectNumber,
    EmptyProjectName,
    MissingService,
    MissingStaff,
    MissingCustomer,
    InvalidStatus,
    NegativeTotalPrice,
    MissingStartDate,
    MissingEndDate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::EmptyCustomerName => "customer name cannot be empty",
            Self::EmptyContactPerson => "customer contact person cannot be empty",
            Self::EmptyRoleName => "role name cannot be empty",
            Self::EmptyServiceName => "service name cannot be empty",
            Self::NegativeHourlyPrice => "service hourly price cannot be negative",
            Self::EmptyStaffName => "staff name cannot be empty",
            Self::EmptyProjectNumber => "project number is required",
            Self::EmptyProjectName => "project name is required",
            Self::MissingService => "service details are required",
            Self::MissingStaff => "staff details are required",
            Self::MissingCustomer => {
                "either a valid customer id or customer details are required"
            }
            Self::InvalidStatus => "a valid status id is required",
            Self::NegativeTotalPrice => "total price cannot be negative",
            Self::MissingStartDate => "start date is required",
            Self::MissingEndDate => "end date is required",
        };
        write!(f, "{message}")
    }
}

impl Error for ValidationError {}
