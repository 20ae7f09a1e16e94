//! Project entity, workflow request models and the joined read view.
//!
//! # Invariants
//! - `project_number` is the primary key: unique, caller-assigned, and
//!   immutable once the row exists.
//! - Foreign keys are nullable at the storage level but the detailed
//!   creation workflow always resolves all four before committing.
//! - Read views clamp a negative stored total price to zero and substitute
//!   placeholder text for missing descriptions and joined names.

use super::customer::CustomerRequest;
use super::service::ServiceRequest;
use super::staff::StaffRequest;
use super::{CustomerId, ProjectNumber, ServiceId, StaffId, StatusId, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Substituted when a project is written or read with a blank description.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Persisted project record as stored, without read-side defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_number: ProjectNumber,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: Option<CustomerId>,
    pub service_id: Option<ServiceId>,
    pub staff_id: Option<StaffId>,
    pub status_id: Option<StatusId>,
    pub total_price: Decimal,
    pub description: Option<String>,
}

/// Input for the detailed creation workflow. Dependencies are descriptive:
/// the workflow resolves or creates customer, service, role and staff rows
/// before the project row is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetailsRequest {
    pub project_number: ProjectNumber,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Takes precedence over `customer` when positive.
    pub customer_id: CustomerId,
    pub customer: Option<CustomerRequest>,
    pub service: Option<ServiceRequest>,
    pub staff: Option<StaffRequest>,
    pub status_id: StatusId,
    pub total_price: Decimal,
    pub description: Option<String>,
}

impl ProjectDetailsRequest {
    /// Checks every precondition of the workflow before any transaction or
    /// resolver call. Each failure is a distinct [`ValidationError`].
    ///
    /// Customer input is checked later, at resolution time, because a
    /// positive `customer_id` makes the descriptive customer optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_number.trim().is_empty() {
            return Err(ValidationError::EmptyProjectNumber);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        if self.service.is_none() {
            return Err(ValidationError::MissingService);
        }
        if self.staff.is_none() {
            return Err(ValidationError::MissingStaff);
        }
        if self.status_id <= 0 {
            return Err(ValidationError::InvalidStatus);
        }
        if self.total_price < Decimal::ZERO {
            return Err(ValidationError::NegativeTotalPrice);
        }
        if self.start_date.is_none() {
            return Err(ValidationError::MissingStartDate);
        }
        if self.end_date.is_none() {
            return Err(ValidationError::MissingEndDate);
        }
        Ok(())
    }
}

/// Input for updating an existing project in place. Descriptive `service`,
/// `staff` and `customer` fields, when present, are re-resolved through the
/// ensure-resolvers and override the plain foreign-key fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdateRequest {
    pub project_number: ProjectNumber,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: Option<CustomerId>,
    pub service_id: Option<ServiceId>,
    pub staff_id: Option<StaffId>,
    pub status_id: Option<StatusId>,
    pub total_price: Decimal,
    pub description: Option<String>,
    pub service: Option<ServiceRequest>,
    pub staff: Option<StaffRequest>,
    pub customer: Option<CustomerRequest>,
}

/// Listing projection with joined names and read-side defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub project_number: ProjectNumber,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_name: String,
    pub contact_person: String,
    pub service_id: ServiceId,
    pub service_name: String,
    pub hourly_price: Decimal,
    pub staff_id: StaffId,
    pub staff_name: String,
    pub role_name: String,
    pub status_id: StatusId,
    pub status_name: String,
    /// Never negative: a corrupted stored value surfaces as zero.
    pub total_price: Decimal,
    pub description: String,
}
