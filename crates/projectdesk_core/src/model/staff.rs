//! Staff entity, request model and joined read view.
//!
//! # Invariants
//! - Natural identity is the `(name, role_id)` pair: the same person name
//!   under two different roles is two distinct staff rows.

use super::{RoleId, StaffId, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: StaffId,
    pub name: String,
    pub role_id: RoleId,
}

/// Descriptive input for resolving or creating a staff member. The role is
/// referenced by name and resolved (or created) before the staff lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRequest {
    pub name: String,
    pub role_name: String,
}

impl StaffRequest {
    pub fn new(name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_name: role_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStaffName);
        }
        if self.role_name.trim().is_empty() {
            return Err(ValidationError::EmptyRoleName);
        }
        Ok(())
    }
}

/// Listing projection joining the role name onto the staff row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffView {
    pub staff_id: StaffId,
    pub name: String,
    pub role_name: String,
}
