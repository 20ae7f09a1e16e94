//! Customer entity and request model.
//!
//! # Invariants
//! - `name` is the natural lookup key. Uniqueness is a business rule
//!   enforced by the ensure-resolver, not by the schema.

use super::{CustomerId, ValidationError};
use serde::{Deserialize, Serialize};

/// Substituted when a customer is ensured without a contact person.
pub const DEFAULT_CONTACT_PERSON: &str = "Unknown Contact";

/// Persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub contact_person: Option<String>,
}

/// Descriptive input for resolving or creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub contact_person: Option<String>,
}

impl CustomerRequest {
    pub fn new(name: impl Into<String>, contact_person: Option<&str>) -> Self {
        Self {
            name: name.into(),
            contact_person: contact_person.map(str::to_string),
        }
    }

    /// Requires a non-blank name; the contact person stays optional and is
    /// defaulted by the resolver.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerName);
        }
        Ok(())
    }
}
