//! Billable service entity and request model.
//!
//! # Invariants
//! - `name` alone is the natural identity; `hourly_price` is mutable
//!   metadata on that identity, never part of it.

use super::{ServiceId, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persisted service record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: ServiceId,
    pub name: String,
    pub hourly_price: Decimal,
}

/// Descriptive input for resolving or creating a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub hourly_price: Decimal,
}

impl ServiceRequest {
    pub fn new(name: impl Into<String>, hourly_price: Decimal) -> Self {
        Self {
            name: name.into(),
            hourly_price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }
        if self.hourly_price < Decimal::ZERO {
            return Err(ValidationError::NegativeHourlyPrice);
        }
        Ok(())
    }
}
