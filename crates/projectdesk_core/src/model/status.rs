//! Project status reference data.
//!
//! Statuses are seeded at migration time and read-only for the core; the
//! workflow only validates that a positive status id was supplied.

use super::StatusId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: StatusId,
    pub name: String,
}
